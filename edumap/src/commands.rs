use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("edumap")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("edumap")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("view")
                .about(
                    "Open the interactive map: search institutions, inspect markers, and chat \
                with the assistant about a selection.",
                )
                .arg(
                    arg!(-d --"data" <PATH>)
                        .required(false)
                        .help("Path to an institutions JSON dataset (default: bundled sample)"),
                )
                .arg(
                    arg!(-a --"api-url" <URL>)
                        .required(false)
                        .help("Base URL of the assistant API")
                        .default_value(edumap_client::DEFAULT_BASE_URL),
                )
                .arg(
                    arg!(-g --"group-by" <KEY>)
                        .required(false)
                        .help("Attribute used to bucket markers")
                        .value_parser(["category", "area"])
                        .default_value("category"),
                )
                .arg(
                    arg!(--"keep-transcripts")
                        .required(false)
                        .help("Keep chat transcripts when re-selecting the same institution")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("search")
                .about("Filter the dataset by a case-insensitive term and print the matches")
                .arg(arg!(<TERM> "The search term").required(true))
                .arg(
                    arg!(-d --"data" <PATH>)
                        .required(false)
                        .help("Path to an institutions JSON dataset (default: bundled sample)"),
                ),
        )
        .subcommand(
            command!("details")
                .about(
                    "Print one institution's attributes, augmented with live details from the \
                assistant API when reachable.",
                )
                .arg(arg!(<NAME> "The institution name, matched exactly").required(true))
                .arg(
                    arg!(-d --"data" <PATH>)
                        .required(false)
                        .help("Path to an institutions JSON dataset (default: bundled sample)"),
                )
                .arg(
                    arg!(-a --"api-url" <URL>)
                        .required(false)
                        .help("Base URL of the assistant API")
                        .default_value(edumap_client::DEFAULT_BASE_URL),
                )
                .arg(
                    arg!(--"offline")
                        .required(false)
                        .help("Skip the live-details request")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("ask")
                .about("Ask the assistant one question about an institution")
                .arg(arg!(<NAME> "The institution name").required(true))
                .arg(
                    arg!(<QUERY> "The question to ask")
                        .required(true)
                        .num_args(1..),
                )
                .arg(
                    arg!(-a --"api-url" <URL>)
                        .required(false)
                        .help("Base URL of the assistant API")
                        .default_value(edumap_client::DEFAULT_BASE_URL),
                ),
        )
        .subcommand(
            command!("info")
                .about("Print dataset statistics")
                .arg(
                    arg!(-d --"data" <PATH>)
                        .required(false)
                        .help("Path to an institutions JSON dataset (default: bundled sample)"),
                ),
        )
}
