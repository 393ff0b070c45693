pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod registry;
pub mod search;
pub mod viewport;

pub use config::MapConfig;
pub use dataset::Dataset;
pub use error::{DatasetError, Result};
pub use model::{GroupBy, LocationRecord};
pub use registry::{MapSurface, MarkerId, MarkerRegistry};
pub use search::{SearchField, SearchFilter};
pub use viewport::{GeoBounds, LatLng, Viewport};

pub fn print_banner() {
    let banner = r#"
    ███████╗██████╗ ██╗   ██╗███╗   ███╗ █████╗ ██████╗
    ██╔════╝██╔══██╗██║   ██║████╗ ████║██╔══██╗██╔══██╗
    █████╗  ██║  ██║██║   ██║██╔████╔██║███████║██████╔╝
    ██╔══╝  ██║  ██║██║   ██║██║╚██╔╝██║██╔══██║██╔═══╝
    ███████╗██████╔╝╚██████╔╝██║ ╚═╝ ██║██║  ██║██║
    ╚══════╝╚═════╝  ╚═════╝ ╚═╝     ╚═╝╚═╝  ╚═╝╚═╝
    "#;
    println!("{}", banner);
    println!("    An interactive map of tertiary institutions, v{}", env!("CARGO_PKG_VERSION"));
    println!();
}
