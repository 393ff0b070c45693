use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

pub mod map_view;

pub use map_view::{MapView, MapViewOptions};

/// Launch the interactive map view and block until the user quits. The
/// terminal is a singleton resource for the view's lifetime: raw mode and
/// the alternate screen are entered here and restored on every exit path,
/// and the map surface (with all its markers) is dropped with the view.
pub fn run(options: MapViewOptions) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create the view state; the initial dataset draw happens here
    let mut app = MapView::new(options)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut MapView,
) -> Result<()> {
    loop {
        // Completions from spawned network tasks land on the event loop,
        // never concurrently with it
        app.process_messages();

        terminal.draw(|f| app.render(f))?;

        // Poll instead of blocking so pending completions keep draining
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            // Only process KeyPress events, ignore KeyRelease
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
