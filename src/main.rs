use anyhow::Result;
use broadcast_globe::app::App;
use broadcast_globe::{data, ui};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Handle mouse events: drag orbits the globe, a plain click selects,
/// scroll zooms
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_in(),
        MouseEventKind::ScrollDown => app.zoom_out(),
        MouseEventKind::Down(MouseButton::Left) => app.begin_drag(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(mouse.column, mouse.row),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal) -> Result<()> {
    let size = terminal.size()?;

    // Coastlines: Natural Earth GeoJSON when available, otherwise the
    // built-in simplified outlines
    let data_dir = Path::new("data");
    let mut coastlines = Vec::new();
    if data_dir.exists() {
        coastlines = data::load_coastlines(data_dir)?;
    }
    if coastlines.is_empty() {
        coastlines = data::builtin_coastlines();
    }

    let mut app = App::new(
        size.width as usize,
        size.height as usize,
        data::sample_stations(),
        coastlines,
    );

    // Scene clock: monotonic seconds since start, shared by all animation
    let start = Instant::now();

    // Main loop
    loop {
        app.tick(start.elapsed().as_secs_f64());

        // Draw
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') => app.quit(),
                            KeyCode::Esc => {
                                if app.selected.is_some() {
                                    app.clear_selection();
                                } else {
                                    app.quit();
                                }
                            }
                            KeyCode::Char('x') | KeyCode::Char('X') => app.clear_selection(),

                            // Orbit with hjkl or arrow keys
                            KeyCode::Left | KeyCode::Char('h') => app.orbit(-12, 0),
                            KeyCode::Right | KeyCode::Char('l') => app.orbit(12, 0),
                            KeyCode::Up | KeyCode::Char('k') => app.orbit(0, -8),
                            KeyCode::Down | KeyCode::Char('j') => app.orbit(0, 8),

                            // Zoom
                            KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                            KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                            // Cycle station selection
                            KeyCode::Tab | KeyCode::Char('n') => app.select_next(),

                            // Label toggle
                            KeyCode::Char('L') => app.toggle_labels(),

                            // Reset view
                            KeyCode::Char('r') | KeyCode::Char('0') => app.reset_view(),

                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse(&mut app, mouse);
                }
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
