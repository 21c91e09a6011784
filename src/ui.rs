use crate::app::{App, HEADER_ROWS};
use crate::braille::BrailleCanvas;
use crate::data::Station;
use crate::globe::SceneLayers;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into header, globe area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(3),    // Globe
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_globe(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Detail panel floats over the globe, original-style
    if let Some(station) = app.selected_station() {
        render_detail_panel(frame, station, chunks[1]);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(22)])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Global Broadcast Network",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Live streams from around the world",
            Style::default().fg(Color::Blue),
        )),
    ]);
    frame.render_widget(title, halves[0]);

    let counter = Paragraph::new(vec![
        Line::from(Span::styled(
            "Active Broadcasts",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            app.live_count().to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(counter, halves[1]);
}

fn render_globe(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Earth ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Size the camera to the actual inner area; braille gives 2x4
    // resolution per character
    let mut camera = app.camera.clone();
    camera.set_size(inner.width as usize * 2, inner.height as usize * 4);

    let layers = app.scene.render(
        inner.width as usize,
        inner.height as usize,
        &camera,
        app.elapsed,
        app.selected.as_deref(),
        app.show_labels,
    );

    frame.render_widget(GlobeWidget { layers }, inner);
}

/// Custom widget that renders the braille scene layers with per-state
/// colors and overlays station labels.
struct GlobeWidget {
    layers: SceneLayers,
}

impl GlobeWidget {
    /// Render a braille canvas layer with a specific color
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (row_idx, row_str) in canvas.rows().enumerate() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, ch) in row_str.chars().enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                // Skip empty braille characters (U+2800)
                if ch == '\u{2800}' {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

impl Widget for GlobeWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: earth surface, offline dots, live dots, selection
        Self::render_layer(&self.layers.surface, Color::Blue, area, buf);
        Self::render_layer(&self.layers.offline, Color::DarkGray, area, buf);
        Self::render_layer(&self.layers.live, Color::Red, area, buf);
        Self::render_layer(&self.layers.selected, Color::Cyan, area, buf);

        // Station name labels
        let label_style = Style::default().fg(Color::White);
        for (lx, ly, text) in &self.layers.labels {
            if *ly >= area.height || *lx >= area.width {
                continue;
            }

            let x = area.x + *lx;
            let y = area.y + *ly;

            let max_len = (area.width.saturating_sub(*lx)) as usize;
            let display_text: String = text.chars().take(max_len.min(20)).collect();

            for (i, ch) in display_text.chars().enumerate() {
                let px = x + i as u16;
                if px < area.x + area.width {
                    buf[(px, y)].set_char(ch).set_style(label_style);
                }
            }
        }
    }
}

fn render_detail_panel(frame: &mut Frame, station: &Station, globe_area: Rect) {
    let width = 38.min(globe_area.width.saturating_sub(2));
    let height = 16.min(globe_area.height.saturating_sub(2));
    if width < 10 || height < 8 {
        return;
    }

    let panel = Rect {
        x: globe_area.right().saturating_sub(width + 1),
        y: globe_area.y + 1,
        width,
        height,
    };

    let status_line = if station.is_live {
        Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Red)),
            Span::styled(
                "LIVE NOW",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(Span::styled("○ Offline", Style::default().fg(Color::DarkGray)))
    };

    let field = Style::default().fg(Color::Blue);
    let value = Style::default().fg(Color::White);

    let lines = vec![
        Line::from(Span::styled(station.country, Style::default().fg(Color::Blue))),
        status_line,
        Line::default(),
        Line::from(vec![
            Span::styled("Viewers   ", field),
            Span::styled(
                format_viewers(station.viewers),
                value.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Category  ", field),
            Span::styled(station.category, value),
        ]),
        Line::default(),
        Line::from(Span::styled(station.description, Style::default().fg(Color::Gray))),
        Line::default(),
        Line::from(vec![
            Span::styled("Latitude  ", field),
            Span::styled(format!("{:.4}°", station.lat_deg), value),
        ]),
        Line::from(vec![
            Span::styled("Longitude ", field),
            Span::styled(format!("{:.4}°", station.lon_deg), value),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "Esc/x: close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} ", station.name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });

    frame.render_widget(Clear, panel);
    frame.render_widget(paragraph, panel);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        // Legend
        Span::styled("● ", Style::default().fg(Color::Red)),
        Span::styled("live ", Style::default().fg(Color::DarkGray)),
        Span::styled("● ", Style::default().fg(Color::Gray)),
        Span::styled("offline ", Style::default().fg(Color::DarkGray)),
        Span::styled("✚ ", Style::default().fg(Color::Cyan)),
        Span::styled("selected ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            if app.show_labels { "[L]abels " } else { "[l]abels " },
            Style::default().fg(if app.show_labels { Color::Green } else { Color::DarkGray }),
        ),
    ];

    if let Some(station) = app.selected_station() {
        spans.push(Span::styled("| ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            station.name,
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled(
        "| drag:orbit scroll:zoom Tab:next Esc:close r:reset q:quit",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph, area);
}

/// Compact viewer-count display: 2840000 -> "2.8M", 54000 -> "54.0K"
pub fn format_viewers(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_viewers_millions() {
        assert_eq!(format_viewers(2_840_000), "2.8M");
        assert_eq!(format_viewers(1_000_000), "1.0M");
    }

    #[test]
    fn test_format_viewers_thousands() {
        assert_eq!(format_viewers(54_000), "54.0K");
        assert_eq!(format_viewers(1_500), "1.5K");
    }

    #[test]
    fn test_format_viewers_small() {
        assert_eq!(format_viewers(999), "999");
        assert_eq!(format_viewers(0), "0");
    }
}
