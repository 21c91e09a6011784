use crate::data::Station;
use crate::globe::projection::GeoPoint;
use crate::globe::scene::LineString;
use crate::globe::{Marker, OrbitCamera, Scene};

/// Rows above the globe block (header)
pub const HEADER_ROWS: u16 = 2;

/// Application state
pub struct App {
    pub camera: OrbitCamera,
    pub scene: Scene,
    pub stations: Vec<Station>,
    /// Currently selected station id. Explicit state compared by id;
    /// read by both the scene renderer and the detail panel.
    pub selected: Option<String>,
    /// Seconds since scene start, written by the host loop every frame
    pub elapsed: f64,
    pub show_labels: bool,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Whether the current press moved — distinguishes drag from click
    drag_moved: bool,
}

impl App {
    pub fn new(
        width: usize,
        height: usize,
        stations: Vec<Station>,
        coastlines: Vec<LineString>,
    ) -> Self {
        let markers = stations
            .iter()
            .map(|s| {
                Marker::new(
                    s.id,
                    s.name,
                    GeoPoint::new(s.lat_deg, s.lon_deg),
                    s.is_live,
                )
            })
            .collect();

        let (pixel_width, pixel_height) = Self::globe_pixels(width, height);

        Self {
            camera: OrbitCamera::new(pixel_width, pixel_height),
            scene: Scene::new(coastlines, markers),
            stations,
            selected: None,
            elapsed: 0.0,
            show_labels: true,
            should_quit: false,
            last_mouse: None,
            drag_moved: false,
        }
    }

    /// Braille pixel dimensions of the globe area for a terminal size.
    /// Accounts for the header, the status bar and the block border;
    /// braille gives 2x4 resolution per character.
    fn globe_pixels(width: usize, height: usize) -> (usize, usize) {
        let inner_width = width.saturating_sub(2);
        let inner_height = height.saturating_sub(HEADER_ROWS as usize + 3);
        (inner_width * 2, inner_height * 4)
    }

    /// Update camera viewport when the terminal resizes
    pub fn resize(&mut self, width: usize, height: usize) {
        let (pw, ph) = Self::globe_pixels(width, height);
        self.camera.set_size(pw, ph);
    }

    /// Advance the shared clock. Called once per frame by the host loop;
    /// everything animated derives from this value.
    pub fn tick(&mut self, elapsed_secs: f64) {
        self.elapsed = elapsed_secs;
    }

    /// Orbit the camera by a braille pixel delta (keyboard controls)
    pub fn orbit(&mut self, dx: i32, dy: i32) {
        self.camera.rotate_drag(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    /// Convert a terminal cell to braille pixel coordinates inside the
    /// globe area (1 cell border, header rows above).
    fn mouse_pixel_pos(col: u16, row: u16) -> (i32, i32) {
        let px = (col.saturating_sub(1)) as i32 * 2;
        let py = (row.saturating_sub(HEADER_ROWS + 1)) as i32 * 4;
        (px, py)
    }

    /// Begin tracking a mouse press
    pub fn begin_drag(&mut self, col: u16, row: u16) {
        self.last_mouse = Some((col, row));
        self.drag_moved = false;
    }

    /// Handle mouse drag — orbits the camera
    pub fn handle_drag(&mut self, col: u16, row: u16) {
        if let Some((last_col, last_row)) = self.last_mouse {
            let dx = (col as i32 - last_col as i32) * 2;
            let dy = (row as i32 - last_row as i32) * 4;
            if dx != 0 || dy != 0 {
                self.drag_moved = true;
                self.camera.rotate_drag(dx, dy);
            }
        }
        self.last_mouse = Some((col, row));
    }

    /// Finish a mouse press. A release without movement is a click and
    /// selects (or deselects) the station under the cursor.
    pub fn end_drag(&mut self, col: u16, row: u16) {
        if !self.drag_moved && self.last_mouse.is_some() {
            self.click_at(col, row);
        }
        self.last_mouse = None;
        self.drag_moved = false;
    }

    /// Select the marker under a clicked cell; clicking the already
    /// selected marker or empty space clears the selection.
    pub fn click_at(&mut self, col: u16, row: u16) {
        let (px, py) = Self::mouse_pixel_pos(col, row);
        match self.scene.pick(px, py, &self.camera, self.elapsed) {
            Some(id) if self.selected.as_deref() == Some(id) => self.selected = None,
            Some(id) => self.selected = Some(id.to_string()),
            None => self.selected = None,
        }
    }

    /// Cycle selection through the station list (keyboard)
    pub fn select_next(&mut self) {
        if self.stations.is_empty() {
            return;
        }
        let next = match &self.selected {
            Some(id) => self
                .stations
                .iter()
                .position(|s| s.id == id.as_str())
                .map(|i| (i + 1) % self.stations.len())
                .unwrap_or(0),
            None => 0,
        };
        self.selected = Some(self.stations[next].id.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The station record behind the current selection, if any
    pub fn selected_station(&self) -> Option<&Station> {
        let id = self.selected.as_deref()?;
        self.stations.iter().find(|s| s.id == id)
    }

    /// Number of stations currently live
    pub fn live_count(&self) -> usize {
        self.stations.iter().filter(|s| s.is_live).count()
    }

    /// Current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.camera.zoom())
    }

    pub fn toggle_labels(&mut self) {
        self.show_labels = !self.show_labels;
    }

    /// Reset camera to the starting view
    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let stations = vec![
            Station {
                id: "front",
                name: "Front",
                country: "Nowhere",
                // lon 90 faces the default camera on the +z axis
                lat_deg: 0.0,
                lon_deg: 90.0,
                description: "test",
                viewers: 10,
                category: "Test",
                is_live: true,
            },
            Station {
                id: "back",
                name: "Back",
                country: "Nowhere",
                lat_deg: 0.0,
                lon_deg: -90.0,
                description: "test",
                viewers: 5,
                category: "Test",
                is_live: false,
            },
        ];
        App::new(120, 40, stations, Vec::new())
    }

    #[test]
    fn test_select_cycle() {
        let mut app = test_app();
        assert!(app.selected.is_none());
        app.select_next();
        assert_eq!(app.selected.as_deref(), Some("front"));
        app.select_next();
        assert_eq!(app.selected.as_deref(), Some("back"));
        app.select_next();
        assert_eq!(app.selected.as_deref(), Some("front"));
    }

    #[test]
    fn test_selected_station_lookup() {
        let mut app = test_app();
        app.select_next();
        assert_eq!(app.selected_station().unwrap().name, "Front");
        app.clear_selection();
        assert!(app.selected_station().is_none());
    }

    #[test]
    fn test_click_selects_and_toggles() {
        let mut app = test_app();
        // Project the front marker and convert back to a terminal cell
        let pos = app.scene.markers[0].rendered_position(app.elapsed);
        let (px, py) = app.camera.project(pos).unwrap();
        let col = (px / 2 + 1) as u16;
        let row = (py / 4) as u16 + HEADER_ROWS + 1;

        app.click_at(col, row);
        assert_eq!(app.selected.as_deref(), Some("front"));
        // Clicking again deselects
        app.click_at(col, row);
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_drag_is_not_a_click() {
        let mut app = test_app();
        app.begin_drag(30, 10);
        app.handle_drag(40, 12);
        app.end_drag(40, 12);
        assert!(app.selected.is_none());
        assert!(app.last_mouse.is_none());
    }

    #[test]
    fn test_live_count() {
        let app = test_app();
        assert_eq!(app.live_count(), 1);
    }

    #[test]
    fn test_tick_sets_clock() {
        let mut app = test_app();
        app.tick(4.25);
        assert!((app.elapsed - 4.25).abs() < f64::EPSILON);
    }
}
