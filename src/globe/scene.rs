use glam::DVec3;

use crate::braille::BrailleCanvas;
use crate::globe::animation::{self, BOB_FREQUENCY, SPIN_RATE};
use crate::globe::camera::OrbitCamera;
use crate::globe::geometry::{draw_circle, draw_circle_outline, draw_line, draw_marker};
use crate::globe::projection::{self, GeoPoint, GLOBE_RADIUS, MARKER_RADIUS};

/// A geographic line (sequence of lon/lat coordinates in degrees)
pub type LineString = Vec<(f64, f64)>;

/// Squared screen distance within which a click selects a marker
const PICK_RADIUS_SQ: f64 = 81.0;

/// A broadcast station marker pinned to the globe surface.
/// `base_position` is computed once from the geographic coordinate and
/// never recomputed; the rendered position is derived from it every frame.
pub struct Marker {
    pub id: String,
    /// Display label drawn next to the dot
    pub name: String,
    /// Fixed position on the marker shell: |base_position| == MARKER_RADIUS
    pub base_position: DVec3,
    pub is_live: bool,
    /// Bob decorrelation phase, derived from the id
    pub phase: f64,
}

impl Marker {
    pub fn new(id: impl Into<String>, name: impl Into<String>, point: GeoPoint, is_live: bool) -> Self {
        let id = id.into();
        let phase = animation::phase_seed(&id);
        Self {
            base_position: projection::project(point, MARKER_RADIUS),
            id,
            name: name.into(),
            is_live,
            phase,
        }
    }

    /// Animated position for the current frame. Pure; reads only the
    /// immutable base position and the shared clock value.
    pub fn rendered_position(&self, elapsed_secs: f64) -> DVec3 {
        animation::animate(self.base_position, elapsed_secs, self.phase)
    }
}

/// Braille layers produced per frame, colored separately by the UI
pub struct SceneLayers {
    /// Globe silhouette and continent outlines
    pub surface: BrailleCanvas,
    /// Live station dots
    pub live: BrailleCanvas,
    /// Offline station dots
    pub offline: BrailleCanvas,
    /// The selected station's dot and crosshair
    pub selected: BrailleCanvas,
    /// Station name labels in character coordinates
    pub labels: Vec<(u16, u16, String)>,
}

/// The rendered world: continent outlines on the sphere surface plus
/// station markers on a shell just above it. Both spin together at
/// SPIN_RATE around the vertical axis.
pub struct Scene {
    pub coastlines: Vec<LineString>,
    pub markers: Vec<Marker>,
}

impl Scene {
    pub fn new(coastlines: Vec<LineString>, markers: Vec<Marker>) -> Self {
        Self { coastlines, markers }
    }

    /// Render one frame into braille layers. Runs unconditionally every
    /// displayed frame; marker positions are recomputed from base state
    /// and `elapsed_secs`, never stored.
    pub fn render(
        &self,
        char_width: usize,
        char_height: usize,
        camera: &OrbitCamera,
        elapsed_secs: f64,
        selected: Option<&str>,
        show_labels: bool,
    ) -> SceneLayers {
        let mut layers = SceneLayers {
            surface: BrailleCanvas::new(char_width, char_height),
            live: BrailleCanvas::new(char_width, char_height),
            offline: BrailleCanvas::new(char_width, char_height),
            selected: BrailleCanvas::new(char_width, char_height),
            labels: Vec::new(),
        };

        // Globe silhouette
        let cx = camera.width as i32 / 2;
        let cy = camera.height as i32 / 2;
        draw_circle_outline(&mut layers.surface, cx, cy, camera.globe_pixel_radius() as i32);

        // Continent outlines, spun to the current earth rotation
        let theta = elapsed_secs * SPIN_RATE;
        for line in &self.coastlines {
            self.draw_coastline(&mut layers.surface, line, camera, theta);
        }

        // Station markers
        for marker in &self.markers {
            let pos = marker.rendered_position(elapsed_secs);
            let Some((px, py)) = camera.project(pos) else {
                continue;
            };
            if !camera.is_visible(px, py) {
                continue;
            }

            let is_selected = selected == Some(marker.id.as_str());
            if is_selected {
                draw_circle(&mut layers.selected, px, py, 3);
                draw_marker(&mut layers.selected, px, py, 6);
            } else if marker.is_live {
                // Pulse between radius 2 and 3 on the bob rhythm
                let pulse = (elapsed_secs * BOB_FREQUENCY + marker.phase).sin() > 0.0;
                draw_circle(&mut layers.live, px, py, if pulse { 3 } else { 2 });
            } else {
                draw_circle(&mut layers.offline, px, py, 2);
            }

            if show_labels && px >= 0 && py >= 0 {
                let char_x = (px / 2) as u16;
                let char_y = (py / 4) as u16;
                if let Some(label_x) = char_x.checked_add(2) {
                    layers.labels.push((label_x, char_y, marker.name.clone()));
                }
            }
        }

        layers
    }

    /// Draw a coastline with segment breaks at the limb and culling of
    /// wrap-around jumps.
    fn draw_coastline(
        &self,
        canvas: &mut BrailleCanvas,
        line: &LineString,
        camera: &OrbitCamera,
        theta: f64,
    ) {
        if line.len() < 2 {
            return;
        }

        let mut prev: Option<(i32, i32)> = None;

        for &(lon, lat) in line {
            let p = projection::project(GeoPoint::new(lat, lon), GLOBE_RADIUS);
            let (x, z) = animation::spin_xz(p.x, p.z, theta);

            match camera.project(DVec3::new(x, p.y, z)) {
                Some((px, py)) => {
                    if let Some((prev_x, prev_y)) = prev {
                        let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
                        if dist < camera.width {
                            draw_line(canvas, prev_x, prev_y, px, py);
                        }
                    }
                    prev = Some((px, py));
                }
                // Back-facing vertex: break the polyline at the limb
                None => prev = None,
            }
        }
    }

    /// Find the marker nearest to a clicked braille pixel, if any is
    /// within the pick radius. Back-facing markers are never picked.
    pub fn pick(&self, px: i32, py: i32, camera: &OrbitCamera, elapsed_secs: f64) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;

        for marker in &self.markers {
            let Some((mx, my)) = camera.project(marker.rendered_position(elapsed_secs)) else {
                continue;
            };
            let dx = (mx - px) as f64;
            let dy = (my - py) as f64;
            let dist_sq = dx * dx + dy * dy;

            if dist_sq <= PICK_RADIUS_SQ && best.map_or(true, |(_, d)| dist_sq < d) {
                best = Some((marker.id.as_str(), dist_sq));
            }
        }

        best.map(|(id, _)| id)
    }
}
