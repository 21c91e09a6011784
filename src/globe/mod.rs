pub mod animation;
pub mod camera;
mod geometry;
pub mod projection;
pub mod scene;

pub use camera::OrbitCamera;
pub use scene::{Marker, Scene, SceneLayers};
