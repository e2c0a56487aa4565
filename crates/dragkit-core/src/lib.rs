pub mod camera;
pub mod constants;
pub mod controls;
pub mod draw;
pub mod events;
pub mod math;
pub mod raycast;
pub mod reflector;
pub mod scene;
pub mod surface;

pub use camera::*;
pub use constants::*;
pub use controls::*;
pub use draw::*;
pub use events::*;
pub use math::*;
pub use raycast::*;
pub use reflector::*;
pub use scene::*;
pub use surface::*;

// Shaders bundled as string constants
pub static MARKERS_WGSL: &str = include_str!("../shaders/markers.wgsl");
