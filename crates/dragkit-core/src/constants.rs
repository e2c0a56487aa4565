use glam::Vec3;

// Shared camera, picking and harness tuning constants.

// Camera defaults
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, -5.0); // harness eye, looks at the origin

// Ray casting
pub const RAYCAST_NEAR: f32 = 0.0;
pub const RAYCAST_FAR: f32 = f32::INFINITY;

// Harness
pub const CANVAS_ID: &str = "canvas-root";
pub const CLEAR_ALPHA: f64 = 0.0; // transparent clear so the page shows through

// Marker renderer
pub const MARKER_BASE_SCALE: f32 = 1.0; // billboard size multiplier over the bounding radius
pub const MAX_MARKERS: usize = 256;

// Highlight colors applied by the demo listeners
pub const HOVER_EMISSIVE: Vec3 = Vec3::new(0.25, 0.25, 0.25);
pub const DRAG_EMISSIVE: Vec3 = Vec3::new(0.45, 0.35, 0.1);

// Reflector defaults
pub const REFLECTOR_COLOR: u32 = 0x7f7f7f;
pub const REFLECTOR_TEXTURE_SIZE: u32 = 512;
pub const REFLECTOR_CLIP_BIAS: f32 = 0.0;

/// Convert a packed `0xRRGGBB` color to linear-ish float RGB.
#[inline]
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}
