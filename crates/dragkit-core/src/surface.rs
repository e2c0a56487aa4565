//! Input surface abstraction: where pointer input comes from and where the
//! cursor style is shown.

use glam::Vec2;
use smallvec::SmallVec;

/// Bounding rectangle of a surface in client (CSS pixel) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClientRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ClientRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// No explicit style; the surface falls back to its stylesheet.
    #[default]
    Default,
    Auto,
    Pointer,
    Move,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Default => "",
            Cursor::Auto => "auto",
            Cursor::Pointer => "pointer",
            Cursor::Move => "move",
        }
    }
}

/// Host element the controls listen on.
pub trait InputSurface {
    fn bounding_rect(&self) -> ClientRect;
    fn set_cursor(&self, cursor: Cursor);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

impl PointerKind {
    /// Map a DOM `pointerType` string. Unknown types are treated as mouse.
    pub fn from_dom(pointer_type: &str) -> Self {
        match pointer_type {
            "pen" => PointerKind::Pen,
            "touch" => PointerKind::Touch,
            _ => PointerKind::Mouse,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub client: Vec2,
    pub kind: PointerKind,
}

impl PointerInput {
    pub fn mouse(x: f32, y: f32) -> Self {
        Self {
            client: Vec2::new(x, y),
            kind: PointerKind::Mouse,
        }
    }
}

/// Client positions of the touches that changed in one touch event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchInput {
    pub changed: SmallVec<[Vec2; 2]>,
}

impl TouchInput {
    pub fn single(x: f32, y: f32) -> Self {
        let mut changed = SmallVec::new();
        changed.push(Vec2::new(x, y));
        Self { changed }
    }

    #[inline]
    pub fn first(&self) -> Option<Vec2> {
        self.changed.first().copied()
    }
}

/// Input delivered by a surface to the controls.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    PointerMove(PointerInput),
    PointerDown(PointerInput),
    PointerUp(PointerInput),
    PointerLeave(PointerInput),
    TouchStart(TouchInput),
    TouchMove(TouchInput),
    TouchEnd(TouchInput),
}

impl SurfaceEvent {
    /// DOM event type this variant is delivered from.
    pub fn dom_type(&self) -> &'static str {
        match self {
            SurfaceEvent::PointerMove(_) => "pointermove",
            SurfaceEvent::PointerDown(_) => "pointerdown",
            SurfaceEvent::PointerUp(_) => "pointerup",
            SurfaceEvent::PointerLeave(_) => "pointerleave",
            SurfaceEvent::TouchStart(_) => "touchstart",
            SurfaceEvent::TouchMove(_) => "touchmove",
            SurfaceEvent::TouchEnd(_) => "touchend",
        }
    }
}

/// Map a client-space position to normalized device coordinates (y up).
/// A degenerate rectangle maps everything to the centre.
#[inline]
pub fn client_to_ndc(client: Vec2, rect: &ClientRect) -> Vec2 {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        ((client.x - rect.left) / rect.width) * 2.0 - 1.0,
        -((client.y - rect.top) / rect.height) * 2.0 + 1.0,
    )
}
