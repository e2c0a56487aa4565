use dragkit_core::{ClientRect, Cursor, InputSurface};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Size the canvas backing store to the window times devicePixelRatio.
/// Returns the new (width, height) in device pixels.
pub fn sync_canvas_to_window(canvas: &web::HtmlCanvasElement) -> Option<(u32, u32)> {
    let w = web::window()?;
    let dpr = w.device_pixel_ratio();
    let css_w = w.inner_width().ok()?.as_f64()?;
    let css_h = w.inner_height().ok()?.as_f64()?;
    let w_px = ((css_w * dpr) as u32).max(1);
    let h_px = ((css_h * dpr) as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    Some((w_px, h_px))
}

#[inline]
pub fn canvas_aspect(canvas: &web::HtmlCanvasElement) -> f32 {
    canvas.width().max(1) as f32 / canvas.height().max(1) as f32
}

/// A DOM listener that stays registered for as long as this value lives.
pub struct EventSubscription {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventSubscription {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("add {} listener: {:?}", kind, e))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    /// Register with an explicit `passive` flag. Touch handlers that call
    /// `preventDefault` need `passive: false`.
    pub fn with_passive(
        target: &web::EventTarget,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| anyhow::anyhow!("add {} listener: {:?}", kind, e))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    #[inline]
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Input surface backed by a DOM element.
#[derive(Clone)]
pub struct CanvasSurface {
    element: web::HtmlElement,
}

impl CanvasSurface {
    pub fn new(element: web::HtmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &web::HtmlElement {
        &self.element
    }
}

impl InputSurface for CanvasSurface {
    fn bounding_rect(&self) -> ClientRect {
        let r = self.element.get_bounding_client_rect();
        ClientRect::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        )
    }

    fn set_cursor(&self, cursor: Cursor) {
        let _ = self.element.style().set_property("cursor", cursor.as_css());
    }
}
