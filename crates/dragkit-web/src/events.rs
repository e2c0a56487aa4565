use crate::dom::{CanvasSurface, EventSubscription};
use dragkit_core::{
    Camera, DragControls, ObjectId, PointerInput, PointerKind, Scene, SurfaceEvent, TouchInput,
};
use glam::Vec2;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

type SharedControls<C> = Rc<RefCell<DragControls<C, CanvasSurface>>>;

const POINTER_EVENTS: [(&str, fn(PointerInput) -> SurfaceEvent); 4] = [
    ("pointermove", SurfaceEvent::PointerMove),
    ("pointerdown", SurfaceEvent::PointerDown),
    ("pointerup", SurfaceEvent::PointerUp),
    ("pointerleave", SurfaceEvent::PointerLeave),
];

const TOUCH_EVENTS: [(&str, fn(TouchInput) -> SurfaceEvent); 3] = [
    ("touchmove", SurfaceEvent::TouchMove),
    ("touchstart", SurfaceEvent::TouchStart),
    ("touchend", SurfaceEvent::TouchEnd),
];

/// Drag controls wired to a DOM element.
///
/// Listener registration lives here; the controller only sees translated
/// [`SurfaceEvent`]s. Dropping this value removes every DOM listener.
pub struct DomDragControls<C: Camera + 'static> {
    controls: SharedControls<C>,
    scene: Rc<RefCell<Scene>>,
    subscriptions: Vec<EventSubscription>,
}

impl<C: Camera + 'static> DomDragControls<C> {
    pub fn new(
        objects: Vec<ObjectId>,
        camera: C,
        element: web::HtmlElement,
        scene: Rc<RefCell<Scene>>,
    ) -> anyhow::Result<Self> {
        let controls = DragControls::new(objects, camera, CanvasSurface::new(element));
        let mut this = Self {
            controls: Rc::new(RefCell::new(controls)),
            scene,
            subscriptions: Vec::new(),
        };
        this.activate()?;
        Ok(this)
    }

    #[inline]
    pub fn controls(&self) -> &SharedControls<C> {
        &self.controls
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Register the DOM listeners. Does nothing when already registered.
    pub fn activate(&mut self) -> anyhow::Result<()> {
        if self.is_active() {
            return Ok(());
        }
        let target: web::EventTarget = self.controls.borrow().surface().element().clone().into();

        let mut subscriptions = Vec::with_capacity(POINTER_EVENTS.len() + TOUCH_EVENTS.len());
        for (kind, make) in POINTER_EVENTS {
            let (controls, scene) = (self.controls.clone(), self.scene.clone());
            subscriptions.push(EventSubscription::new(&target, kind, move |event| {
                event.prevent_default();
                if let Some(input) = pointer_input(&event) {
                    forward(&controls, &scene, &make(input));
                }
            })?);
        }
        for (kind, make) in TOUCH_EVENTS {
            let (controls, scene) = (self.controls.clone(), self.scene.clone());
            subscriptions.push(EventSubscription::with_passive(&target, kind, false, move |event| {
                event.prevent_default();
                if let Some(input) = touch_input(&event) {
                    forward(&controls, &scene, &make(input));
                }
            })?);
        }

        self.subscriptions = subscriptions;
        self.controls.borrow_mut().activate();
        log::debug!("[drag] {} DOM listeners registered", self.subscriptions.len());
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.subscriptions.clear();
        if let Ok(mut controls) = self.controls.try_borrow_mut() {
            controls.deactivate();
        }
    }

    pub fn dispose(&mut self) {
        self.deactivate();
    }
}

fn forward<C: Camera>(
    controls: &SharedControls<C>,
    scene: &Rc<RefCell<Scene>>,
    event: &SurfaceEvent,
) {
    match (controls.try_borrow_mut(), scene.try_borrow_mut()) {
        (Ok(mut controls), Ok(mut scene)) => controls.handle(&mut scene, event),
        _ => log::warn!("[drag] {} dropped: controls busy", event.dom_type()),
    }
}

fn pointer_input(event: &web::Event) -> Option<PointerInput> {
    let e = event.dyn_ref::<web::PointerEvent>()?;
    Some(PointerInput {
        client: Vec2::new(e.client_x() as f32, e.client_y() as f32),
        kind: PointerKind::from_dom(&e.pointer_type()),
    })
}

fn touch_input(event: &web::Event) -> Option<TouchInput> {
    let e = event.dyn_ref::<web::TouchEvent>()?;
    let list = e.changed_touches();
    let changed: SmallVec<[Vec2; 2]> = (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
        .collect();
    Some(TouchInput { changed })
}
