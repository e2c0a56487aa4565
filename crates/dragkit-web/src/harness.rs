//! Minimal scene harness: canvas, camera, scene, renderer and a frame loop.

use crate::dom::{canvas_aspect, sync_canvas_to_window, window_document, EventSubscription};
use crate::reflector::MirrorPass;
use crate::render::GpuState;
use dragkit_core::{
    ObjectId, PerspectiveCamera, Reflector, Scene, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR,
    CAMERA_START, CANVAS_ID,
};
use glam::Vec3;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Debug)]
pub struct UseThreeOptions {
    pub canvas_id: String,
}

impl Default for UseThreeOptions {
    fn default() -> Self {
        Self {
            canvas_id: CANVAS_ID.to_string(),
        }
    }
}

/// What a per-frame callback may touch.
pub struct FrameState<'a> {
    pub scene: &'a mut Scene,
    pub camera: &'a mut PerspectiveCamera,
    /// Seconds since the loop started.
    pub elapsed: f32,
}

/// Per-frame callback, given the frame state and the seconds since the last frame.
pub type UseFrame = Box<dyn FnMut(&mut FrameState<'_>, f32)>;

pub struct Clock {
    start: Instant,
    last: Instant,
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Seconds since the previous call (or since creation).
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt.as_secs_f32()
    }

    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Three {
    pub canvas: web::HtmlCanvasElement,
    pub camera: Rc<RefCell<PerspectiveCamera>>,
    pub scene: Rc<RefCell<Scene>>,
    renderer: Rc<RefCell<GpuState>>,
    mirrors: RefCell<Vec<MirrorPass>>,
    _resize: EventSubscription,
}

/// Look up the canvas, size it to the window and set up camera, scene and
/// renderer. The window resize listener lives as long as the returned value.
pub async fn use_three(options: UseThreeOptions) -> anyhow::Result<Rc<Three>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(&options.canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", options.canvas_id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    sync_canvas_to_window(&canvas);

    let mut camera = PerspectiveCamera::new(
        CAMERA_FOV_DEG,
        canvas_aspect(&canvas),
        CAMERA_NEAR,
        CAMERA_FAR,
    );
    camera.eye = CAMERA_START;
    camera.look_at(Vec3::ZERO);
    let camera = Rc::new(RefCell::new(camera));

    let renderer = Rc::new(RefCell::new(GpuState::new(&canvas).await?));

    let resize = {
        let (canvas, camera, renderer) = (canvas.clone(), camera.clone(), renderer.clone());
        EventSubscription::new(window.as_ref(), "resize", move |_| {
            let Some((width, height)) = sync_canvas_to_window(&canvas) else {
                return;
            };
            if let Ok(mut camera) = camera.try_borrow_mut() {
                camera.set_aspect(width as f32 / height as f32);
            }
            if let Ok(mut renderer) = renderer.try_borrow_mut() {
                renderer.resize_if_needed(width, height);
            }
        })?
    };

    log::info!(
        "[harness] ready on #{} ({}x{})",
        options.canvas_id,
        canvas.width(),
        canvas.height()
    );

    Ok(Rc::new(Three {
        canvas,
        camera,
        scene: Rc::new(RefCell::new(Scene::new())),
        renderer,
        mirrors: RefCell::new(Vec::new()),
        _resize: resize,
    }))
}

impl Three {
    /// Give a reflector its render target. Reflections render before the
    /// main pass each frame.
    pub fn add_reflector(&self, reflector: impl Into<Reflector>) -> ObjectId {
        let reflector = reflector.into();
        let object = reflector.object();
        let target = self.renderer.borrow().create_reflector_target(&reflector);
        self.mirrors.borrow_mut().push(MirrorPass { reflector, target });
        object
    }

    pub fn render(&self) {
        let scene = self.scene.borrow();
        let camera = self.camera.borrow();
        let mut renderer = self.renderer.borrow_mut();

        for pass in self.mirrors.borrow_mut().iter_mut() {
            if let Some(view) = pass.reflector.update(&scene, &*camera) {
                let mirror = pass.reflector.object();
                renderer.render_reflection(&mut pass.target, &scene, &view, mirror);
            }
        }

        match renderer.render(&scene, &*camera) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => log::error!("[gpu] out of memory"),
            Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
        }
    }

    /// Run the requestAnimationFrame loop: `use_frame` first, then render.
    pub fn start(self: &Rc<Self>, use_frame: Option<UseFrame>) {
        let three = self.clone();
        let mut use_frame = use_frame;
        let mut clock = Clock::new();

        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let tick_clone = tick.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let delta = clock.delta();
            if let Some(frame) = use_frame.as_mut() {
                let mut scene = three.scene.borrow_mut();
                let mut camera = three.camera.borrow_mut();
                let mut state = FrameState {
                    scene: &mut scene,
                    camera: &mut camera,
                    elapsed: clock.elapsed(),
                };
                frame(&mut state, delta);
            }
            three.render();
            request_frame(&tick_clone);
        }) as Box<dyn FnMut()>));
        request_frame(&tick);
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let callback: &js_sys::Function = cb.as_ref().unchecked_ref();
        let _ = w.request_animation_frame(callback);
    }
}
