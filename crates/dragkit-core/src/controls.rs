//! Pointer drag controls.
//!
//! [`DragControls`] hit-tests a candidate set of scene objects under the
//! pointer and moves the picked object across a camera-facing plane. Input
//! arrives through [`DragControls::handle`]; lifecycle notifications go to
//! listeners registered with [`DragControls::add_event_listener`].
//!
//! Touch input follows the same select/drag/release path as the mouse but
//! never produces hover events, since a touch has no resting position.

use crate::camera::Camera;
use crate::events::{DragEvent, DragEventKind, EventDispatcher, ListenerId};
use crate::math::Plane;
use crate::raycast::{Intersection, Raycaster};
use crate::scene::{ObjectId, Scene};
use crate::surface::{client_to_ndc, Cursor, InputSurface, PointerKind, SurfaceEvent};
use glam::{Mat4, Vec2, Vec3};

pub struct DragControls<C, S> {
    /// When false a press still selects, but the selection does not follow
    /// the pointer. `drag` events keep firing.
    pub enabled: bool,
    /// When true the first candidate is always the one moved, whichever
    /// candidate was hit.
    pub transform_group: bool,

    objects: Vec<ObjectId>,
    camera: C,
    surface: S,
    dispatcher: EventDispatcher,
    active: bool,
    cursor: Cursor,

    raycaster: Raycaster,
    plane: Plane,
    pointer: Vec2,
    offset: Vec3,
    inverse_matrix: Mat4,
    intersections: Vec<Intersection>,
    selected: Option<ObjectId>,
    hovered: Option<ObjectId>,
}

impl<C: Camera, S: InputSurface> DragControls<C, S> {
    /// Create the controls and start listening straight away.
    pub fn new(objects: Vec<ObjectId>, camera: C, surface: S) -> Self {
        let mut controls = Self {
            enabled: true,
            transform_group: false,
            objects,
            camera,
            surface,
            dispatcher: EventDispatcher::new(),
            active: false,
            cursor: Cursor::Default,
            raycaster: Raycaster::default(),
            plane: Plane::default(),
            pointer: Vec2::ZERO,
            offset: Vec3::ZERO,
            inverse_matrix: Mat4::IDENTITY,
            intersections: Vec::new(),
            selected: None,
            hovered: None,
        };
        controls.activate();
        controls
    }

    /// Start accepting input. Calling this while already active is a no-op,
    /// so every input event is handled once.
    pub fn activate(&mut self) {
        if self.active {
            log::trace!("[drag] activate ignored, already active");
            return;
        }
        self.active = true;
    }

    /// Stop accepting input and clear the cursor style. Selection and hover
    /// are left as they are and no `dragend` is emitted.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.set_cursor(Cursor::Default);
    }

    pub fn dispose(&mut self) {
        self.deactivate();
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    /// Live candidate list; edits apply to the next hit-test.
    pub fn objects_mut(&mut self) -> &mut Vec<ObjectId> {
        &mut self.objects
    }

    #[inline]
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    #[inline]
    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Last pointer position in normalized device coordinates.
    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn add_event_listener(
        &mut self,
        kind: DragEventKind,
        listener: impl FnMut(&DragEvent, &mut Scene) + 'static,
    ) -> ListenerId {
        self.dispatcher.add_listener(kind, listener)
    }

    pub fn remove_event_listener(&mut self, kind: DragEventKind, id: ListenerId) -> bool {
        self.dispatcher.remove_listener(kind, id)
    }

    pub fn has_event_listener(&self, kind: DragEventKind, id: ListenerId) -> bool {
        self.dispatcher.has_listener(kind, id)
    }

    /// Route one surface event. Ignored while inactive. Pointer events from
    /// touch contacts are left to the touch path.
    pub fn handle(&mut self, scene: &mut Scene, event: &SurfaceEvent) {
        if !self.active {
            return;
        }
        match event {
            SurfaceEvent::PointerMove(p) if p.kind != PointerKind::Touch => {
                self.on_mouse_move(scene, p.client)
            }
            SurfaceEvent::PointerDown(p) if p.kind != PointerKind::Touch => {
                self.on_mouse_down(scene, p.client)
            }
            SurfaceEvent::PointerUp(p) | SurfaceEvent::PointerLeave(p)
                if p.kind != PointerKind::Touch =>
            {
                self.on_mouse_cancel(scene)
            }
            SurfaceEvent::TouchStart(t) => {
                if let Some(client) = t.first() {
                    self.on_touch_start(scene, client);
                }
            }
            SurfaceEvent::TouchMove(t) => {
                if let Some(client) = t.first() {
                    self.on_touch_move(scene, client);
                }
            }
            SurfaceEvent::TouchEnd(_) => self.on_touch_end(scene),
            _ => {}
        }
    }

    fn on_mouse_move(&mut self, scene: &mut Scene, client: Vec2) {
        self.update_pointer(client);

        if self.drag_selected(scene) {
            return;
        }

        self.hit_test(scene);

        if let Some(hit) = self.intersections.first().copied() {
            let object = hit.object;
            self.plane = Plane::from_normal_and_coplanar_point(
                self.camera.world_direction(),
                scene.world_position(object),
            );

            if self.hovered != Some(object) {
                if let Some(previous) = self.hovered.take() {
                    self.emit(scene, DragEvent::HoverOff(previous));
                }
                self.emit(scene, DragEvent::HoverOn(object));
                self.set_cursor(Cursor::Pointer);
                self.hovered = Some(object);
            }
        } else if let Some(previous) = self.hovered.take() {
            self.emit(scene, DragEvent::HoverOff(previous));
            self.set_cursor(Cursor::Auto);
        }
    }

    fn on_mouse_down(&mut self, scene: &mut Scene, client: Vec2) {
        self.update_pointer(client);
        self.select(scene);
    }

    fn on_mouse_cancel(&mut self, scene: &mut Scene) {
        self.release(scene);
        let cursor = if self.hovered.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Auto
        };
        self.set_cursor(cursor);
    }

    fn on_touch_start(&mut self, scene: &mut Scene, client: Vec2) {
        self.update_pointer(client);
        self.select(scene);
    }

    fn on_touch_move(&mut self, scene: &mut Scene, client: Vec2) {
        self.update_pointer(client);
        self.drag_selected(scene);
    }

    fn on_touch_end(&mut self, scene: &mut Scene) {
        self.release(scene);
        self.set_cursor(Cursor::Auto);
    }

    fn update_pointer(&mut self, client: Vec2) {
        let rect = self.surface.bounding_rect();
        self.pointer = client_to_ndc(client, &rect);
        self.raycaster.set_from_camera(self.pointer, &self.camera);
    }

    fn hit_test(&mut self, scene: &Scene) {
        self.intersections.clear();
        self.raycaster
            .intersect_objects(scene, &self.objects, true, &mut self.intersections);
    }

    /// Move the selection to the pointer ray's plane hit. Returns whether a
    /// selection exists, in which case hover evaluation is skipped.
    fn drag_selected(&mut self, scene: &mut Scene) -> bool {
        let Some(selected) = self.selected else {
            return false;
        };

        if self.enabled {
            if let Some(point) = self.raycaster.ray.intersect_plane(&self.plane) {
                let local = self.inverse_matrix.transform_point3(point - self.offset);
                scene.set_position(selected, local);
            }
        }

        self.emit(scene, DragEvent::Drag(selected));
        true
    }

    fn select(&mut self, scene: &mut Scene) {
        self.hit_test(scene);

        let Some(hit) = self.intersections.first().copied() else {
            return;
        };
        let selected = if self.transform_group {
            self.objects.first().copied().unwrap_or(hit.object)
        } else {
            hit.object
        };
        self.selected = Some(selected);

        let world_position = scene.world_position(selected);
        self.plane =
            Plane::from_normal_and_coplanar_point(self.camera.world_direction(), world_position);

        // Without a parent the cached transform and offset keep their old values
        let point = self.raycaster.ray.intersect_plane(&self.plane);
        if let (Some(point), Some(parent)) = (point, scene.parent(selected)) {
            self.inverse_matrix = scene.world_matrix(parent).inverse();
            self.offset = point - world_position;
        }

        self.set_cursor(Cursor::Move);
        log::debug!("[drag] start on {:?}", selected);
        self.emit(scene, DragEvent::DragStart(selected));
    }

    fn release(&mut self, scene: &mut Scene) {
        if let Some(selected) = self.selected.take() {
            log::debug!("[drag] end on {:?}", selected);
            self.emit(scene, DragEvent::DragEnd(selected));
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.surface.set_cursor(cursor);
    }

    #[inline]
    fn emit(&mut self, scene: &mut Scene, event: DragEvent) {
        self.dispatcher.dispatch(&event, scene);
    }
}
