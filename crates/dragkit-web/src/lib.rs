#![cfg(target_arch = "wasm32")]
pub mod dom;
pub mod events;
pub mod harness;
pub mod reflector;
pub mod render;

use dragkit_core::{
    DragEventKind, Geometry, Object3D, ReflectorOptions, ReflectorRtt, DRAG_EMISSIVE,
    HOVER_EMISSIVE,
};
use events::DomDragControls;
use glam::{Quat, Vec3};
use harness::{use_three, UseFrame, UseThreeOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("dragkit-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let three = use_three(UseThreeOptions::default()).await?;

    let (candidates, orbit, moon) = {
        let mut scene = three.scene.borrow_mut();
        let cube = scene.add(
            Object3D::mesh("cube", Geometry::cuboid(1.0, 1.0, 1.0))
                .with_position(Vec3::new(-1.5, 0.0, 0.0))
                .with_color(Vec3::new(0.9, 0.3, 0.3)),
        );
        let ball = scene.add(
            Object3D::mesh("ball", Geometry::sphere(0.5)).with_color(Vec3::new(0.3, 0.8, 0.4)),
        );
        let orbit = scene.add(Object3D::group("orbit").with_position(Vec3::new(1.5, 0.0, 0.0)));
        let moon = scene.add(
            Object3D::mesh("moon", Geometry::sphere(0.3))
                .with_position(Vec3::new(0.6, 0.0, 0.0))
                .with_color(Vec3::new(0.3, 0.5, 0.9)),
        );
        scene.add_child(orbit, moon)?;

        let floor = ReflectorRtt::new(
            &mut scene,
            Geometry::quad(8.0, 8.0),
            ReflectorOptions::default(),
        );
        if let Some(o) = scene.get_mut(floor.object()) {
            o.position = Vec3::new(0.0, -2.0, 0.0);
            o.rotation = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);
        }
        drop(scene);
        three.add_reflector(floor);

        (vec![cube, ball, moon], orbit, moon)
    };

    let element: web_sys::HtmlElement = three.canvas.clone().into();
    let drag = DomDragControls::new(candidates, three.camera.clone(), element, three.scene.clone())?;
    {
        let mut controls = drag.controls().borrow_mut();
        let highlights = [
            (DragEventKind::HoverOn, HOVER_EMISSIVE),
            (DragEventKind::HoverOff, Vec3::ZERO),
            (DragEventKind::DragStart, DRAG_EMISSIVE),
            (DragEventKind::DragEnd, Vec3::ZERO),
        ];
        for (kind, emissive) in highlights {
            controls.add_event_listener(kind, move |event, scene| {
                if let Some(o) = scene.get_mut(event.object()) {
                    o.emissive = emissive;
                }
            });
        }
    }

    let use_frame: UseFrame = Box::new(move |state, delta| {
        // The orbit holds still while its moon is being dragged
        if drag.controls().borrow().selected() == Some(moon) {
            return;
        }
        if let Some(o) = state.scene.get_mut(orbit) {
            o.rotation *= Quat::from_rotation_z(delta * 0.8);
        }
    });
    three.start(Some(use_frame));

    Ok(())
}
