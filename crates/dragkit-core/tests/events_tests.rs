// Host-side tests for the listener registry and shared constants.

use dragkit_core::{
    rgb_from_hex, DragEvent, DragEventKind, EventDispatcher, Object3D, Scene, CAMERA_FAR,
    CAMERA_NEAR, CLEAR_ALPHA, REFLECTOR_TEXTURE_SIZE,
};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn listeners_run_in_registration_order() {
    let mut scene = Scene::new();
    let a = scene.add(Object3D::group("a"));
    let mut d = EventDispatcher::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    for tag in 0..3 {
        let order = order.clone();
        d.add_listener(DragEventKind::DragStart, move |_, _| order.borrow_mut().push(tag));
    }
    d.dispatch(&DragEvent::DragStart(a), &mut scene);

    assert_eq!(*order.borrow(), vec![0, 1, 2]);
}

#[test]
fn only_matching_kind_is_notified() {
    let mut scene = Scene::new();
    let a = scene.add(Object3D::group("a"));
    let mut d = EventDispatcher::new();
    let hits = Rc::new(RefCell::new(0));

    let h = hits.clone();
    d.add_listener(DragEventKind::Drag, move |_, _| *h.borrow_mut() += 1);
    d.dispatch(&DragEvent::DragEnd(a), &mut scene);
    d.dispatch(&DragEvent::Drag(a), &mut scene);

    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn removed_listener_stops_receiving() {
    let mut scene = Scene::new();
    let a = scene.add(Object3D::group("a"));
    let mut d = EventDispatcher::new();
    let hits = Rc::new(RefCell::new(0));

    let h = hits.clone();
    let id = d.add_listener(DragEventKind::HoverOn, move |_, _| *h.borrow_mut() += 1);
    assert_eq!(d.listener_count(DragEventKind::HoverOn), 1);
    assert!(d.remove_listener(DragEventKind::HoverOn, id));
    assert!(!d.remove_listener(DragEventKind::HoverOn, id));
    // Wrong kind does not remove
    assert!(!d.remove_listener(DragEventKind::HoverOff, id));

    d.dispatch(&DragEvent::HoverOn(a), &mut scene);
    assert_eq!(*hits.borrow(), 0);
}

#[test]
fn event_kinds_round_trip_names() {
    for kind in DragEventKind::ALL {
        assert_eq!(DragEventKind::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(DragEventKind::parse("click"), None);
    assert_eq!(DragEventKind::DragStart.to_string(), "dragstart");
}

#[test]
fn events_carry_their_object() {
    let mut scene = Scene::new();
    let a = scene.add(Object3D::group("a"));
    let ev = DragEvent::HoverOff(a);
    assert_eq!(ev.object(), a);
    assert_eq!(ev.kind(), DragEventKind::HoverOff);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_sane() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(REFLECTOR_TEXTURE_SIZE.is_power_of_two());
    assert!((0.0..=1.0).contains(&CLEAR_ALPHA));
    let grey = rgb_from_hex(0x7f7f7f);
    assert!((grey.x - 127.0 / 255.0).abs() < 1e-6);
    assert_eq!(grey.x, grey.z);
}
