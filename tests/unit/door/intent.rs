use std::collections::BTreeSet;

use super::*;
use crate::door::geometry::NormalizedRect;
use crate::door::model::Payload;
use crate::foundation::core::{Millis, Tick};

fn door(payload: &str, style: AnimationStyle) -> Door {
    Door::new(
        DoorId::new(2).unwrap(),
        NormalizedRect {
            x: 0.1,
            y: 0.1,
            w: 0.2,
            h: 0.2,
        },
        Payload::parse(payload),
        style,
    )
}

fn canvas() -> Canvas {
    Canvas::new(500, 500).unwrap()
}

fn toys(keys: &[&str]) -> BTreeSet<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

fn open_fully(d: &mut Door) {
    d.open(None);
    for i in 0..30 {
        d.update(Tick::at(Millis(i)));
    }
}

#[test]
fn closed_door_draws_closed_panel() {
    let d = door("star", AnimationStyle::Slide);
    let intent = d.intent(canvas(), &toys(&["star"]));
    assert_eq!(intent.state, DoorState::Closed);
    assert_eq!(intent.panel.len(), 1);
    assert_eq!(intent.panel[0].bounds(), intent.bounds);
    assert!(intent.toy.is_none());
}

#[test]
fn double_door_has_two_leaves_while_animating() {
    let mut d = door("star", AnimationStyle::Double);
    d.open(None);
    d.update(Tick::at(Millis(0)));
    let intent = d.intent(canvas(), &toys(&[]));
    assert_eq!(intent.state, DoorState::Opening);
    assert_eq!(intent.panel.len(), 2);
}

#[test]
fn open_toy_door_reports_bounce_and_alpha() {
    let mut d = door("star", AnimationStyle::Hinge);
    open_fully(&mut d);
    d.update(Tick::at(Millis(100)));
    let intent = d.intent(canvas(), &toys(&["star"]));
    assert!(intent.panel.is_empty());
    let toy = intent.toy.unwrap();
    assert_eq!(toy.key, "star");
    assert_eq!(toy.center, intent.bounds.center());
    assert!((toy.progress - 1.0 / 30.0).abs() < 1e-9);
    assert_eq!(toy.scale, Ease::OutBack.apply(toy.progress));
    assert_eq!(toy.alpha, 1.0);
}

#[test]
fn missing_toy_image_skips_toy() {
    let mut d = door("star", AnimationStyle::Slide);
    open_fully(&mut d);
    let intent = d.intent(canvas(), &toys(&["bear"]));
    assert_eq!(intent.state, DoorState::Open);
    assert!(intent.toy.is_none());
}

#[test]
fn video_door_never_carries_toy() {
    let mut d = door("mp4:v.mp4", AnimationStyle::Slide);
    open_fully(&mut d);
    let intent = d.intent(canvas(), &toys(&["mp4:v.mp4", "v.mp4"]));
    assert_eq!(intent.state, DoorState::Open);
    assert!(intent.toy.is_none());
    assert!(intent.panel.is_empty());
}

#[test]
fn intent_serializes_to_json() {
    let d = door("star", AnimationStyle::Fall);
    let v = serde_json::to_value(d.intent(canvas(), &toys(&[]))).unwrap();
    assert_eq!(v["id"], 2);
    assert_eq!(v["state"], "closed");
    assert_eq!(v["style"], "fall");
}
