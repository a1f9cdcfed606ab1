use std::io::Cursor;

use super::*;
use crate::door::geometry::NormalizedRect;
use crate::door::machine::Door;
use crate::door::model::{AnimationStyle, DoorId, Payload};
use crate::foundation::core::{Millis, Tick};

fn canvas() -> Canvas {
    Canvas::new(40, 40).unwrap()
}

fn door(payload: &str, style: AnimationStyle) -> Door {
    Door::new(
        DoorId::new(1).unwrap(),
        NormalizedRect {
            x: 0.25,
            y: 0.25,
            w: 0.5,
            h: 0.5,
        },
        Payload::parse(payload),
        style,
    )
}

fn red_toy_library() -> ToyLibrary {
    let img = image::RgbaImage::from_raw(4, 4, [255u8, 0, 0, 255].repeat(16)).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    let mut lib = ToyLibrary::new();
    lib.insert_bytes("star", &buf).unwrap();
    lib
}

#[test]
fn over_basics() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [200, 200, 200, 255], 0.0), dst);
    assert_eq!(over(dst, [255, 255, 255, 0], 1.0), dst);
    assert_eq!(over(dst, [255, 0, 0, 255], 1.0), [255, 0, 0, 255]);
    let half = over([0, 0, 0, 255], [255, 255, 255, 255], 0.5);
    assert!((127..=129).contains(&half[0]));
    assert_eq!(half[3], 255);
}

#[test]
fn closed_door_fills_panel_with_edge() {
    let palette = PreviewPalette::default();
    let d = door("star", AnimationStyle::Slide);
    let frame = render_preview(
        canvas(),
        &[d.intent(canvas(), &ToyLibrary::new())],
        &ToyLibrary::new(),
        palette,
    );
    assert_eq!(frame.pixel(20, 20), Some(palette.panel));
    assert_eq!(frame.pixel(10, 20), Some(palette.panel_edge));
    assert_eq!(frame.pixel(2, 2), Some(palette.background));
    assert_eq!(frame.pixel(40, 0), None);
}

#[test]
fn fully_open_toy_door_draws_toy_not_panel() {
    let toys = red_toy_library();
    let mut d = door("star", AnimationStyle::Hinge);
    d.open(None);
    for i in 0..60 {
        d.update(Tick::at(Millis(i)));
    }
    let intent = d.intent(canvas(), &toys);
    assert!(intent.panel.is_empty());
    let frame = render_preview(canvas(), &[intent], &toys, PreviewPalette::default());
    assert_eq!(frame.pixel(20, 20), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(12, 12), Some(PreviewPalette::default().background));
}

#[test]
fn fading_toy_is_blended() {
    let toys = red_toy_library();
    let mut d = door("star", AnimationStyle::Slide);
    d.open(None);
    for i in 0..60 {
        d.update(Tick::at(Millis(i)));
    }
    let fade_at = 29 + crate::door::machine::TOY_HOLD_MS;
    d.update(Tick::at(Millis(fade_at)));
    d.update(Tick::at(Millis(fade_at + crate::door::machine::TOY_FADE_MS / 2)));
    let frame = render_preview(
        canvas(),
        &[d.intent(canvas(), &toys)],
        &toys,
        PreviewPalette::default(),
    );
    let px = frame.pixel(20, 20).unwrap();
    assert!(px[0] > 100 && px[0] < 160, "{px:?}");
}

#[test]
fn save_png_round_trips_dimensions() {
    let frame = PreviewFrame::filled(canvas(), [1, 2, 3, 255]);
    let path = std::env::temp_dir().join(format!("advent_preview_{}.png", std::process::id()));
    frame.save_png(&path).unwrap();
    let back = image::open(&path).unwrap();
    assert_eq!(back.width(), 40);
    assert_eq!(back.height(), 40);
    std::fs::remove_file(&path).ok();
}
