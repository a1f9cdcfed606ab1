//! Small CPU rasterizer that turns door intents into an RGBA snapshot.
//!
//! Meant for previews and golden checks, not for an interactive host: panels are filled
//! rectangles, toys are nearest-neighbour scaled.

use std::path::Path;

use anyhow::Context;
use kurbo::{Point, Rect};

use crate::assets::toys::{ToyImage, ToyLibrary};
use crate::door::geometry::PanelLeaf;
use crate::door::intent::{DoorIntent, ToyIntent};
use crate::door::machine::DoorState;
use crate::foundation::core::Canvas;
use crate::foundation::error::AdventResult;
use crate::foundation::math::mul_div255;

pub type PremulRgba8 = [u8; 4];

/// Colors used by [`render_preview`]. All opaque, so premultiplied equals straight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewPalette {
    pub background: PremulRgba8,
    pub panel: PremulRgba8,
    pub panel_edge: PremulRgba8,
}

impl Default for PreviewPalette {
    fn default() -> Self {
        Self {
            background: [18, 20, 28, 255],
            panel: [200, 150, 80, 255],
            panel_edge: [120, 80, 40, 255],
        }
    }
}

const EDGE_PX: f64 = 2.0;

/// Premultiplied RGBA8 frame, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PreviewFrame {
    fn filled(canvas: Canvas, color: PremulRgba8) -> Self {
        let len = canvas.width as usize * canvas.height as usize;
        Self {
            width: canvas.width,
            height: canvas.height,
            data: color.repeat(len),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    fn blend(&mut self, x: u32, y: u32, src: PremulRgba8, opacity: f64) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let dst = [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ];
        self.data[i..i + 4].copy_from_slice(&over(dst, src, opacity));
    }

    /// Integer pixel range covered by `r`, clipped to the frame.
    fn clip(&self, r: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = r.x0.floor().max(0.0);
        let y0 = r.y0.floor().max(0.0);
        let x1 = r.x1.ceil().min(f64::from(self.width));
        let y1 = r.y1.ceil().min(f64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    pub fn save_png(&self, path: &Path) -> AdventResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Source-over in premultiplied space with an extra opacity multiplier.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f64) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = (opacity * 255.0).round() as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Rasterize one calendar frame.
pub fn render_preview(
    canvas: Canvas,
    intents: &[DoorIntent],
    toys: &ToyLibrary,
    palette: PreviewPalette,
) -> PreviewFrame {
    let mut frame = PreviewFrame::filled(canvas, palette.background);

    for intent in intents {
        for leaf in &intent.panel {
            fill_leaf(&mut frame, leaf, palette);
        }
        if intent.state == DoorState::Open
            && let Some(toy) = &intent.toy
            && let Some(image) = toys.get(&toy.key)
        {
            draw_toy(&mut frame, toy, image);
        }
    }

    frame
}

fn fill_leaf(frame: &mut PreviewFrame, leaf: &PanelLeaf, palette: PreviewPalette) {
    let (w, h) = (leaf.size.width, leaf.size.height);
    if w <= 0.0 || h <= 0.0 || leaf.transform.determinant().abs() < 1e-12 {
        return;
    }
    let Some((x0, y0, x1, y1)) = frame.clip(leaf.bounds()) else {
        return;
    };
    let inv = leaf.transform.inverse();

    for y in y0..y1 {
        for x in x0..x1 {
            let local = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if local.x < 0.0 || local.y < 0.0 || local.x > w || local.y > h {
                continue;
            }
            let on_edge = local.x < EDGE_PX
                || local.y < EDGE_PX
                || local.x > w - EDGE_PX
                || local.y > h - EDGE_PX;
            let color = if on_edge {
                palette.panel_edge
            } else {
                palette.panel
            };
            frame.blend(x, y, color, 1.0);
        }
    }
}

fn draw_toy(frame: &mut PreviewFrame, toy: &ToyIntent, image: &ToyImage) {
    if toy.scale <= 0.0 || toy.alpha <= 0.0 || image.width == 0 || image.height == 0 {
        return;
    }
    let half_w = f64::from(image.width) * toy.scale / 2.0;
    let half_h = f64::from(image.height) * toy.scale / 2.0;
    let dest = Rect::new(
        toy.center.x - half_w,
        toy.center.y - half_h,
        toy.center.x + half_w,
        toy.center.y + half_h,
    );
    let Some((x0, y0, x1, y1)) = frame.clip(dest) else {
        return;
    };

    for y in y0..y1 {
        for x in x0..x1 {
            let sx = ((f64::from(x) + 0.5 - dest.x0) / toy.scale).floor();
            let sy = ((f64::from(y) + 0.5 - dest.y0) / toy.scale).floor();
            if sx < 0.0 || sy < 0.0 || sx >= f64::from(image.width) || sy >= f64::from(image.height)
            {
                continue;
            }
            let i = (sy as usize * image.width as usize + sx as usize) * 4;
            let px = &image.rgba8_premul[i..i + 4];
            frame.blend(x, y, [px[0], px[1], px[2], px[3]], toy.alpha);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
