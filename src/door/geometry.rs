use std::f64::consts::{FRAC_PI_2, PI};

use kurbo::{Affine, Rect, Size, Vec2};

use crate::door::model::AnimationStyle;
use crate::foundation::core::Canvas;

/// Extra travel added to each leaf of a double door so it clears the frame completely.
pub const DOUBLE_LEAF_MARGIN_PX: f64 = 6.0;
/// Smallest gap between the two leaves of a double door.
pub const DOUBLE_MIN_GAP_PX: f64 = 2.0;
/// Gap between double-door leaves as a fraction of the door width.
pub const DOUBLE_GAP_FRACTION: f64 = 0.02;

/// Door rectangle in canvas fractions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl NormalizedRect {
    pub fn to_pixels(self, canvas: Canvas) -> Rect {
        let cw = canvas.width_f64();
        let ch = canvas.height_f64();
        let x0 = self.x * cw;
        let y0 = self.y * ch;
        Rect::new(x0, y0, x0 + self.w * cw, y0 + self.h * ch)
    }
}

/// One rigid panel piece: a `size` rectangle anchored at the local origin, placed by `transform`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PanelLeaf {
    pub size: Size,
    pub transform: Affine,
}

impl PanelLeaf {
    /// Axis-aligned bounds after transformation.
    pub fn bounds(&self) -> Rect {
        self.transform
            .transform_rect_bbox(Rect::from_origin_size((0.0, 0.0), self.size))
    }
}

/// Split width of a double door: `(leaf_width, gap)`.
pub fn double_leaf_split(width: f64) -> (f64, f64) {
    let gap = DOUBLE_MIN_GAP_PX.max(DOUBLE_GAP_FRACTION * width);
    let leaf = ((width - gap) / 2.0).max(0.0);
    (leaf, gap)
}

/// Panel pieces for a door at pixel bounds `rect` with opening progress `t` in `[0, 1]`.
///
/// `t = 0` is the closed pose for every style.
pub fn panel_leaves(style: AnimationStyle, rect: Rect, t: f64) -> Vec<PanelLeaf> {
    let (x, y) = (rect.x0, rect.y0);
    let (w, h) = (rect.width(), rect.height());
    let size = Size::new(w, h);

    let single = |transform: Affine| vec![PanelLeaf { size, transform }];

    match style {
        AnimationStyle::Slide => single(Affine::translate(Vec2::new(x + w * t, y))),
        AnimationStyle::Hinge => {
            single(Affine::translate(Vec2::new(x, y)) * Affine::rotate(-FRAC_PI_2 * t))
        }
        AnimationStyle::Fold => {
            single(Affine::translate(Vec2::new(x, y)) * Affine::scale_non_uniform(1.0 - t, 1.0))
        }
        AnimationStyle::Fall => single(
            Affine::translate(Vec2::new(x, y + t * 3.0 * h)) * Affine::rotate(t * PI),
        ),
        AnimationStyle::Double => {
            let (leaf_w, gap) = double_leaf_split(w);
            let offset = t * (leaf_w + gap + DOUBLE_LEAF_MARGIN_PX);
            let leaf = Size::new(leaf_w, h);
            vec![
                PanelLeaf {
                    size: leaf,
                    transform: Affine::translate(Vec2::new(x - offset, y)),
                },
                PanelLeaf {
                    size: leaf,
                    transform: Affine::translate(Vec2::new(x + leaf_w + gap + offset, y)),
                },
            ]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/door/geometry.rs"]
mod tests;
