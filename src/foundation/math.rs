use kurbo::{Point, Rect};

/// Slack used when a step-accumulated progress value is compared against its endpoints.
///
/// Thirty additions of `1/30` land on `0.9999999999999999`; without slack the door would
/// need a thirty-first frame to finish.
pub(crate) const PROGRESS_EPSILON: f64 = 1e-9;

pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Inclusive containment: points on any edge count as inside.
pub(crate) fn rect_contains_inclusive(r: Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

/// `x * y / 255`, rounded to nearest.
pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
