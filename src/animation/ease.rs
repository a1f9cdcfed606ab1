/// Easing curves applied to normalized progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity; used for door panels.
    Linear,
    /// Cubic back-out: overshoots 1 and settles. Used for the toy bounce.
    OutBack,
}

impl Ease {
    const BACK_C1: f64 = 1.70158;
    const BACK_C3: f64 = Self::BACK_C1 + 1.0;

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutBack => {
                let u = t - 1.0;
                1.0 + Self::BACK_C3 * u.powi(3) + Self::BACK_C1 * u.powi(2)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
