use kurbo::{Point, Rect};

use crate::animation::ease::Ease;
use crate::assets::toys::ToyCatalog;
use crate::door::geometry::{PanelLeaf, panel_leaves};
use crate::door::machine::{Door, DoorState};
use crate::door::model::{AnimationStyle, DoorId};
use crate::foundation::core::Canvas;

/// Everything a renderer needs to draw one door for the current frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DoorIntent {
    pub id: DoorId,
    pub state: DoorState,
    pub style: AnimationStyle,
    pub anim_progress: f64,
    /// Door frame in pixels.
    pub bounds: Rect,
    /// Panel pieces to draw; empty once the door is fully open.
    pub panel: Vec<PanelLeaf>,
    pub toy: Option<ToyIntent>,
}

/// Revealed toy: drawn centered on the door, scaled and faded.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ToyIntent {
    pub key: String,
    pub center: Point,
    pub progress: f64,
    pub scale: f64,
    pub alpha: f64,
}

impl Door {
    /// Render intent for the current state. Toys missing from `toys` are left out.
    pub fn intent(&self, canvas: Canvas, toys: &dyn ToyCatalog) -> DoorIntent {
        let bounds = self.pixel_rect(canvas);
        let state = self.state();

        let panel = match state {
            DoorState::Open => Vec::new(),
            DoorState::Closed | DoorState::Opening | DoorState::Closing => panel_leaves(
                self.style(),
                bounds,
                Ease::Linear.apply(self.anim_progress()),
            ),
        };

        let toy = match (state, self.payload().toy_key()) {
            (DoorState::Open, Some(key)) if toys.has_toy(key) => Some(ToyIntent {
                key: key.to_string(),
                center: bounds.center(),
                progress: self.toy_progress(),
                scale: Ease::OutBack.apply(self.toy_progress()),
                alpha: self.toy_alpha(),
            }),
            _ => None,
        };

        DoorIntent {
            id: self.id(),
            state,
            style: self.style(),
            anim_progress: self.anim_progress(),
            bounds,
            panel,
            toy,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/door/intent.rs"]
mod tests;
