use glam::Vec2;
use crate::api::types::CandleId;

/// A candle placed on the cake.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Unique identifier.
    pub id: CandleId,
    /// Logical placement point in cake pixels (where the user clicked).
    /// This is what gets normalized into share links.
    pub pos: Vec2,
    /// Whether the flame has been blown out.
    pub extinguished: bool,
}

impl Candle {
    /// Create a lit candle at the origin.
    pub fn new(id: CandleId) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            extinguished: false,
        }
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn is_lit(&self) -> bool {
        !self.extinguished
    }

    pub fn extinguish(&mut self) {
        self.extinguished = true;
    }

    /// Top-left corner the candle is drawn at: the body sits above the
    /// placement point by `height` pixels.
    pub fn display_origin(&self, height: f32) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_candles_are_lit() {
        let c = Candle::new(CandleId(1)).with_pos(Vec2::new(5.0, 6.0));
        assert!(c.is_lit());
        assert_eq!(c.pos, Vec2::new(5.0, 6.0));
    }

    #[test]
    fn display_origin_only_shifts_vertically() {
        let c = Candle::new(CandleId(1)).with_pos(Vec2::new(100.0, 120.0));
        assert_eq!(c.display_origin(30.0), Vec2::new(100.0, 90.0));
        assert_eq!(c.pos, Vec2::new(100.0, 120.0));
    }
}
