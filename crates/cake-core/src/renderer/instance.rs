use bytemuck::{Pod, Zeroable};

use crate::components::candle::Candle;

/// Per-candle data read by the page's JS renderer straight out of wasm memory.
/// Must match the JS side: 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CandleInstance {
    /// Left edge of the candle body, cake pixels.
    pub x: f32,
    /// Top edge of the candle body (placement point minus candle height).
    pub y: f32,
    /// 1.0 while the flame burns, 0.0 once blown out.
    pub lit: f32,
    /// Candle body height in pixels.
    pub height: f32,
}

impl CandleInstance {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_candle(candle: &Candle, height: f32) -> Self {
        let origin = candle.display_origin(height);
        Self {
            x: origin.x,
            y: origin.y,
            lit: if candle.is_lit() { 1.0 } else { 0.0 },
            height,
        }
    }
}

/// Candle instances in placement order.
pub struct CandleBuffer {
    pub instances: Vec<CandleInstance>,
}

impl CandleBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
        }
    }

    /// Refill from the current candles.
    pub fn rebuild<'a>(&mut self, candles: impl IntoIterator<Item = &'a Candle>, height: f32) {
        self.instances.clear();
        self.instances
            .extend(candles.into_iter().map(|c| CandleInstance::from_candle(c, height)));
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Flat float view, `FLOATS` per candle.
    #[cfg(test)]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for zero-copy reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for CandleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::CandleId;
    use glam::Vec2;

    #[test]
    fn candle_instance_is_4_floats() {
        assert_eq!(std::mem::size_of::<CandleInstance>(), 16);
        assert_eq!(CandleInstance::STRIDE_BYTES, 16);
    }

    #[test]
    fn rebuild_uses_display_origin_and_lit_flag() {
        let lit = Candle::new(CandleId(1)).with_pos(Vec2::new(100.0, 120.0));
        let mut out = Candle::new(CandleId(2)).with_pos(Vec2::new(50.0, 40.0));
        out.extinguish();

        let mut buf = CandleBuffer::new();
        buf.rebuild([&lit, &out], 30.0);
        assert_eq!(buf.instance_count(), 2);
        let want: [f32; 8] = [100.0, 90.0, 1.0, 30.0, 50.0, 10.0, 0.0, 30.0];
        assert_eq!(buf.as_floats(), &want[..]);
    }

    #[test]
    fn rebuild_replaces_previous_contents() {
        let c = Candle::new(CandleId(1));
        let mut buf = CandleBuffer::new();
        buf.rebuild([&c, &c, &c], 30.0);
        buf.rebuild([&c], 30.0);
        assert_eq!(buf.instance_count(), 1);
    }
}
