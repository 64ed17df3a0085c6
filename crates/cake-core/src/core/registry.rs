use glam::Vec2;

use crate::api::types::CandleId;
use crate::components::candle::Candle;

/// Receives the number of lit candles whenever it may have changed.
pub trait CountObserver {
    fn count_changed(&mut self, active: usize);
}

impl<F: FnMut(usize)> CountObserver for F {
    fn count_changed(&mut self, active: usize) {
        self(active)
    }
}

/// Ordered candle storage using a flat Vec.
/// Insertion order is kept; it drives both counting and share encoding.
pub struct CandleRegistry {
    candles: Vec<Candle>,
    next_id: u32,
    observer: Option<Box<dyn CountObserver>>,
}

impl CandleRegistry {
    pub fn new() -> Self {
        Self {
            candles: Vec::with_capacity(64),
            next_id: 1,
            observer: None,
        }
    }

    /// Install the observer notified on add, clear and blow-out.
    pub fn set_observer(&mut self, observer: impl CountObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Append a lit candle at `pos`. Off-cake positions are allowed.
    pub fn add(&mut self, pos: Vec2) -> CandleId {
        let id = CandleId(self.next_id);
        self.next_id += 1;
        self.candles.push(Candle::new(id).with_pos(pos));
        log::debug!("candle {} placed at ({}, {})", id.0, pos.x, pos.y);
        self.notify();
        id
    }

    /// Number of candles still burning.
    pub fn active_count(&self) -> usize {
        self.candles.iter().filter(|c| c.is_lit()).count()
    }

    /// Remove every candle.
    pub fn clear(&mut self) {
        self.candles.clear();
        self.notify();
    }

    /// Tell the observer the current lit count.
    pub fn notify(&mut self) {
        let active = self.active_count();
        if let Some(observer) = self.observer.as_mut() {
            observer.count_changed(active);
        }
    }

    /// Iterate over candles that are still lit.
    pub fn lit_mut(&mut self) -> impl Iterator<Item = &mut Candle> {
        self.candles.iter_mut().filter(|c| c.is_lit())
    }

    /// All candles in placement order.
    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

impl Default for CandleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
