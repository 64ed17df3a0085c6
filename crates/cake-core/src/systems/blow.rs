//! Microphone blow-out detection.
//!
//! While listening, each tick reads the current frequency spectrum, takes
//! the mean bin amplitude, and if it is above the threshold gives every lit
//! candle its own chance to go out.

use crate::api::config::WidgetConfig;
use crate::core::registry::CandleRegistry;
use crate::error::AudioError;
use crate::systems::rng::RandomSource;

/// A live amplitude spectrum, one byte (0-255) per frequency bin.
pub trait AmplitudeSource {
    /// Fill `bins` with the latest spectrum. Extra bins are left untouched.
    fn frequency_data(&mut self, bins: &mut [u8]);
}

/// Lifecycle of the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// No audio source yet, or access failed. Blow-out is inactive.
    Uninitialized,
    /// Sampling on every tick.
    Listening,
    /// Explicitly stopped by the host.
    Stopped,
}

pub struct BlowDetector {
    state: DetectorState,
    source: Option<Box<dyn AmplitudeSource>>,
    bins: Vec<u8>,
    threshold: f32,
    probability: f32,
}

impl BlowDetector {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            state: DetectorState::Uninitialized,
            source: None,
            bins: vec![0; config.bin_count()],
            threshold: config.blow_threshold,
            probability: config.extinguish_probability,
        }
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == DetectorState::Listening
    }

    /// Attach the granted audio source and begin listening.
    pub fn start(&mut self, source: impl AmplitudeSource + 'static) {
        self.source = Some(Box::new(source));
        self.state = DetectorState::Listening;
        log::info!("blow detector listening ({} bins)", self.bins.len());
    }

    /// Record that audio could not be acquired. Blow-out stays off; no retry.
    pub fn fail(&mut self, err: &AudioError) {
        log::warn!("unable to access microphone: {err}");
    }

    /// Stop sampling and release the source.
    pub fn stop(&mut self) {
        if self.state == DetectorState::Listening {
            log::info!("blow detector stopped");
        }
        self.source = None;
        self.state = DetectorState::Stopped;
    }

    /// Mean amplitude of the current spectrum, or `None` when not listening.
    pub fn sample_level(&mut self) -> Option<f32> {
        if self.state != DetectorState::Listening {
            return None;
        }
        let source = self.source.as_mut()?;
        source.frequency_data(&mut self.bins);
        if self.bins.is_empty() {
            return Some(0.0);
        }
        let sum: u32 = self.bins.iter().map(|&b| b as u32).sum();
        Some(sum as f32 / self.bins.len() as f32)
    }

    /// Run one sampling tick. Returns how many candles went out.
    /// The registry observer fires once if any did.
    pub fn tick(&mut self, registry: &mut CandleRegistry, rng: &mut impl RandomSource) -> usize {
        let Some(level) = self.sample_level() else {
            return 0;
        };
        if level <= self.threshold {
            return 0;
        }

        let mut blown = 0;
        for candle in registry.lit_mut() {
            if rng.next_f32() < self.probability {
                candle.extinguish();
                blown += 1;
            }
        }

        if blown > 0 {
            log::debug!("blow at level {level:.1} put out {blown} candle(s)");
            registry.notify();
        }
        blown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::rng::Rng;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Every bin reads the same level.
    struct FixedLevel(u8);

    impl AmplitudeSource for FixedLevel {
        fn frequency_data(&mut self, bins: &mut [u8]) {
            bins.fill(self.0);
        }
    }

    /// Replays a fixed list of draws, cycling.
    struct Scripted {
        draws: Vec<f32>,
        next: usize,
    }

    impl RandomSource for Scripted {
        fn next_f32(&mut self) -> f32 {
            let d = self.draws[self.next % self.draws.len()];
            self.next += 1;
            d
        }
    }

    fn cake(n: usize) -> CandleRegistry {
        let mut reg = CandleRegistry::new();
        for i in 0..n {
            reg.add(Vec2::new(i as f32 * 10.0, 100.0));
        }
        reg
    }

    #[test]
    fn uninitialized_detector_does_nothing() {
        let mut det = BlowDetector::new(&WidgetConfig::default());
        let mut reg = cake(4);
        let mut rng = Rng::new(1);
        assert_eq!(det.state(), DetectorState::Uninitialized);
        assert_eq!(det.tick(&mut reg, &mut rng), 0);
        assert_eq!(reg.active_count(), 4);
    }

    #[test]
    fn failure_keeps_detector_uninitialized() {
        let mut det = BlowDetector::new(&WidgetConfig::default());
        det.fail(&AudioError::PermissionDenied("NotAllowedError".into()));
        assert_eq!(det.state(), DetectorState::Uninitialized);
        assert_eq!(det.sample_level(), None);
    }

    #[test]
    fn mean_level_over_bins() {
        let mut det = BlowDetector::new(&WidgetConfig::default());
        det.start(FixedLevel(40));
        assert_eq!(det.sample_level(), Some(40.0));
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut det = BlowDetector::new(&WidgetConfig::default());
        det.start(FixedLevel(40));
        let mut reg = cake(3);
        let mut rng = Scripted { draws: vec![0.0], next: 0 };
        assert_eq!(det.tick(&mut reg, &mut rng), 0);
        assert_eq!(reg.active_count(), 3);
    }

    #[test]
    fn silence_never_lowers_count() {
        let mut det = BlowDetector::new(&WidgetConfig::default());
        det.start(FixedLevel(0));
        let mut reg = cake(5);
        let mut rng = Rng::new(3);
        for _ in 0..200 {
            det.tick(&mut reg, &mut rng);
            assert_eq!(reg.active_count(), 5);
        }
    }

    #[test]
    fn each_candle_gets_its_own_draw() {
        let mut det = BlowDetector::new(&WidgetConfig::default());
        det.start(FixedLevel(200));
        let mut reg = cake(4);
        let mut rng = Scripted { draws: vec![0.1, 0.9, 0.2, 0.8], next: 0 };
        assert_eq!(det.tick(&mut reg, &mut rng), 2);
        let lit: Vec<bool> = reg.as_slice().iter().map(|c| c.is_lit()).collect();
        assert_eq!(lit, vec![false, true, false, true]);
        assert_eq!(rng.next, 4);
    }

    #[test]
    fn sustained_blowing_puts_everything_out() {
        let mut det = BlowDetector::new(&WidgetConfig::default());
        det.start(FixedLevel(255));
        let mut reg = cake(20);
        let mut rng = Rng::new(42);
        for _ in 0..100 {
            det.tick(&mut reg, &mut rng);
        }
        assert_eq!(reg.active_count(), 0);
    }

    #[test]
    fn observer_fires_once_per_blowing_tick() {
        let mut det = BlowDetector::new(&WidgetConfig::default());
        det.start(FixedLevel(255));
        let mut reg = cake(3);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        reg.set_observer(move |n: usize| sink.borrow_mut().push(n));

        let mut all_out = Scripted { draws: vec![0.0], next: 0 };
        det.tick(&mut reg, &mut all_out);
        assert_eq!(*calls.borrow(), vec![0]);

        // Nothing left to blow out: no further notification.
        det.tick(&mut reg, &mut all_out);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn stop_hook_halts_sampling() {
        let mut det = BlowDetector::new(&WidgetConfig::default());
        det.start(FixedLevel(255));
        det.stop();
        let mut reg = cake(2);
        let mut rng = Scripted { draws: vec![0.0], next: 0 };
        assert_eq!(det.tick(&mut reg, &mut rng), 0);
        assert_eq!(det.state(), DetectorState::Stopped);
    }
}
