use serde::{Deserialize, Serialize};

/// Widget tuning, provided by the host page.
/// Every field has a default, so a partial JSON object is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Visual candle height in pixels (default: 30).
    /// Only shifts the display origin; logical positions are unaffected.
    pub candle_height: f32,
    /// Microphone sampling period in milliseconds (default: 200).
    pub sample_period_ms: f32,
    /// Analyser transform size (default: 256). Half of it is the bin count.
    pub fft_size: u32,
    /// Mean bin amplitude, on a 0-255 scale, above which a sample counts
    /// as blowing (default: 40).
    pub blow_threshold: f32,
    /// Chance that a single lit candle goes out on a blowing tick (default: 0.5).
    pub extinguish_probability: f32,
    /// Seed for the blow-out random source (default: 42).
    pub rng_seed: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            candle_height: 30.0,
            sample_period_ms: 200.0,
            fft_size: 256,
            blow_threshold: 40.0,
            extinguish_probability: 0.5,
            rng_seed: 42,
        }
    }
}

impl WidgetConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of frequency bins the analyser exposes.
    pub fn bin_count(&self) -> usize {
        (self.fft_size / 2) as usize
    }
}
