pub mod api;
pub mod codec;
pub mod components;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;
pub mod share;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::WidgetConfig;
pub use api::types::{CandleId, Flavor};
pub use components::candle::Candle;
pub use crate::core::registry::{CandleRegistry, CountObserver};
pub use crate::core::time::PollTimer;
pub use crate::core::widget::{Widget, WidgetState};
pub use error::{AudioError, CodecError};
pub use input::event::WidgetInput;
pub use renderer::instance::{CandleBuffer, CandleInstance};
pub use share::fragment::{apply_fragment, build_fragment, parse_fragment, FragmentFields};
pub use share::sink::{MemorySink, ShareSink};
pub use systems::blow::{AmplitudeSource, BlowDetector, DetectorState};
pub use systems::rng::{RandomSource, Rng};
