use glam::Vec2;

use crate::api::config::WidgetConfig;
use crate::api::types::{CandleId, Flavor};
use crate::components::candle::Candle;
use crate::core::registry::{CandleRegistry, CountObserver};
use crate::input::event::WidgetInput;
use crate::share::fragment::{apply_fragment, build_fragment};
use crate::share::sink::ShareSink;

/// Read-only view of everything a share link carries.
#[derive(Debug, Clone, Copy)]
pub struct WidgetState<'a> {
    pub candles: &'a [Candle],
    pub message: &'a str,
    pub flavor: Flavor,
}

/// Owner of the cake's state. Every handler goes through here.
pub struct Widget {
    config: WidgetConfig,
    registry: CandleRegistry,
    message: String,
    flavor: Flavor,
    /// Cake size in pixels, used to normalize share coordinates.
    bounds: Vec2,
}

impl Widget {
    pub fn new(config: WidgetConfig, bounds: Vec2) -> Self {
        Self {
            config,
            registry: CandleRegistry::new(),
            message: String::new(),
            flavor: Flavor::default(),
            bounds,
        }
    }

    /// Dispatch one user input.
    pub fn handle(&mut self, input: WidgetInput, sink: &mut dyn ShareSink) {
        match input {
            WidgetInput::Click { x, y } => {
                self.add_candle(Vec2::new(x, y));
            }
            WidgetInput::SetMessage(text) => self.set_message(&text),
            WidgetInput::SelectFlavor(flavor) => self.select_flavor(flavor),
            WidgetInput::Share => {
                self.share(sink);
            }
            WidgetInput::Reset => self.reset(sink),
        }
    }

    /// Place a lit candle at a cake-relative pixel position.
    pub fn add_candle(&mut self, pos: Vec2) -> CandleId {
        self.registry.add(pos)
    }

    /// Set the message from user input; surrounding whitespace is dropped.
    pub fn set_message(&mut self, text: &str) {
        self.set_message_raw(text.trim().to_string());
    }

    pub(crate) fn set_message_raw(&mut self, message: String) {
        log::debug!("message set ({} chars)", message.chars().count());
        self.message = message;
    }

    pub fn select_flavor(&mut self, flavor: Flavor) {
        self.flavor = flavor;
    }

    /// Build the share fragment, write it to the sink's address in place,
    /// then try the clipboard. Returns the full address.
    pub fn share(&self, sink: &mut dyn ShareSink) -> String {
        let fragment = build_fragment(&self.state(), self.bounds);
        sink.replace_fragment(&fragment);
        let address = sink.address();
        sink.copy_to_clipboard(&address);
        log::info!("share link ready: {address}");
        address
    }

    /// Load state from an address fragment, if there is one.
    pub fn restore(&mut self, fragment: &str) {
        let body = fragment.strip_prefix('#').unwrap_or(fragment);
        if body.is_empty() {
            return;
        }
        apply_fragment(self, body);
    }

    /// Back to an empty chocolate cake with no message and no share link.
    pub fn reset(&mut self, sink: &mut dyn ShareSink) {
        self.registry.clear();
        self.message.clear();
        self.flavor = Flavor::default();
        sink.clear_fragment();
        log::debug!("widget reset");
    }

    pub fn state(&self) -> WidgetState<'_> {
        WidgetState {
            candles: self.registry.as_slice(),
            message: &self.message,
            flavor: self.flavor,
        }
    }

    pub fn set_observer(&mut self, observer: impl CountObserver + 'static) {
        self.registry.set_observer(observer);
    }

    pub fn set_bounds(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn candles(&self) -> &[Candle] {
        self.registry.as_slice()
    }

    pub fn active_count(&self) -> usize {
        self.registry.active_count()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn registry_mut(&mut self) -> &mut CandleRegistry {
        &mut self.registry
    }
}
