use std::cell::Cell;
use std::rc::Rc;

use cake_core::{
    AmplitudeSource, AudioError, BlowDetector, CandleBuffer, Flavor, PollTimer, Rng,
    ShareSink, Widget, WidgetConfig, WidgetInput,
};
use glam::Vec2;

/// Wires the widget controller, blow detector and poll timer together.
///
/// The bridge keeps one `thread_local!` WidgetRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct WidgetRunner<S: ShareSink> {
    widget: Widget,
    detector: BlowDetector,
    timer: PollTimer,
    rng: Rng,
    sink: S,
    /// Flat candle instances for zero-copy reads from JS.
    instances: CandleBuffer,
    /// Latest lit count reported by the registry, not yet handed to the host.
    pending_count: Rc<Cell<Option<usize>>>,
}

impl<S: ShareSink> WidgetRunner<S> {
    pub fn new(config: WidgetConfig, bounds: Vec2, sink: S) -> Self {
        let detector = BlowDetector::new(&config);
        let timer = PollTimer::new(config.sample_period_ms);
        let rng = Rng::new(config.rng_seed);

        let pending_count = Rc::new(Cell::new(None));
        let mut widget = Widget::new(config, bounds);
        let slot = Rc::clone(&pending_count);
        widget.set_observer(move |active: usize| slot.set(Some(active)));

        Self {
            widget,
            detector,
            timer,
            rng,
            sink,
            instances: CandleBuffer::new(),
            pending_count,
        }
    }

    /// Load any shared state from the page fragment. Call once after construction.
    pub fn init(&mut self, fragment: &str) {
        self.widget.restore(fragment);
        self.sync_instances();
    }

    /// Apply one user input immediately.
    pub fn dispatch(&mut self, input: WidgetInput) {
        self.widget.handle(input, &mut self.sink);
        self.sync_instances();
    }

    /// Advance by elapsed milliseconds, running any due blow-detection ticks.
    pub fn tick(&mut self, elapsed_ms: f32) {
        let steps = self.timer.accumulate(elapsed_ms);
        if steps == 0 {
            return;
        }
        for _ in 0..steps {
            self.detector.tick(self.widget.registry_mut(), &mut self.rng);
        }
        self.sync_instances();
    }

    /// Microphone granted: start sampling.
    pub fn start_listening(&mut self, source: impl AmplitudeSource + 'static) {
        self.detector.start(source);
        self.timer.start();
    }

    /// Microphone unavailable: blow-out stays off.
    pub fn audio_failed(&mut self, err: &AudioError) {
        self.detector.fail(err);
    }

    pub fn stop_listening(&mut self) {
        self.timer.stop();
        self.detector.stop();
    }

    /// The lit count if it changed since the last call. Several changes
    /// collapse into the latest value.
    pub fn take_count_change(&mut self) -> Option<u32> {
        self.pending_count.take().map(|n| n as u32)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.widget.set_bounds(Vec2::new(width, height));
    }

    /// Build and publish the share link. Returns the full address.
    pub fn share(&mut self) -> String {
        self.widget.share(&mut self.sink)
    }

    fn sync_instances(&mut self) {
        let height = self.widget.config().candle_height;
        self.instances.rebuild(self.widget.candles(), height);
    }

    // ---- Accessors ----

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn active_count(&self) -> u32 {
        self.widget.active_count() as u32
    }

    pub fn candle_count(&self) -> u32 {
        self.widget.candles().len() as u32
    }

    pub fn message(&self) -> String {
        self.widget.message().to_string()
    }

    pub fn flavor(&self) -> Flavor {
        self.widget.flavor()
    }

    pub fn is_listening(&self) -> bool {
        self.detector.is_listening()
    }

    pub fn sample_period_ms(&self) -> f32 {
        self.timer.period_ms()
    }

    // ---- Pointer accessors for zero-copy reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cake_core::MemorySink;

    struct Loud;

    impl AmplitudeSource for Loud {
        fn frequency_data(&mut self, bins: &mut [u8]) {
            bins.fill(255);
        }
    }

    fn runner() -> WidgetRunner<MemorySink> {
        WidgetRunner::new(
            WidgetConfig::default(),
            Vec2::new(400.0, 300.0),
            MemorySink::new("/cake.html"),
        )
    }

    #[test]
    fn init_restores_fragment_and_fills_instances() {
        let mut r = runner();
        r.init("#c=0.2500_0.5000&m=4869&f=vanilla");
        assert_eq!(r.candle_count(), 1);
        assert_eq!(r.instance_count(), 1);
        assert_eq!(r.message(), "Hi");
        assert_eq!(r.flavor(), Flavor::Vanilla);
    }

    #[test]
    fn ticks_do_nothing_until_listening() {
        let mut r = runner();
        r.dispatch(WidgetInput::Click { x: 10.0, y: 10.0 });
        for _ in 0..50 {
            r.tick(200.0);
        }
        assert_eq!(r.active_count(), 1);
    }

    #[test]
    fn listening_runner_blows_out_candles() {
        let mut r = runner();
        for i in 0..5 {
            r.dispatch(WidgetInput::Click { x: i as f32 * 20.0, y: 100.0 });
        }
        r.start_listening(Loud);
        for _ in 0..100 {
            r.tick(200.0);
        }
        assert_eq!(r.active_count(), 0);
        assert_eq!(r.candle_count(), 5);
    }

    #[test]
    fn stop_halts_blow_out() {
        let mut r = runner();
        r.dispatch(WidgetInput::Click { x: 10.0, y: 10.0 });
        r.start_listening(Loud);
        r.stop_listening();
        for _ in 0..50 {
            r.tick(200.0);
        }
        assert_eq!(r.active_count(), 1);
        assert!(!r.is_listening());
    }

    #[test]
    fn count_change_is_held_until_taken() {
        let mut r = runner();
        assert_eq!(r.take_count_change(), None);

        r.dispatch(WidgetInput::Click { x: 10.0, y: 10.0 });
        assert_eq!(r.take_count_change(), Some(1));
        assert_eq!(r.take_count_change(), None);

        r.dispatch(WidgetInput::Click { x: 20.0, y: 10.0 });
        r.dispatch(WidgetInput::Click { x: 30.0, y: 10.0 });
        assert_eq!(r.take_count_change(), Some(3));

        r.dispatch(WidgetInput::SetMessage("no count change".into()));
        assert_eq!(r.take_count_change(), None);
    }

    #[test]
    fn blow_out_reports_count_change() {
        let mut r = runner();
        r.dispatch(WidgetInput::Click { x: 10.0, y: 10.0 });
        r.dispatch(WidgetInput::Click { x: 20.0, y: 10.0 });
        r.take_count_change();

        r.start_listening(Loud);
        for _ in 0..100 {
            r.tick(200.0);
        }
        assert_eq!(r.take_count_change(), Some(0));

        r.dispatch(WidgetInput::Reset);
        assert_eq!(r.take_count_change(), Some(0));
    }

    #[test]
    fn share_writes_sink() {
        let mut r = runner();
        r.dispatch(WidgetInput::Click { x: 100.0, y: 150.0 });
        r.dispatch(WidgetInput::SetMessage("Hi".into()));
        assert_eq!(
            r.share(),
            "/cake.html#c=0.2500_0.5000&m=4869&f=chocolate"
        );
    }
}
