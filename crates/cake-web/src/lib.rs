pub mod browser;
pub mod runner;

pub use runner::WidgetRunner;

use std::cell::RefCell;

use cake_core::{WidgetConfig, WidgetInput};
use glam::Vec2;
use wasm_bindgen::prelude::*;

use browser::{BrowserSink, Interval};

thread_local! {
    static RUNNER: RefCell<Option<WidgetRunner<BrowserSink>>> = RefCell::new(None);
    static SAMPLER: RefCell<Option<Interval>> = RefCell::new(None);
    static COUNT_CALLBACK: RefCell<Option<js_sys::Function>> = RefCell::new(None);
}

/// Run `f` against the runner, then report any lit-count change to JS once
/// the runner is released, so the callback may call `widget_*` itself.
fn with_runner<R>(f: impl FnOnce(&mut WidgetRunner<BrowserSink>) -> R) -> R {
    let (result, changed) = RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Widget not initialized. Call widget_init() first.");
        let result = f(runner);
        (result, runner.take_count_change())
    });
    if let Some(active) = changed {
        notify_count(active);
    }
    result
}

fn notify_count(active: u32) {
    let Some(callback) = COUNT_CALLBACK.with(|cell| cell.borrow().clone()) else {
        return;
    };
    if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from(active)) {
        log::warn!("count callback threw: {err:?}");
    }
}

/// Create the widget for a cake of `width` x `height` pixels and restore any
/// state carried in `location.hash`. `config_json` may override defaults.
#[wasm_bindgen]
pub fn widget_init(width: f32, height: f32, config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref().map(WidgetConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log::warn!("ignoring widget config: {err}");
            WidgetConfig::default()
        }
        None => WidgetConfig::default(),
    };

    let runner = WidgetRunner::new(config, Vec2::new(width, height), BrowserSink);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    let fragment = BrowserSink::current_fragment();
    with_runner(|r| r.init(&fragment));
    log::info!("cake widget: initialized");
}

/// The cake element was resized; share coordinates follow the new size.
#[wasm_bindgen]
pub fn widget_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

#[wasm_bindgen]
pub fn widget_click(x: f32, y: f32) {
    with_runner(|r| r.dispatch(WidgetInput::Click { x, y }));
}

#[wasm_bindgen]
pub fn widget_set_message(text: &str) {
    with_runner(|r| r.dispatch(WidgetInput::SetMessage(text.to_string())));
}

#[wasm_bindgen]
pub fn widget_select_flavor(tag: &str) {
    with_runner(|r| r.dispatch(WidgetInput::flavor_tag(tag)));
}

/// Publish the share link into the address bar (and clipboard, if allowed).
/// Returns the full address.
#[wasm_bindgen]
pub fn widget_share() -> String {
    with_runner(|r| r.share())
}

#[wasm_bindgen]
pub fn widget_reset() {
    with_runner(|r| r.dispatch(WidgetInput::Reset));
}

/// Register a JS function called with the lit-candle count whenever it changes.
#[wasm_bindgen]
pub fn widget_on_count_changed(callback: js_sys::Function) {
    COUNT_CALLBACK.with(|cell| *cell.borrow_mut() = Some(callback));
}

/// Request the microphone. On success, blow detection starts on its own
/// interval; on failure the reason is logged and the widget carries on.
#[wasm_bindgen]
pub fn widget_start_microphone() {
    let fft_size = with_runner(|r| r.widget().config().fft_size);
    wasm_bindgen_futures::spawn_local(async move {
        match browser::open_microphone(fft_size).await {
            Ok(source) => {
                let period = with_runner(|r| {
                    r.start_listening(source);
                    r.sample_period_ms()
                });
                match Interval::every(period, move || with_runner(|r| r.tick(period))) {
                    Ok(interval) => SAMPLER.with(|cell| *cell.borrow_mut() = Some(interval)),
                    Err(err) => {
                        log::warn!("could not schedule sampling: {err:?}");
                        with_runner(|r| r.stop_listening());
                    }
                }
            }
            Err(err) => with_runner(|r| r.audio_failed(&err)),
        }
    });
}

/// Stop blow detection and clear its interval.
#[wasm_bindgen]
pub fn widget_stop_microphone() {
    SAMPLER.with(|cell| cell.borrow_mut().take());
    with_runner(|r| r.stop_listening());
}

/// Manually advance the sampling clock, for hosts that drive time themselves.
#[wasm_bindgen]
pub fn widget_tick(elapsed_ms: f32) {
    with_runner(|r| r.tick(elapsed_ms));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn widget_active_count() -> u32 {
    with_runner(|r| r.active_count())
}

#[wasm_bindgen]
pub fn widget_candle_count() -> u32 {
    with_runner(|r| r.candle_count())
}

#[wasm_bindgen]
pub fn widget_message() -> String {
    with_runner(|r| r.message())
}

#[wasm_bindgen]
pub fn widget_flavor() -> String {
    with_runner(|r| r.flavor().as_str().to_string())
}

#[wasm_bindgen]
pub fn widget_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn widget_instance_count() -> u32 {
    with_runner(|r| r.instance_count())
}
