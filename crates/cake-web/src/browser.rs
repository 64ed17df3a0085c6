//! Browser adapters for the core traits: page address and clipboard,
//! microphone spectrum, and the sampling interval.

use cake_core::{AmplitudeSource, AudioError, ShareSink};
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AnalyserNode, AudioContext, MediaStream, MediaStreamAudioSourceNode, MediaStreamConstraints};

/// Share sink backed by `window.location`, `history.replaceState` and the
/// async clipboard.
pub struct BrowserSink;

impl BrowserSink {
    /// The current `#...` fragment, or empty.
    pub fn current_fragment() -> String {
        web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default()
    }

    fn replace_url(url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let result = window
            .history()
            .and_then(|h| h.replace_state_with_url(&JsValue::NULL, "", Some(url)));
        if let Err(err) = result {
            log::warn!("history.replaceState failed: {err:?}");
        }
    }

    fn pathname() -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }
}

impl ShareSink for BrowserSink {
    fn replace_fragment(&mut self, fragment: &str) {
        Self::replace_url(&format!("{}#{fragment}", Self::pathname()));
    }

    fn clear_fragment(&mut self) {
        Self::replace_url(&Self::pathname());
    }

    fn address(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default()
    }

    fn copy_to_clipboard(&mut self, address: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if !window.is_secure_context() {
            return;
        }
        let navigator = window.navigator();
        if !Reflect::has(&navigator, &JsValue::from_str("clipboard")).unwrap_or(false) {
            return;
        }
        let pending = JsFuture::from(navigator.clipboard().write_text(address));
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = pending.await {
                log::debug!("clipboard write refused: {err:?}");
            }
        });
    }
}

/// Live microphone spectrum from an `AnalyserNode`.
/// Holds the whole audio graph so it stays alive while sampling.
pub struct AnalyserSource {
    analyser: AnalyserNode,
    _source: MediaStreamAudioSourceNode,
    _context: AudioContext,
}

impl AmplitudeSource for AnalyserSource {
    fn frequency_data(&mut self, bins: &mut [u8]) {
        let available = self.analyser.frequency_bin_count() as usize;
        let len = available.min(bins.len());
        self.analyser.get_byte_frequency_data(&mut bins[..len]);
    }
}

/// Ask for microphone access and build the analyser graph.
pub async fn open_microphone(fft_size: u32) -> Result<AnalyserSource, AudioError> {
    let window = web_sys::window().ok_or(AudioError::Unsupported)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| AudioError::Unsupported)?;
    if !Reflect::has(&devices, &JsValue::from_str("getUserMedia")).unwrap_or(false) {
        return Err(AudioError::Unsupported);
    }

    let constraints = MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let request = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|err| AudioError::PermissionDenied(describe(&err)))?;
    let stream: MediaStream = JsFuture::from(request)
        .await
        .map_err(|err| AudioError::PermissionDenied(describe(&err)))?
        .dyn_into()
        .map_err(|_| AudioError::Unsupported)?;

    let context = AudioContext::new().map_err(|_| AudioError::Unsupported)?;
    let analyser = context.create_analyser().map_err(|_| AudioError::Unsupported)?;
    let source = context
        .create_media_stream_source(&stream)
        .map_err(|_| AudioError::Unsupported)?;
    source
        .connect_with_audio_node(&analyser)
        .map_err(|_| AudioError::Unsupported)?;
    analyser.set_fft_size(fft_size);

    Ok(AnalyserSource {
        analyser,
        _source: source,
        _context: context,
    })
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            Reflect::get(err, &JsValue::from_str("name"))
                .ok()
                .and_then(|n| n.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

/// A `setInterval` registration; cleared on drop.
pub struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn every(period_ms: f32, callback: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback = Closure::<dyn FnMut()>::wrap(Box::new(callback));
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms as i32,
        )?;
        Ok(Self { id, _callback: callback })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}
