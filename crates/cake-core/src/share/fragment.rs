//! Share fragment: `c=<points>&m=<hex message>&f=<flavor>`.
//!
//! Building always emits all three keys. Parsing treats every key as
//! optional, so older or hand-edited links still load.

use crate::api::types::Flavor;
use crate::codec::{hex, points};
use crate::core::widget::{Widget, WidgetState};

pub const CANDLES_KEY: &str = "c";
pub const MESSAGE_KEY: &str = "m";
pub const FLAVOR_KEY: &str = "f";

/// Build the fragment (without `#`) for the given state.
pub fn build_fragment(state: &WidgetState<'_>, bounds: glam::Vec2) -> String {
    let candles = points::encode(state.candles.iter().map(|c| &c.pos), bounds);
    let message = hex::encode(state.message);
    format!(
        "{CANDLES_KEY}={candles}&{MESSAGE_KEY}={message}&{FLAVOR_KEY}={}",
        state.flavor
    )
}

/// Raw values found in a fragment. The first occurrence of a key wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FragmentFields<'a> {
    pub candles: Option<&'a str>,
    pub message: Option<&'a str>,
    pub flavor: Option<&'a str>,
}

/// Split a fragment into its known fields. A leading `#` is ignored,
/// unknown keys are skipped, and a key with no `=` has an empty value.
pub fn parse_fragment(fragment: &str) -> FragmentFields<'_> {
    let mut fields = FragmentFields::default();
    let body = fragment.strip_prefix('#').unwrap_or(fragment);

    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let slot = match key {
            CANDLES_KEY => &mut fields.candles,
            MESSAGE_KEY => &mut fields.message,
            FLAVOR_KEY => &mut fields.flavor,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }
    fields
}

/// Replay a fragment onto live widget state.
///
/// Candles are added on top of whatever is already placed; reset first for
/// a clean load. An empty message value leaves the current message alone;
/// one that fails to decode becomes empty. The flavor
/// is always set: vanilla only when asked for, chocolate otherwise.
pub fn apply_fragment(widget: &mut Widget, fragment: &str) {
    let fields = parse_fragment(fragment);

    if let Some(token) = fields.candles.filter(|t| !t.is_empty()) {
        let restored = points::decode(token, widget.bounds());
        log::debug!("restoring {} candle(s) from share link", restored.len());
        for pos in restored {
            widget.add_candle(pos);
        }
    }

    if let Some(token) = fields.message.filter(|t| !t.is_empty()) {
        let message = hex::decode(token).unwrap_or_else(|err| {
            log::warn!("discarding shared message: {err}");
            String::new()
        });
        widget.set_message_raw(message);
    }

    widget.select_flavor(fields.flavor.map_or(Flavor::Chocolate, Flavor::from_tag));
}
