//! Candle position codec.
//!
//! Positions are normalized against the cake bounds, clamped into [0, 1]
//! and written with four decimals: `"0.2500_0.5000-0.7000_0.1250"`.
//! Decoding multiplies back by the bounds, so pixel positions are only
//! recovered to within 1/10000 of each dimension, and only when the same
//! bounds are used on both sides.

use std::fmt::Write;

use glam::{DVec2, Vec2};

const POINT_SEPARATOR: char = '-';
const AXIS_SEPARATOR: char = '_';

/// Encode pixel positions into a point token. Empty input yields `""`.
pub fn encode<'a>(points: impl IntoIterator<Item = &'a Vec2>, bounds: Vec2) -> String {
    let mut out = String::new();
    for (i, p) in points.into_iter().enumerate() {
        if i > 0 {
            out.push(POINT_SEPARATOR);
        }
        let n = normalize(*p, bounds);
        // Writing into a String cannot fail.
        let _ = write!(out, "{}{AXIS_SEPARATOR}{}", to_fixed4(n.x), to_fixed4(n.y));
    }
    out
}

/// Decode a point token back into pixel positions.
///
/// Malformed numbers are not rejected: they come back as `NaN` coordinates
/// and a warning is logged. An empty number reads as 0.
pub fn decode(token: &str, bounds: Vec2) -> Vec<Vec2> {
    if token.is_empty() {
        return Vec::new();
    }

    token
        .split(POINT_SEPARATOR)
        .map(|piece| {
            let mut axes = piece.split(AXIS_SEPARATOR);
            let x = parse_axis(axes.next());
            let y = parse_axis(axes.next());
            if x.is_nan() || y.is_nan() {
                log::warn!("malformed candle point {piece:?} in share token");
            }
            Vec2::new(x, y) * bounds
        })
        .collect()
}

/// Normalize a pixel position against the bounds, clamped into [0, 1].
/// Division happens in f64 so links match those built by the page script.
pub fn normalize(point: Vec2, bounds: Vec2) -> DVec2 {
    let n = point.as_dvec2() / bounds.as_dvec2();
    DVec2::new(n.x.clamp(0.0, 1.0), n.y.clamp(0.0, 1.0))
}

/// Four decimals, with exact halfway values rounded up as `toFixed(4)` does.
/// `{:.4}` alone would round them to even.
fn to_fixed4(v: f64) -> String {
    let twice = v * 20_000.0;
    // The product must be exact, or `twice` only looks like a tie.
    let exact = v.mul_add(20_000.0, -twice) == 0.0;
    if exact && twice.fract() == 0.0 && twice % 2.0 == 1.0 {
        let n = (twice as u64 + 1) / 2;
        return format!("{}.{:04}", n / 10_000, n % 10_000);
    }
    format!("{v:.4}")
}

fn parse_axis(raw: Option<&str>) -> f32 {
    match raw.map(str::trim) {
        None => f32::NAN,
        Some("") => 0.0,
        Some(s) => s.parse().unwrap_or(f32::NAN),
    }
}
