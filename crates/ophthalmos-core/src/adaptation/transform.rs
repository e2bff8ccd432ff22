use super::model::AdaptationFactors;
use crate::color::Color;

/// Applies `factors` to `color`.
///
/// Each channel becomes `floor(c * factor * contrast_boost)` clamped to
/// `[0, 255]`. Channels are truncated, not rounded. With no factors the color
/// is returned unchanged.
pub fn adapt(color: Color, factors: Option<&AdaptationFactors>) -> Color {
    let Some(factors) = factors else {
        return color;
    };

    let boost = factors.contrast_boost;
    Color::new(
        scale(color.red, factors.red_adjustment, boost),
        scale(color.green, factors.green_adjustment, boost),
        scale(color.blue, factors.blue_adjustment, boost),
    )
}

fn scale(channel: u8, factor: f64, boost: f64) -> u8 {
    // Multiplication order matters for the last bit; keep it left to right
    let scaled = (f64::from(channel) * factor * boost).floor();
    // NaN survives clamp; the saturating cast maps it to 0
    scaled.clamp(0.0, 255.0) as u8
}
