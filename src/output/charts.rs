// Chart data derived from a ToxicityScore.
//
// Both the terminal dashboard and the browser dashboard draw from the same
// ChartData, so the numbers a user sees are identical in either surface.
// Everything here is pure arithmetic over the six scores.

use serde::Serialize;

use crate::toxicity::score::{Category, ToxicityScore};

/// Angle (degrees, counter-clockwise from 3 o'clock) where the first pie
/// slice starts.
pub const PIE_START_ANGLE: f64 = 140.0;

/// Low end of the heatmap ramp (score 0.0).
const HEAT_LOW: (u8, u8, u8) = (0xff, 0xf5, 0xf0);
/// High end of the heatmap ramp (score 1.0).
const HEAT_HIGH: (u8, u8, u8) = (0x67, 0x00, 0x0d);

/// Everything needed to draw the dashboard for one score.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    /// Mean score clamped to [0, 1], for the progress indicator
    pub progress: f64,
    pub bars: Vec<Bar>,
    pub slices: Vec<Slice>,
    pub heatmap: Vec<HeatCell>,
}

/// One bar in the per-category bar chart.
#[derive(Debug, Clone, Serialize)]
pub struct Bar {
    pub category: Category,
    pub score: f64,
    /// score * 100
    pub percent: f64,
}

/// One pie slice: the category's share of the summed scores.
#[derive(Debug, Clone, Serialize)]
pub struct Slice {
    pub category: Category,
    /// Fraction of the total in [0, 1]; all zero when every score is zero
    pub share: f64,
    pub start_deg: f64,
    pub end_deg: f64,
}

/// One row of the intensity heatmap.
#[derive(Debug, Clone, Serialize)]
pub struct HeatCell {
    pub category: Category,
    pub score: f64,
    /// `#rrggbb` on the white to dark-red ramp
    pub color: String,
}

impl ChartData {
    pub fn from_score(score: &ToxicityScore) -> Self {
        Self {
            progress: score.mean().clamp(0.0, 1.0),
            bars: bars(score),
            slices: slices(score),
            heatmap: heatmap(score),
        }
    }
}

fn bars(score: &ToxicityScore) -> Vec<Bar> {
    score
        .iter()
        .map(|(category, score)| Bar {
            category,
            score,
            percent: score * 100.0,
        })
        .collect()
}

fn slices(score: &ToxicityScore) -> Vec<Slice> {
    let total = score.total();
    let mut angle = PIE_START_ANGLE;

    score
        .iter()
        .map(|(category, value)| {
            let share = if total > 0.0 { value / total } else { 0.0 };
            let start_deg = angle;
            angle += share * 360.0;
            Slice {
                category,
                share,
                start_deg,
                end_deg: angle,
            }
        })
        .collect()
}

fn heatmap(score: &ToxicityScore) -> Vec<HeatCell> {
    score
        .iter()
        .map(|(category, score)| HeatCell {
            category,
            score,
            color: hex_color(heat_rgb(score)),
        })
        .collect()
}

/// Interpolate the heatmap ramp at `value` (clamped to [0, 1]).
pub fn heat_rgb(value: f64) -> (u8, u8, u8) {
    let t = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let lerp = |lo: u8, hi: u8| -> u8 {
        (f64::from(lo) + (f64::from(hi) - f64::from(lo)) * t).round() as u8
    };
    (
        lerp(HEAT_LOW.0, HEAT_HIGH.0),
        lerp(HEAT_LOW.1, HEAT_HIGH.1),
        lerp(HEAT_LOW.2, HEAT_HIGH.2),
    )
}

pub fn hex_color((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_ramp_endpoints() {
        assert_eq!(hex_color(heat_rgb(0.0)), "#fff5f0");
        assert_eq!(hex_color(heat_rgb(1.0)), "#67000d");
        assert_eq!(heat_rgb(2.0), heat_rgb(1.0));
        assert_eq!(heat_rgb(f64::NAN), heat_rgb(0.0));
    }

    #[test]
    fn test_pie_starts_at_fixed_angle() {
        let score = ToxicityScore::new([0.5, 0.5, 0.0, 0.0, 0.0, 0.0]).unwrap();
        let s = slices(&score);
        assert_eq!(s[0].start_deg, PIE_START_ANGLE);
        assert!((s[0].end_deg - (PIE_START_ANGLE + 180.0)).abs() < 1e-9);
        assert!((s[5].end_deg - (PIE_START_ANGLE + 360.0)).abs() < 1e-9);
    }
}
