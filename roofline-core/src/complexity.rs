//! Roof complexity scoring.
//!
//! The score is the sum of three contributions read from ordered boundary
//! tables. The thresholds are fixed; changing them changes every estimate.

use crate::domain::{ComplexityResult, ComplexityTier};

/// Facet-count bands: the first band whose upper bound is `>= n` applies.
const FACET_COUNT_BANDS: [(usize, u32); 4] = [(2, 10), (4, 25), (6, 40), (10, 60)];
/// Contribution when the facet count exceeds every band.
const FACET_COUNT_OVERFLOW: u32 = 80;

/// Average-pitch bands: the first band whose lower bound is `< p` applies.
const PITCH_BANDS: [(f64, u32); 3] = [(35.0, 20), (25.0, 10), (15.0, 5)];

/// Pitch-range bands: the first band whose lower bound is `< range` applies.
const PITCH_RANGE_BANDS: [(f64, u32); 3] = [(15.0, 15), (10.0, 10), (5.0, 5)];

/// Tier bands: the first band whose upper score bound is `>= score` applies.
const TIER_BANDS: [(u32, ComplexityTier); 3] = [
    (25, ComplexityTier::Simple),
    (50, ComplexityTier::Moderate),
    (75, ComplexityTier::Complex),
];

/// Score a roof and classify it into a complexity tier.
///
/// `pitches` holds every facet's pitch in degrees. The pitch-range
/// contribution only applies with two or more pitches.
pub fn classify_complexity(
    facet_count: usize,
    average_pitch_degrees: f64,
    pitches: &[f64],
) -> ComplexityResult {
    let score = facet_count_contribution(facet_count)
        + pitch_contribution(average_pitch_degrees)
        + pitch_range_contribution(pitches);
    let tier = ComplexityTier::from_score(score);

    ComplexityResult {
        score,
        percentage: score.min(100) as u8,
        tier,
        description: tier.description().to_string(),
    }
}

impl ComplexityTier {
    /// Map a complexity score onto its tier.
    pub fn from_score(score: u32) -> Self {
        TIER_BANDS
            .iter()
            .find(|(upper, _)| score <= *upper)
            .map(|(_, tier)| *tier)
            .unwrap_or(ComplexityTier::VeryComplex)
    }
}

fn facet_count_contribution(facet_count: usize) -> u32 {
    FACET_COUNT_BANDS
        .iter()
        .find(|(upper, _)| facet_count <= *upper)
        .map(|(_, points)| *points)
        .unwrap_or(FACET_COUNT_OVERFLOW)
}

fn pitch_contribution(average_pitch_degrees: f64) -> u32 {
    exceeding_band(&PITCH_BANDS, average_pitch_degrees)
}

fn pitch_range_contribution(pitches: &[f64]) -> u32 {
    if pitches.len() < 2 {
        return 0;
    }
    let max = pitches.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = pitches.iter().copied().fold(f64::INFINITY, f64::min);
    exceeding_band(&PITCH_RANGE_BANDS, max - min)
}

fn exceeding_band(bands: &[(f64, u32)], value: f64) -> u32 {
    bands
        .iter()
        .find(|(lower, _)| value > *lower)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}
