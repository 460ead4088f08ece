//! Material waste factor lookup.

use crate::domain::ComplexityTier;

/// Waste percentage used when a tier label is not recognised.
pub const DEFAULT_WASTE_FACTOR: u32 = 12;

/// Waste percentage for a complexity tier.
pub fn waste_factor(tier: ComplexityTier) -> u32 {
    match tier {
        ComplexityTier::Simple => 10,
        ComplexityTier::Moderate => 12,
        ComplexityTier::Complex => 15,
        ComplexityTier::VeryComplex => 18,
    }
}

/// Waste percentage for a tier label such as `"complex"`.
///
/// Unknown labels resolve to [`DEFAULT_WASTE_FACTOR`].
pub fn waste_factor_for_label(label: &str) -> u32 {
    label
        .parse::<ComplexityTier>()
        .map(waste_factor)
        .unwrap_or(DEFAULT_WASTE_FACTOR)
}
