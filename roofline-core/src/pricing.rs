//! Three-tier price range.

use crate::domain::{PriceEstimate, PricingRates};
use crate::materials::effective_squares;
use crate::rounding::nearest;

/// Price the roof at each per-square rate after applying waste.
///
/// Output ordering follows rate ordering; callers that need `low <= mid <=
/// high` must supply ordered rates (see [`PricingRates::validate`]).
pub fn calculate_prices(roof_squares: f64, waste_factor: u32, rates: &PricingRates) -> PriceEstimate {
    let squares = effective_squares(roof_squares, waste_factor);
    PriceEstimate {
        low: nearest(squares * rates.low),
        mid: nearest(squares * rates.mid),
        high: nearest(squares * rates.high),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn default_rates_price_large_flat_roof() {
        let prices = calculate_prices(250.0, 10, &PricingRates::default());
        assert_eq!(prices.low, 127_875);
        assert_eq!(prices.mid, 151_250);
        assert_eq!(prices.high, 206_250);
    }

    #[test]
    fn zero_area_costs_nothing() {
        let prices = calculate_prices(0.0, 18, &PricingRates::default());
        assert_eq!(prices, PriceEstimate::default());
    }

    #[test]
    fn unordered_rates_are_passed_through() {
        let prices = calculate_prices(10.0, 0, &PricingRates::new(700.0, 500.0, 600.0));
        assert_eq!(prices.low, 7000);
        assert_eq!(prices.mid, 5000);
        assert_eq!(prices.high, 6000);
    }

    #[test]
    fn ordered_rates_give_ordered_prices() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        for _ in 0..1000 {
            let low = rng.gen_range(0.0..1000.0);
            let mid = low + rng.gen_range(0.0..500.0);
            let high = mid + rng.gen_range(0.0..500.0);
            let squares = rng.gen_range(0.0..500.0);
            let waste = [10, 12, 15, 18][rng.gen_range(0..4)];
            let prices = calculate_prices(squares, waste, &PricingRates::new(low, mid, high));
            assert!(prices.low <= prices.mid, "{prices:?}");
            assert!(prices.mid <= prices.high, "{prices:?}");
        }
    }
}
