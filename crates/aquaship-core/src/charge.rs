//! Weight-based delivery-charge computation.
//!
//! The storefront charges a minimum of one kilogram's rate per shipment,
//! scaling linearly with exact weight above that floor.

/// Default per-kilogram rate when no resolved shipping cost overrides it.
pub const DEFAULT_PER_KG_RATE: f64 = 90.0;

/// A cart line item's contribution to shipment weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineWeight {
    pub unit_weight_grams: f64,
    pub quantity: u32,
}

/// Sums `unit_weight_grams × quantity` over the cart.
#[must_use]
pub fn total_weight_grams(items: &[LineWeight]) -> f64 {
    items
        .iter()
        .map(|item| item.unit_weight_grams * f64::from(item.quantity))
        .sum()
}

/// Computes the delivery charge for a shipment.
///
/// Zero or negative weight means no physical shipment and costs nothing
/// (negative weight is a caller bug and is clamped, not propagated).
/// Otherwise the charge is `max(rate, rate × kg)` rounded to two decimals,
/// so anything up to one kilogram pays exactly the flat rate.
#[must_use]
pub fn delivery_charge(total_weight_grams: f64, per_kg_rate: f64) -> f64 {
    if total_weight_grams <= 0.0 {
        return 0.0;
    }
    let scaled = round2(per_kg_rate * (total_weight_grams / 1000.0));
    round2(per_kg_rate.max(scaled))
}

/// Standard half-up rounding to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_dominates_at_or_below_one_kg() {
        for grams in [1.0, 250.0, 500.0, 999.0, 1000.0] {
            assert_eq!(delivery_charge(grams, 90.0), 90.0, "grams = {grams}");
        }
    }

    #[test]
    fn scales_linearly_above_floor() {
        assert_eq!(delivery_charge(2000.0, 90.0), 180.0);
        assert_eq!(delivery_charge(1500.0, 90.0), 135.0);
    }

    #[test]
    fn zero_weight_costs_nothing() {
        assert_eq!(delivery_charge(0.0, 90.0), 0.0);
    }

    #[test]
    fn negative_weight_is_clamped_to_zero() {
        assert_eq!(delivery_charge(-500.0, 90.0), 0.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        // 1234 g × 90/kg = 111.06
        assert_eq!(delivery_charge(1234.0, 90.0), 111.06);
        // 1111 g × 90/kg = 99.99
        assert_eq!(delivery_charge(1111.0, 90.0), 99.99);
    }

    #[test]
    fn respects_resolved_rate_override() {
        assert_eq!(delivery_charge(500.0, 150.0), 150.0);
        assert_eq!(delivery_charge(2000.0, 150.0), 300.0);
    }

    #[test]
    fn total_weight_sums_line_items() {
        let items = [
            LineWeight {
                unit_weight_grams: 250.0,
                quantity: 2,
            },
            LineWeight {
                unit_weight_grams: 1000.0,
                quantity: 1,
            },
        ];
        assert_eq!(total_weight_grams(&items), 1500.0);
    }

    #[test]
    fn total_weight_of_empty_cart_is_zero() {
        assert_eq!(total_weight_grams(&[]), 0.0);
    }
}
