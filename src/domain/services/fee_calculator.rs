//! Rental cost, late fee and damage fee rules.

use crate::domain::value_objects::{DateRange, EquipmentCondition, Money};

/// Damage fee charged per number of degradation levels (index = levels).
///
/// Four or more levels are charged the last entry.
const DAMAGE_FEE_BANDS: [Money; 5] = [
    Money::ZERO,
    Money::from_dollars(50),
    Money::from_dollars(150),
    Money::from_dollars(300),
    Money::from_dollars(500),
];

/// Late days are charged at 150% of the daily rate.
pub const LATE_FEE_RATE_PERCENT: u32 = 150;

/// Damage fee for a condition change observed at return.
///
/// Zero when the condition is unchanged or improved.
pub fn damage_fee(before: EquipmentCondition, after: EquipmentCondition) -> Money {
    damage_fee_for_levels(after.degradation_from(before))
}

pub fn damage_fee_for_levels(levels: u8) -> Money {
    let band = usize::from(levels).min(DAMAGE_FEE_BANDS.len() - 1);
    DAMAGE_FEE_BANDS[band]
}

/// Base cost of a rental: daily rate times days, less the tier discount.
pub fn rental_cost(daily_rate: Money, period: &DateRange, discount_pct: u8) -> Money {
    daily_rate.multiply(period.days()).apply_discount(discount_pct)
}

/// Late fee for `days_overdue` days, less the tier discount.
pub fn late_fee(daily_rate: Money, days_overdue: u32, discount_pct: u8) -> Money {
    if days_overdue == 0 {
        return Money::ZERO;
    }
    daily_rate
        .multiply(days_overdue)
        .percentage(LATE_FEE_RATE_PERCENT)
        .apply_discount(discount_pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use EquipmentCondition::*;

    #[test]
    fn test_no_fee_when_unchanged_or_improved() {
        for before in EquipmentCondition::ALL {
            for after in EquipmentCondition::ALL.into_iter().filter(|a| *a <= before) {
                assert_eq!(damage_fee(before, after), Money::ZERO, "{before} -> {after}");
            }
        }
    }

    #[test]
    fn test_fee_bands() {
        assert_eq!(damage_fee(Excellent, Good), Money::from_dollars(50));
        assert_eq!(damage_fee(Excellent, Fair), Money::from_dollars(150));
        assert_eq!(damage_fee(Excellent, Poor), Money::from_dollars(300));
        assert_eq!(damage_fee(Excellent, Damaged), Money::from_dollars(500));
        assert_eq!(damage_fee(Excellent, UnderRepair), Money::from_dollars(500));
    }

    #[test]
    fn test_two_level_degradation_costs_150() {
        assert_eq!(damage_fee(Good, Poor), Money::from_dollars(150));
        assert_eq!(damage_fee(Fair, Damaged), Money::from_dollars(150));
    }

    #[test]
    fn test_good_to_damaged_is_three_levels() {
        assert_eq!(Damaged.degradation_from(Good), 3);
        assert_eq!(damage_fee(Good, Damaged), Money::from_dollars(300));
    }

    #[test]
    fn test_fee_monotonic_in_levels() {
        let fees: Vec<Money> = (0..=6).map(damage_fee_for_levels).collect();
        assert!(fees.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_rental_cost_with_discount() {
        let period = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
        )
        .unwrap();

        let rate = Money::from_dollars(25);
        assert_eq!(rental_cost(rate, &period, 0), Money::from_dollars(100));
        assert_eq!(rental_cost(rate, &period, 10), Money::from_dollars(90));
    }

    #[test]
    fn test_late_fee() {
        let rate = Money::from_dollars(20);
        assert_eq!(late_fee(rate, 0, 0), Money::ZERO);
        // 2 days * $20 * 1.5 = $60
        assert_eq!(late_fee(rate, 2, 0), Money::from_dollars(60));
        // 15% off $60 = $51
        assert_eq!(late_fee(rate, 2, 15), Money::from_dollars(51));
    }
}
