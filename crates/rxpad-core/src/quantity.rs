//! # Dispense Quantity Module
//!
//! Derives the total number of dispense units for one draft order.
//!
//! ## The Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  times_per_day   = frequency catalog lookup                             │
//! │  days_multiplier = duration-unit catalog lookup                         │
//! │                                                                         │
//! │  total_days      = duration × days_multiplier                           │
//! │  total_quantity  = ⌈ dosage × times_per_day × total_days ⌉              │
//! │                                                                         │
//! │  Example: 2 tablets, twice a day, for 5 days                            │
//! │           ⌈ 2 × 2 × (5 × 1) ⌉ = 20 tablets                              │
//! │                                                                         │
//! │  Example: half a tablet, thrice a week, for 1 week                      │
//! │           ⌈ 0.5 × 3/7 × (1 × 7) ⌉ = ⌈1.5⌉ = 2 tablets                   │
//! │                                                                         │
//! │  CEILING, NEVER FLOOR: a pharmacy cannot issue half a tablet strip,     │
//! │  so fractional results round up to the next whole dispense unit.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculation is informational display math. It never blocks validation
//! or submission: an unresolvable frequency or duration-unit code degrades to
//! a quantity of 0 instead of failing.

use crate::catalog::ReferenceCatalogs;
use crate::types::OrderEntry;

// =============================================================================
// Quantity Calculation
// =============================================================================

/// Computes the total dispense quantity for one entry.
///
/// ## Rules
/// - Unknown `frequency` or `duration_unit` code: returns 0
/// - Non-positive result (zero dosage, zero duration): returns 0
/// - Fractional result: rounded up
///
/// Pure function: reads the entry and the catalogs, mutates nothing, and does
/// not require the entry to have passed validation.
pub fn total_quantity(entry: &OrderEntry, catalogs: &ReferenceCatalogs) -> u32 {
    let frequency = match catalogs.frequency(&entry.frequency) {
        Some(frequency) => frequency,
        None => return 0,
    };
    let duration_unit = match catalogs.duration_unit(&entry.duration_unit) {
        Some(unit) => unit,
        None => return 0,
    };

    let total_days = entry.duration * duration_unit.days_multiplier;
    let raw = entry.dosage * frequency.times_per_day * total_days;

    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }

    let units = raw.ceil();
    if units >= u32::MAX as f64 {
        u32::MAX
    } else {
        units as u32
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DurationUnitEntry, FrequencyEntry, OrderDefaults};
    use crate::types::MedicationRef;
    use chrono::NaiveDate;

    fn test_catalogs() -> ReferenceCatalogs {
        ReferenceCatalogs {
            frequencies: vec![
                FrequencyEntry {
                    code: "bd".to_string(),
                    display: "Twice a day".to_string(),
                    times_per_day: 2.0,
                },
                FrequencyEntry {
                    code: "tiw".to_string(),
                    display: "Thrice a week".to_string(),
                    times_per_day: 3.0 / 7.0,
                },
            ],
            duration_units: vec![
                DurationUnitEntry {
                    code: "d".to_string(),
                    display: "Day".to_string(),
                    days_multiplier: 1.0,
                },
                DurationUnitEntry {
                    code: "wk".to_string(),
                    display: "Week".to_string(),
                    days_multiplier: 7.0,
                },
            ],
            ..ReferenceCatalogs::default()
        }
    }

    fn entry(dosage: f64, frequency: &str, duration: f64, duration_unit: &str) -> OrderEntry {
        let med = MedicationRef {
            id: "med-1".to_string(),
            display: "Metformin".to_string(),
            strength: "500 mg".to_string(),
            dosage_form: "Tablet".to_string(),
        };
        let mut entry = OrderEntry::draft(
            &med,
            &OrderDefaults::default(),
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        );
        entry.dosage = dosage;
        entry.frequency = frequency.to_string();
        entry.duration = duration;
        entry.duration_unit = duration_unit.to_string();
        entry
    }

    #[test]
    fn test_whole_unit_quantity() {
        // 2 per dose × 2 per day × 5 days = 20
        let entry = entry(2.0, "bd", 5.0, "d");
        assert_eq!(total_quantity(&entry, &test_catalogs()), 20);
    }

    #[test]
    fn test_duration_unit_multiplier() {
        // 1 per dose × 2 per day × (2 weeks = 14 days) = 28
        let entry = entry(1.0, "bd", 2.0, "wk");
        assert_eq!(total_quantity(&entry, &test_catalogs()), 28);
    }

    #[test]
    fn test_fractional_result_rounds_up() {
        // 0.5 per dose × 3/7 per day × 7 days = 1.5 → 2
        let entry = entry(0.5, "tiw", 1.0, "wk");
        assert_eq!(total_quantity(&entry, &test_catalogs()), 2);
    }

    #[test]
    fn test_unknown_frequency_degrades_to_zero() {
        let entry = entry(2.0, "no-such-code", 5.0, "d");
        assert_eq!(total_quantity(&entry, &test_catalogs()), 0);
    }

    #[test]
    fn test_unknown_duration_unit_degrades_to_zero() {
        let entry = entry(2.0, "bd", 5.0, "fortnight");
        assert_eq!(total_quantity(&entry, &test_catalogs()), 0);
    }

    #[test]
    fn test_zero_inputs_yield_zero() {
        assert_eq!(total_quantity(&entry(0.0, "bd", 5.0, "d"), &test_catalogs()), 0);
        assert_eq!(total_quantity(&entry(2.0, "bd", 0.0, "d"), &test_catalogs()), 0);
    }

    #[test]
    fn test_calculation_is_pure() {
        let entry = entry(2.0, "bd", 5.0, "d");
        let catalogs = test_catalogs();
        let before = entry.clone();

        let first = total_quantity(&entry, &catalogs);
        let second = total_quantity(&entry, &catalogs);

        assert_eq!(first, second);
        assert_eq!(entry, before);
    }
}
