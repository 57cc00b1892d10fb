//! # Validation Module
//!
//! Required-field rules for draft orders.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   One Rule Table, Two Consumers                         │
//! │                                                                         │
//! │  REQUIRED_RULES (field, satisfied, exempt)                              │
//! │       │                                                                 │
//! │       ├──► validate_all (pad.rs)                                        │
//! │       │    Evaluates every rule on every entry from scratch.            │
//! │       │    Failures INSERT the field's token, successes and             │
//! │       │    exemptions REMOVE it. Latches has_been_validated.            │
//! │       │                                                                 │
//! │       └──► field updates (pad.rs)                                       │
//! │            After setting the new value, an update REMOVES the           │
//! │            field's token iff the entry has been validated AND the       │
//! │            rule is now satisfied. Updates never insert tokens.          │
//! │                                                                         │
//! │  Sharing the predicates keeps the clear-on-edit guards and the          │
//! │  validation pass agreeing on what "satisfied" means.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemptions
//! A STAT order is administered immediately, so duration and duration unit
//! are not required while `is_stat` is set. PRN has no effect on validation;
//! it is carried as an independent flag only.

use crate::types::{OrderEntry, OrderField};

// =============================================================================
// Rule Table
// =============================================================================

/// One required-field rule.
///
/// `satisfied` checks the field's current value. `exempt` suspends the rule
/// for entries in a state where the field is not applicable.
pub struct RequiredRule {
    pub field: OrderField,
    satisfied: fn(&OrderEntry) -> bool,
    exempt: fn(&OrderEntry) -> bool,
}

impl RequiredRule {
    /// Checks whether the entry's current value satisfies this rule.
    #[inline]
    pub fn is_satisfied_by(&self, entry: &OrderEntry) -> bool {
        (self.satisfied)(entry)
    }

    /// Checks whether the entry is exempt from this rule.
    #[inline]
    pub fn is_exempt_for(&self, entry: &OrderEntry) -> bool {
        (self.exempt)(entry)
    }
}

fn dosage_positive(entry: &OrderEntry) -> bool {
    entry.dosage > 0.0
}

fn dosage_unit_present(entry: &OrderEntry) -> bool {
    !entry.dosage_unit.is_empty()
}

fn frequency_present(entry: &OrderEntry) -> bool {
    !entry.frequency.is_empty()
}

fn route_present(entry: &OrderEntry) -> bool {
    !entry.route.is_empty()
}

fn duration_positive(entry: &OrderEntry) -> bool {
    entry.duration > 0.0
}

fn duration_unit_present(entry: &OrderEntry) -> bool {
    !entry.duration_unit.is_empty()
}

fn stat_exempt(entry: &OrderEntry) -> bool {
    entry.is_stat
}

fn never_exempt(_entry: &OrderEntry) -> bool {
    false
}

/// The required-field rules, one row per validated field.
pub static REQUIRED_RULES: [RequiredRule; 6] = [
    RequiredRule {
        field: OrderField::Dosage,
        satisfied: dosage_positive,
        exempt: never_exempt,
    },
    RequiredRule {
        field: OrderField::DosageUnit,
        satisfied: dosage_unit_present,
        exempt: never_exempt,
    },
    RequiredRule {
        field: OrderField::Frequency,
        satisfied: frequency_present,
        exempt: never_exempt,
    },
    RequiredRule {
        field: OrderField::Route,
        satisfied: route_present,
        exempt: never_exempt,
    },
    RequiredRule {
        field: OrderField::Duration,
        satisfied: duration_positive,
        exempt: stat_exempt,
    },
    RequiredRule {
        field: OrderField::DurationUnit,
        satisfied: duration_unit_present,
        exempt: stat_exempt,
    },
];

/// Returns the rule for a validated field.
pub fn rule_for(field: OrderField) -> &'static RequiredRule {
    REQUIRED_RULES
        .iter()
        .find(|rule| rule.field == field)
        .expect("every OrderField has a rule")
}

// =============================================================================
// Rule Application
// =============================================================================

/// Runs the full rule table against one entry.
///
/// ## Behavior
/// - Failing rule: inserts the field's fixed token
/// - Passing or exempt rule: removes any stale token for the field
/// - Latches `has_been_validated` regardless of outcome
///
/// Unlike field updates, this re-evaluates everything from scratch, so it can
/// move a field back from valid to invalid.
pub fn apply_required_rules(entry: &mut OrderEntry) {
    for rule in &REQUIRED_RULES {
        if rule.is_exempt_for(entry) || rule.is_satisfied_by(entry) {
            entry.errors.remove(&rule.field);
        } else {
            entry
                .errors
                .insert(rule.field, rule.field.error_token().to_string());
        }
    }
    entry.has_been_validated = true;
}

/// Checks whether an edit to `field` clears the field's error.
///
/// Called by the pad AFTER the new value has been applied. True iff the entry
/// has already been through a validation pass and the new value satisfies the
/// field's rule. Before the first `validate_all` there is nothing to clear,
/// and updates never add errors, so unvalidated entries stay untouched.
pub fn update_clears(field: OrderField, entry: &OrderEntry) -> bool {
    entry.has_been_validated && rule_for(field).is_satisfied_by(entry)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OrderDefaults;
    use crate::types::MedicationRef;
    use chrono::NaiveDate;

    fn blank_entry() -> OrderEntry {
        let med = MedicationRef {
            id: "med-1".to_string(),
            display: "Paracetamol".to_string(),
            strength: "650 mg".to_string(),
            dosage_form: "Tablet".to_string(),
        };
        OrderEntry::draft(
            &med,
            &OrderDefaults::default(),
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        )
    }

    fn filled_entry() -> OrderEntry {
        let mut entry = blank_entry();
        entry.dosage = 2.0;
        entry.dosage_unit = "tab".to_string();
        entry.frequency = "bd".to_string();
        entry.route = "po".to_string();
        entry.duration = 5.0;
        entry.duration_unit = "d".to_string();
        entry
    }

    #[test]
    fn test_table_covers_exactly_the_validated_fields() {
        let fields: Vec<OrderField> = REQUIRED_RULES.iter().map(|r| r.field).collect();
        assert_eq!(fields, OrderField::ALL);
    }

    #[test]
    fn test_blank_entry_fails_everything_except_default_dosage() {
        let mut entry = blank_entry();
        apply_required_rules(&mut entry);

        assert!(entry.has_been_validated);
        // Default dosage is 1, which passes; the five unset fields fail.
        assert_eq!(entry.error(OrderField::Dosage), None);
        assert_eq!(entry.error(OrderField::DosageUnit), Some("SELECT_DOSAGE_UNIT"));
        assert_eq!(entry.error(OrderField::Frequency), Some("SELECT_FREQUENCY"));
        assert_eq!(entry.error(OrderField::Route), Some("SELECT_ROUTE"));
        assert_eq!(entry.error(OrderField::Duration), Some("ENTER_DURATION"));
        assert_eq!(entry.error(OrderField::DurationUnit), Some("SELECT_DURATION_UNIT"));
    }

    #[test]
    fn test_complete_entry_passes() {
        let mut entry = filled_entry();
        apply_required_rules(&mut entry);

        assert!(entry.has_been_validated);
        assert!(!entry.has_errors());
    }

    #[test]
    fn test_zero_dosage_fails() {
        let mut entry = filled_entry();
        entry.dosage = 0.0;
        apply_required_rules(&mut entry);
        assert_eq!(entry.error(OrderField::Dosage), Some("ENTER_DOSAGE"));

        entry.dosage = -1.0;
        apply_required_rules(&mut entry);
        assert_eq!(entry.error(OrderField::Dosage), Some("ENTER_DOSAGE"));
    }

    #[test]
    fn test_stat_exempts_duration_pair_only() {
        let mut entry = blank_entry();
        entry.is_stat = true;
        apply_required_rules(&mut entry);

        assert_eq!(entry.error(OrderField::Duration), None);
        assert_eq!(entry.error(OrderField::DurationUnit), None);
        // The other required fields still fail.
        assert_eq!(entry.error(OrderField::Frequency), Some("SELECT_FREQUENCY"));
        assert_eq!(entry.error(OrderField::Route), Some("SELECT_ROUTE"));
    }

    #[test]
    fn test_prn_does_not_exempt_duration() {
        let mut entry = blank_entry();
        entry.is_prn = true;
        apply_required_rules(&mut entry);

        assert_eq!(entry.error(OrderField::Duration), Some("ENTER_DURATION"));
        assert_eq!(entry.error(OrderField::DurationUnit), Some("SELECT_DURATION_UNIT"));
    }

    #[test]
    fn test_reapplying_rules_clears_stale_tokens() {
        let mut entry = blank_entry();
        apply_required_rules(&mut entry);
        assert!(entry.has_errors());

        entry.dosage_unit = "tab".to_string();
        entry.frequency = "od".to_string();
        entry.route = "po".to_string();
        entry.duration = 3.0;
        entry.duration_unit = "d".to_string();
        apply_required_rules(&mut entry);

        assert!(!entry.has_errors());
    }

    #[test]
    fn test_reapplying_rules_is_idempotent() {
        let mut entry = blank_entry();
        apply_required_rules(&mut entry);
        let first = entry.clone();

        apply_required_rules(&mut entry);
        assert_eq!(entry, first);
    }

    #[test]
    fn test_update_clears_requires_prior_validation() {
        let mut entry = filled_entry();
        // Never validated: nothing to clear, regardless of value.
        assert!(!update_clears(OrderField::Dosage, &entry));

        apply_required_rules(&mut entry);
        assert!(update_clears(OrderField::Dosage, &entry));

        entry.dosage = 0.0;
        assert!(!update_clears(OrderField::Dosage, &entry));
    }
}
