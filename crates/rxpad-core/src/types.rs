//! # Domain Types
//!
//! Core domain types for the order pad.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ MedicationRef   │   │   OrderEntry    │   │   OrderField    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (concept)   │──►│  id (concept)   │   │  Dosage         │       │
//! │  │  display        │   │  dosage, route  │   │  DosageUnit     │       │
//! │  │  strength       │   │  frequency      │   │  Frequency      │       │
//! │  │  dosage_form    │   │  duration       │   │  Route          │       │
//! │  └─────────────────┘   │  errors         │   │  Duration       │       │
//! │   (from the external   │  has_been_      │   │  DurationUnit   │       │
//! │    medication catalog) │    validated    │   └─────────────────┘       │
//! │                        └─────────────────┘    (the six validated       │
//! │                                                fields, nothing else)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! An entry's `id` is the medication concept id from the catalog. It is the
//! sole lookup key for every mutation and must be unique within the pad.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::OrderDefaults;

// =============================================================================
// Medication Reference
// =============================================================================

/// A medication record from the external catalog, used as input to `add`.
///
/// The engine never fetches or caches these; the host's catalog search hands
/// one over when the clinician picks a medication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MedicationRef {
    /// Medication concept id. Unique within the catalog.
    pub id: String,

    /// Display name shown on the pad and on the printed prescription.
    pub display: String,

    /// Strength of the preparation (e.g., "500 mg").
    pub strength: String,

    /// Dosage form of the preparation (e.g., "Tablet", "Syrup").
    pub dosage_form: String,
}

// =============================================================================
// Order Field
// =============================================================================

/// The fields of an [`OrderEntry`] covered by required-field validation.
///
/// Exactly these six fields may appear as keys of [`OrderEntry::errors`].
/// Descriptive fields, flags, timing, start date and instructions are never
/// validated and never carry errors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum OrderField {
    Dosage,
    DosageUnit,
    Frequency,
    Route,
    Duration,
    DurationUnit,
}

impl OrderField {
    /// All validated fields, in display order.
    pub const ALL: [OrderField; 6] = [
        OrderField::Dosage,
        OrderField::DosageUnit,
        OrderField::Frequency,
        OrderField::Route,
        OrderField::Duration,
        OrderField::DurationUnit,
    ];

    /// The wire name of the field (matches the serialized entry key).
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderField::Dosage => "dosage",
            OrderField::DosageUnit => "dosageUnit",
            OrderField::Frequency => "frequency",
            OrderField::Route => "route",
            OrderField::Duration => "duration",
            OrderField::DurationUnit => "durationUnit",
        }
    }

    /// The fixed error token recorded when this field fails validation.
    ///
    /// Tokens are message keys. The rendering layer owns the translation to
    /// user-facing text.
    pub const fn error_token(&self) -> &'static str {
        match self {
            OrderField::Dosage => "ENTER_DOSAGE",
            OrderField::DosageUnit => "SELECT_DOSAGE_UNIT",
            OrderField::Frequency => "SELECT_FREQUENCY",
            OrderField::Route => "SELECT_ROUTE",
            OrderField::Duration => "ENTER_DURATION",
            OrderField::DurationUnit => "SELECT_DURATION_UNIT",
        }
    }
}

/// Field-error map of one entry: validated field -> fixed error token.
pub type FieldErrors = BTreeMap<OrderField, String>;

// =============================================================================
// Order Entry
// =============================================================================

/// One draft medication order line being composed on the pad.
///
/// ## Snapshot Pattern
/// `display`, `strength` and `dosage_form` are frozen copies of the catalog
/// record at `add` time. If the catalog changes while the prescription is
/// being composed, the pad keeps showing what the clinician picked.
///
/// ## Error State Machine
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │   unvalidated ──validate_all──► invalid or valid                        │
/// │                                      │                                  │
/// │                                 field edits                             │
/// │                                      │                                  │
/// │                                      ▼                                  │
/// │                                    valid                                │
/// │                                                                         │
/// │   Edits only ever CLEAR errors. New errors appear exclusively on the    │
/// │   next validate_all pass. valid ──► invalid without a validate_all      │
/// │   call cannot happen.                                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderEntry {
    /// Medication concept id (sole lookup key, unique within the pad).
    pub id: String,

    /// Display name at `add` time (frozen).
    pub display: String,

    /// Strength at `add` time (frozen).
    pub strength: String,

    /// Dosage form at `add` time (frozen).
    pub dosage_form: String,

    /// Quantity per administration. Unit-less magnitude.
    pub dosage: f64,

    /// Dosage-unit catalog code. Empty string = not selected yet.
    pub dosage_unit: String,

    /// Frequency catalog code. Empty string = not selected yet.
    pub frequency: String,

    /// Route catalog code. Empty string = not selected yet.
    pub route: String,

    /// Duration magnitude, interpreted through `duration_unit`.
    pub duration: f64,

    /// Duration-unit catalog code. Empty string = not selected yet.
    pub duration_unit: String,

    /// Optional timing qualifier code (e.g., before meals).
    pub timing: Option<String>,

    /// Administer immediately. Exempts the order from duration requirements.
    pub is_stat: bool,

    /// Administer as needed.
    pub is_prn: bool,

    /// First day of administration. Defaults to the day the entry was added.
    #[ts(as = "String")]
    pub start_date: NaiveDate,

    /// Free-text instructions for the patient.
    pub instructions: Option<String>,

    /// Validation failures by field. Only `validate_all` inserts keys here;
    /// field updates may only remove them.
    pub errors: FieldErrors,

    /// Latched true by the first `validate_all` pass, never reset by edits.
    pub has_been_validated: bool,
}

impl OrderEntry {
    /// Creates a fresh draft entry for a medication.
    ///
    /// ## Initial State
    /// - Identity fields copied from the catalog record
    /// - Numeric fields and codes from [`OrderDefaults`]
    /// - Flags false, no timing, no instructions
    /// - `errors` empty, `has_been_validated` false
    pub fn draft(med: &MedicationRef, defaults: &OrderDefaults, start_date: NaiveDate) -> Self {
        OrderEntry {
            id: med.id.clone(),
            display: med.display.clone(),
            strength: med.strength.clone(),
            dosage_form: med.dosage_form.clone(),
            dosage: defaults.dosage,
            dosage_unit: defaults.dosage_unit.clone(),
            frequency: defaults.frequency.clone(),
            route: defaults.route.clone(),
            duration: defaults.duration,
            duration_unit: defaults.duration_unit.clone(),
            timing: None,
            is_stat: false,
            is_prn: false,
            start_date,
            instructions: None,
            errors: FieldErrors::new(),
            has_been_validated: false,
        }
    }

    /// Checks whether any validated field currently carries an error.
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the error token for a field, if one is recorded.
    #[inline]
    pub fn error(&self, field: OrderField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_med() -> MedicationRef {
        MedicationRef {
            id: uuid::Uuid::new_v4().to_string(),
            display: "Amoxicillin".to_string(),
            strength: "500 mg".to_string(),
            dosage_form: "Capsule".to_string(),
        }
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn test_draft_starts_clean() {
        let med = test_med();
        let entry = OrderEntry::draft(&med, &OrderDefaults::default(), test_date());

        assert_eq!(entry.id, med.id);
        assert_eq!(entry.display, "Amoxicillin");
        assert_eq!(entry.dosage, 1.0);
        assert_eq!(entry.duration, 0.0);
        assert!(!entry.is_stat);
        assert!(!entry.is_prn);
        assert!(entry.errors.is_empty());
        assert!(!entry.has_been_validated);
        assert_eq!(entry.start_date, test_date());
    }

    #[test]
    fn test_draft_applies_configured_defaults() {
        let defaults = OrderDefaults {
            dosage: 1.0,
            dosage_unit: "tab".to_string(),
            frequency: "od".to_string(),
            route: "po".to_string(),
            duration: 0.0,
            duration_unit: "d".to_string(),
        };
        let entry = OrderEntry::draft(&test_med(), &defaults, test_date());

        assert_eq!(entry.dosage_unit, "tab");
        assert_eq!(entry.frequency, "od");
        assert_eq!(entry.route, "po");
        assert_eq!(entry.duration_unit, "d");
    }

    #[test]
    fn test_error_tokens_are_fixed_per_field() {
        assert_eq!(OrderField::Dosage.error_token(), "ENTER_DOSAGE");
        assert_eq!(OrderField::Duration.error_token(), "ENTER_DURATION");
        assert_eq!(OrderField::Route.error_token(), "SELECT_ROUTE");

        // Every validated field has a distinct token.
        let mut tokens: Vec<&str> = OrderField::ALL.iter().map(|f| f.error_token()).collect();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), OrderField::ALL.len());
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = OrderEntry::draft(&test_med(), &OrderDefaults::default(), test_date());
        let json = serde_json::to_value(&entry).unwrap();

        let object = json.as_object().unwrap();
        assert!(object.contains_key("dosageForm"));
        assert!(object.contains_key("dosageUnit"));
        assert!(object.contains_key("durationUnit"));
        assert!(object.contains_key("isStat"));
        assert!(object.contains_key("isPrn"));
        assert!(object.contains_key("startDate"));
        assert!(object.contains_key("hasBeenValidated"));
        assert_eq!(json["startDate"], "2026-03-14");
    }

    #[test]
    fn test_error_map_serializes_field_names_as_keys() {
        let mut entry = OrderEntry::draft(&test_med(), &OrderDefaults::default(), test_date());
        entry
            .errors
            .insert(OrderField::DurationUnit, OrderField::DurationUnit.error_token().to_string());

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["errors"]["durationUnit"], "SELECT_DURATION_UNIT");
    }
}
