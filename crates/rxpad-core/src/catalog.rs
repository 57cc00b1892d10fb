//! # Reference Catalogs
//!
//! Static, read-only code lists the engine validates and computes against:
//! frequencies, routes, timings, dosage units and duration units.
//!
//! The engine does not source this data. The host loads it (from its terminology
//! service, config files, whatever it uses) and injects it once at construction.
//! All lookups are exact-match on `code`; there is no fuzzy matching.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Catalog Entry Types
// =============================================================================

/// An administration frequency (e.g., "Twice a day").
///
/// `times_per_day` is the daily multiplier used by the dispense-quantity
/// calculation. It is fractional for frequencies below daily: "Thrice a week"
/// carries 3.0 / 7.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FrequencyEntry {
    pub code: String,
    pub display: String,
    pub times_per_day: f64,
}

/// An administration route (e.g., "Oral").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RouteEntry {
    pub code: String,
    pub display: String,
}

/// A timing qualifier (e.g., "Before meals").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TimingEntry {
    pub code: String,
    pub display: String,
}

/// A dosage unit (e.g., "Tablet", "mg").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DosageUnitEntry {
    pub code: String,
    pub display: String,
}

/// A duration unit (e.g., "Week").
///
/// `days_multiplier` converts a duration magnitude into days: Day = 1,
/// Week = 7, Month = 30.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DurationUnitEntry {
    pub code: String,
    pub display: String,
    pub days_multiplier: f64,
}

// =============================================================================
// Reference Catalogs
// =============================================================================

/// The full set of injected code lists.
///
/// Treated as immutable for the lifetime of the pad. The engine only reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReferenceCatalogs {
    pub frequencies: Vec<FrequencyEntry>,
    pub routes: Vec<RouteEntry>,
    pub timings: Vec<TimingEntry>,
    pub dosage_units: Vec<DosageUnitEntry>,
    pub duration_units: Vec<DurationUnitEntry>,
}

impl ReferenceCatalogs {
    /// Looks up a frequency by code.
    pub fn frequency(&self, code: &str) -> Option<&FrequencyEntry> {
        self.frequencies.iter().find(|f| f.code == code)
    }

    /// Looks up a route by code.
    pub fn route(&self, code: &str) -> Option<&RouteEntry> {
        self.routes.iter().find(|r| r.code == code)
    }

    /// Looks up a timing qualifier by code.
    pub fn timing(&self, code: &str) -> Option<&TimingEntry> {
        self.timings.iter().find(|t| t.code == code)
    }

    /// Looks up a dosage unit by code.
    pub fn dosage_unit(&self, code: &str) -> Option<&DosageUnitEntry> {
        self.dosage_units.iter().find(|u| u.code == code)
    }

    /// Looks up a duration unit by code.
    pub fn duration_unit(&self, code: &str) -> Option<&DurationUnitEntry> {
        self.duration_units.iter().find(|u| u.code == code)
    }
}

// =============================================================================
// Order Defaults
// =============================================================================

/// Initial field values for a freshly added order, supplied by the host.
///
/// A host typically points the codes at its most common selections (oral
/// route, once-a-day frequency) so the clinician edits as little as possible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderDefaults {
    /// Default quantity per administration.
    pub dosage: f64,

    /// Default dosage-unit code. Empty = clinician must pick.
    pub dosage_unit: String,

    /// Default frequency code. Empty = clinician must pick.
    pub frequency: String,

    /// Default route code. Empty = clinician must pick.
    pub route: String,

    /// Default duration magnitude.
    pub duration: f64,

    /// Default duration-unit code. Empty = clinician must pick.
    pub duration_unit: String,
}

impl Default for OrderDefaults {
    /// Dosage 1, duration 0, no pre-selected codes.
    fn default() -> Self {
        OrderDefaults {
            dosage: 1.0,
            dosage_unit: String::new(),
            frequency: String::new(),
            route: String::new(),
            duration: 0.0,
            duration_unit: String::new(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
