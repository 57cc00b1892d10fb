//! # rxpad-core: Pure Business Logic for RxPad
//!
//! This crate is the **heart** of RxPad: the order-composition engine a
//! clinician drives while building a prescription. It contains all business
//! logic as pure functions and in-memory state transitions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RxPad Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Frontend (rendering layer)                      │   │
//! │  │   Catalog Search ──► Order Pad UI ──► Inline Errors ──► Submit  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ host command layer                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rxpad-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │    pad    │  │ validation│  │   │
//! │  │   │OrderEntry │  │ Frequency │  │ OrderPad  │  │   rules   │  │   │
//! │  │   │OrderField │  │ Duration  │  │ add/update│  │  tokens   │  │   │
//! │  │   └───────────┘  │   units   │  │ /validate │  └───────────┘  │   │
//! │  │                  └───────────┘  └───────────┘  ┌───────────┐  │   │
//! │  │                                                │ quantity  │  │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK            │ dispense  │  │   │
//! │  │                                                │   math    │  │   │
//! │  │                                                └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        External collaborators (out of this crate)               │   │
//! │  │  Medication catalog lookup, reference-catalog config, FHIR,     │   │
//! │  │  persistence, audit                                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MedicationRef, OrderEntry, OrderField)
//! - [`catalog`] - Injected reference catalogs and order defaults
//! - [`pad`] - The order pad: add/remove/update, validate, reset
//! - [`validation`] - Required-field rule table and error tokens
//! - [`quantity`] - Dispense quantity arithmetic
//! - [`error`] - Pad-level refusal types
//!
//! ## Design Principles
//!
//! 1. **Replace-on-write**: every mutation swaps in a freshly-built entry
//!    list, so snapshots are always internally consistent
//! 2. **One-directional errors**: field edits can only CLEAR validation
//!    errors; only `validate_all` can set them
//! 3. **No I/O**: catalogs and defaults are injected; the engine never
//!    fetches anything
//! 4. **Degrade, don't fail**: display math returns 0 on unresolvable codes
//!    instead of erroring
//!
//! ## Example Usage
//!
//! ```rust
//! use rxpad_core::{MedicationRef, OrderDefaults, OrderPad, ReferenceCatalogs};
//!
//! let mut pad = OrderPad::new(ReferenceCatalogs::default(), OrderDefaults::default());
//!
//! pad.add(&MedicationRef {
//!     id: "a2c9".to_string(),
//!     display: "Amoxicillin".to_string(),
//!     strength: "500 mg".to_string(),
//!     dosage_form: "Capsule".to_string(),
//! })
//! .unwrap();
//!
//! pad.update_dosage("a2c9", 2.0);
//! pad.update_duration("a2c9", 5.0);
//!
//! // Missing frequency/route/units: submission is blocked.
//! assert!(!pad.validate_all());
//! assert!(pad.entries()[0].has_errors());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod pad;
pub mod quantity;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rxpad_core::OrderPad` instead of
// `use rxpad_core::pad::OrderPad`

pub use catalog::{
    DosageUnitEntry, DurationUnitEntry, FrequencyEntry, OrderDefaults, ReferenceCatalogs,
    RouteEntry, TimingEntry,
};
pub use error::{PadError, PadResult};
pub use pad::{OrderPad, OrderPadState};
pub use types::{FieldErrors, MedicationRef, OrderEntry, OrderField};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum entries allowed on a single pad
///
/// ## Business Reason
/// A single prescription never legitimately reaches this many lines; the cap
/// catches a runaway UI loop before it degrades the session.
pub const MAX_PAD_ENTRIES: usize = 50;
