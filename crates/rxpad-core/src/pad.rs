//! # Order Pad
//!
//! The editable collection of draft medication orders.
//!
//! ## Pad Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Pad Operations                                │
//! │                                                                         │
//! │  Frontend Action          Pad Operation            Entry State Change   │
//! │  ───────────────          ─────────────            ──────────────────   │
//! │                                                                         │
//! │  Pick Medication ────────► add() ────────────────► prepend draft entry  │
//! │                                                                         │
//! │  Edit a field ───────────► update_dosage() etc. ─► set field,           │
//! │                                                    maybe clear error    │
//! │                                                                         │
//! │  Toggle STAT ────────────► update_stat() ────────► set flag, drop       │
//! │                                                    duration errors      │
//! │                                                                         │
//! │  Click Remove ───────────► remove() ─────────────► filter entry out     │
//! │                                                                         │
//! │  Submit ─────────────────► validate_all() ───────► tokens in/out,       │
//! │                                                    latch validated      │
//! │                                                                         │
//! │  Quantity column ────────► calculate_total_quantity()    (read only)    │
//! │                                                                         │
//! │  Discard ────────────────► reset() ──────────────► empty pad            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Replace-On-Write
//! Every mutation rebuilds the entry list and swaps it in wholesale. An
//! observer that took a snapshot before the mutation keeps a fully-consistent
//! view; there is no state in which a snapshot shows a half-applied update.
//!
//! ## Ordering
//! New entries are PREPENDED: the pad shows the most recently picked
//! medication first, where the clinician is about to edit it.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::catalog::{OrderDefaults, ReferenceCatalogs};
use crate::error::{PadError, PadResult};
use crate::quantity;
use crate::types::{MedicationRef, OrderEntry, OrderField};
use crate::validation;
use crate::MAX_PAD_ENTRIES;

// =============================================================================
// Order Pad
// =============================================================================

/// The in-memory collection of draft orders for one prescription session.
///
/// ## Invariants
/// - Entry ids are unique (enforced by `add`)
/// - Entries appear newest first
/// - `errors` maps only ever gain keys inside `validate_all`
/// - Catalogs and defaults are read-only for the lifetime of the pad
#[derive(Debug, Clone)]
pub struct OrderPad {
    /// Draft entries, newest first. Replaced wholesale on every mutation.
    entries: Vec<OrderEntry>,

    /// Injected code lists for validation-free lookups and quantity math.
    catalogs: ReferenceCatalogs,

    /// Injected initial field values for new entries.
    defaults: OrderDefaults,
}

impl OrderPad {
    /// Creates an empty pad over the given reference catalogs and defaults.
    pub fn new(catalogs: ReferenceCatalogs, defaults: OrderDefaults) -> Self {
        OrderPad {
            entries: Vec::new(),
            catalogs,
            defaults,
        }
    }

    // -------------------------------------------------------------------------
    // Collection lifecycle
    // -------------------------------------------------------------------------

    /// Adds a draft order for a medication, prepending it to the pad.
    ///
    /// ## Behavior
    /// - Identity fields are frozen from the catalog record
    /// - Numeric fields and codes come from the injected defaults
    /// - `start_date` is today, flags are off, errors empty, unvalidated
    ///
    /// ## Errors
    /// - [`PadError::DuplicateEntry`] if the medication is already on the pad
    /// - [`PadError::PadFull`] at [`MAX_PAD_ENTRIES`] entries
    pub fn add(&mut self, med: &MedicationRef) -> PadResult<()> {
        if self.entries.iter().any(|e| e.id == med.id) {
            return Err(PadError::DuplicateEntry { id: med.id.clone() });
        }
        if self.entries.len() >= MAX_PAD_ENTRIES {
            return Err(PadError::PadFull {
                max: MAX_PAD_ENTRIES,
            });
        }

        debug!(id = %med.id, display = %med.display, "Adding order to pad");

        let entry = OrderEntry::draft(med, &self.defaults, today());
        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(entry);
        next.extend(self.entries.iter().cloned());
        self.entries = next;
        Ok(())
    }

    /// Removes the entry with the given id. Unknown id is a silent no-op.
    pub fn remove(&mut self, id: &str) {
        let next: Vec<OrderEntry> = self
            .entries
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();

        if next.len() == self.entries.len() {
            debug!(id = %id, "Remove ignored: no such order");
            return;
        }

        debug!(id = %id, "Removing order from pad");
        self.entries = next;
    }

    /// Empties the pad.
    pub fn reset(&mut self) {
        debug!(orders = self.entries.len(), "Resetting pad");
        self.entries = Vec::new();
    }

    // -------------------------------------------------------------------------
    // Field updates
    // -------------------------------------------------------------------------
    //
    // Every update locates its entry by id; an unknown id is a silent no-op,
    // tolerating the race between a UI removal and a pending edit. Updates on
    // a validated field clear that field's error iff the new value satisfies
    // the field's rule. Updates NEVER add errors.

    /// Sets the dosage magnitude.
    pub fn update_dosage(&mut self, id: &str, dosage: f64) {
        debug!(id = %id, dosage, "Updating dosage");
        self.update_validated_field(id, OrderField::Dosage, |e| e.dosage = dosage);
    }

    /// Sets the dosage-unit code.
    pub fn update_dosage_unit(&mut self, id: &str, unit: &str) {
        debug!(id = %id, unit = %unit, "Updating dosage unit");
        self.update_validated_field(id, OrderField::DosageUnit, |e| {
            e.dosage_unit = unit.to_string()
        });
    }

    /// Sets the frequency code.
    pub fn update_frequency(&mut self, id: &str, code: &str) {
        debug!(id = %id, code = %code, "Updating frequency");
        self.update_validated_field(id, OrderField::Frequency, |e| {
            e.frequency = code.to_string()
        });
    }

    /// Sets the route code.
    pub fn update_route(&mut self, id: &str, code: &str) {
        debug!(id = %id, code = %code, "Updating route");
        self.update_validated_field(id, OrderField::Route, |e| e.route = code.to_string());
    }

    /// Sets the duration magnitude.
    pub fn update_duration(&mut self, id: &str, duration: f64) {
        debug!(id = %id, duration, "Updating duration");
        self.update_validated_field(id, OrderField::Duration, |e| e.duration = duration);
    }

    /// Sets the duration-unit code.
    pub fn update_duration_unit(&mut self, id: &str, unit: &str) {
        debug!(id = %id, unit = %unit, "Updating duration unit");
        self.update_validated_field(id, OrderField::DurationUnit, |e| {
            e.duration_unit = unit.to_string()
        });
    }

    /// Sets or clears the timing qualifier. Timing is never validated.
    pub fn update_timing(&mut self, id: &str, timing: Option<&str>) {
        debug!(id = %id, timing = ?timing, "Updating timing");
        self.rewrite_entry(id, |e| e.timing = timing.map(str::to_string));
    }

    /// Sets or clears the STAT flag.
    ///
    /// ## Behavior
    /// Turning STAT ON also drops any duration and duration-unit errors,
    /// whatever the current duration value: a STAT order is administered
    /// immediately and needs no duration. Turning STAT OFF only flips the
    /// flag; previously-cleared errors reappear only on the next
    /// `validate_all` pass.
    pub fn update_stat(&mut self, id: &str, is_stat: bool) {
        debug!(id = %id, is_stat, "Updating STAT flag");
        self.rewrite_entry(id, |e| {
            e.is_stat = is_stat;
            if is_stat {
                e.errors.remove(&OrderField::Duration);
                e.errors.remove(&OrderField::DurationUnit);
            }
        });
    }

    /// Sets or clears the PRN flag. PRN has no effect on validation state.
    pub fn update_prn(&mut self, id: &str, is_prn: bool) {
        debug!(id = %id, is_prn, "Updating PRN flag");
        self.rewrite_entry(id, |e| e.is_prn = is_prn);
    }

    /// Sets the first day of administration.
    pub fn update_start_date(&mut self, id: &str, start_date: NaiveDate) {
        debug!(id = %id, start_date = %start_date, "Updating start date");
        self.rewrite_entry(id, |e| e.start_date = start_date);
    }

    /// Sets or clears the free-text instructions.
    pub fn update_instructions(&mut self, id: &str, instructions: Option<&str>) {
        debug!(id = %id, "Updating instructions");
        self.rewrite_entry(id, |e| e.instructions = instructions.map(str::to_string));
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Runs the required-field rules over every entry.
    ///
    /// ## Behavior
    /// - Evaluates all rules from scratch (valid fields can turn invalid here,
    ///   the one place that can happen)
    /// - Latches `has_been_validated` on every entry
    /// - Never runs partially: all entries, all rules
    ///
    /// ## Returns
    /// True iff no entry carries any error afterward.
    pub fn validate_all(&mut self) -> bool {
        let mut next = self.entries.clone();
        for entry in &mut next {
            validation::apply_required_rules(entry);
        }
        self.entries = next;

        let valid = self.entries.iter().all(|e| !e.has_errors());
        debug!(orders = self.entries.len(), valid, "Validated pad");
        valid
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    /// Total dispense quantity for one entry. See [`quantity::total_quantity`].
    ///
    /// Unknown id degrades to 0, matching the calculator's behavior for
    /// unresolvable catalog codes.
    pub fn calculate_total_quantity(&self, id: &str) -> u32 {
        match self.entries.iter().find(|e| e.id == id) {
            Some(entry) => quantity::total_quantity(entry, &self.catalogs),
            None => 0,
        }
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// The current entries, newest first.
    #[inline]
    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    /// Looks up one entry by id.
    pub fn entry(&self, id: &str) -> Option<&OrderEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// An owned snapshot of the current entries for observers.
    pub fn snapshot(&self) -> Vec<OrderEntry> {
        self.entries.clone()
    }

    /// The injected reference catalogs.
    #[inline]
    pub fn catalogs(&self) -> &ReferenceCatalogs {
        &self.catalogs
    }

    /// Number of entries on the pad.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the pad is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Rebuilds the entry list with `mutate` applied to the entry with the
    /// given id, then swaps the new list in. Unknown id is a silent no-op.
    fn rewrite_entry<F>(&mut self, id: &str, mutate: F)
    where
        F: FnOnce(&mut OrderEntry),
    {
        let pos = match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => pos,
            None => {
                debug!(id = %id, "Update ignored: no such order");
                return;
            }
        };

        let mut next = self.entries.clone();
        mutate(&mut next[pos]);
        self.entries = next;
    }

    /// Applies an update to a validated field, then clears that field's error
    /// iff the entry has been validated and the new value satisfies the
    /// field's rule.
    fn update_validated_field<F>(&mut self, id: &str, field: OrderField, set: F)
    where
        F: FnOnce(&mut OrderEntry),
    {
        self.rewrite_entry(id, |entry| {
            set(entry);
            if validation::update_clears(field, entry) {
                entry.errors.remove(&field);
            }
        });
    }
}

/// Today's date in UTC, used as the default start date for new orders.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// =============================================================================
// Managed Pad State
// =============================================================================

/// Shared, lockable pad state for embedders.
///
/// The pad itself is synchronous and single-threaded. Hosts whose command
/// layer runs handlers on multiple threads wrap it here:
/// - `Arc`: shared ownership across threads
/// - `Mutex`: one mutation at a time
#[derive(Debug)]
pub struct OrderPadState {
    pad: Arc<Mutex<OrderPad>>,
}

impl OrderPadState {
    /// Creates managed state around an empty pad.
    pub fn new(catalogs: ReferenceCatalogs, defaults: OrderDefaults) -> Self {
        OrderPadState {
            pad: Arc::new(Mutex::new(OrderPad::new(catalogs, defaults))),
        }
    }

    /// Executes a function with read access to the pad.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let orders = pad_state.with_pad(|pad| pad.snapshot());
    /// ```
    pub fn with_pad<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderPad) -> R,
    {
        let pad = self.pad.lock().expect("Pad mutex poisoned");
        f(&pad)
    }

    /// Executes a function with write access to the pad.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// pad_state.with_pad_mut(|pad| pad.add(&medication))?;
    /// ```
    pub fn with_pad_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderPad) -> R,
    {
        let mut pad = self.pad.lock().expect("Pad mutex poisoned");
        f(&mut pad)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
