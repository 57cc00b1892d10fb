//! # Error Types
//!
//! Pad-level errors for rxpad-core.
//!
//! ## Two Error Surfaces
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Field validation failures                                           │
//! │     Stored ON the entry as per-field tokens (OrderEntry::errors).       │
//! │     Never returned as Err, never thrown. The rendering layer shows      │
//! │     them inline next to the field.                                      │
//! │                                                                         │
//! │  2. Pad refusals (this file)                                            │
//! │     The `add` operation can refuse: duplicate medication, pad full.     │
//! │     Typed with thiserror so the host can map them to user messages.     │
//! │                                                                         │
//! │  Everything else (remove/update on an unknown id) is a silent no-op,    │
//! │  tolerating the race between a UI removal and a pending edit.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Pad Error
// =============================================================================

/// Refusals raised by pad operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PadError {
    /// The medication is already on the pad.
    ///
    /// Entry ids must stay unique: every mutation addresses its entry by id,
    /// so a second entry with the same id would be unreachable.
    #[error("Medication {id} is already on the pad")]
    DuplicateEntry { id: String },

    /// The pad has reached its maximum number of entries.
    #[error("Pad cannot hold more than {max} orders")]
    PadFull { max: usize },
}

/// Convenience type alias for Results with PadError.
pub type PadResult<T> = Result<T, PadError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PadError::DuplicateEntry {
            id: "2d5f...".to_string(),
        };
        assert_eq!(err.to_string(), "Medication 2d5f... is already on the pad");

        let err = PadError::PadFull { max: 50 };
        assert_eq!(err.to_string(), "Pad cannot hold more than 50 orders");
    }
}
