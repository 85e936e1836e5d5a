//! CLI Exit Code Registry
//!
//! Single source of truth for `staffboard` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                            |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | General error (unspecified)                        |
//! | 2    | Usage error (bad arguments, bad override syntax)   |
//! | 10   | Settings file unreadable or invalid                |
//! | 20   | A source failed to load and `--strict` was given   |
//! | 30   | Export artifact could not be written               |
//! | 40   | Referenced record or suggestion does not exist     |
//!
//! Source failures are not errors by default: the failing collection is
//! shown as empty and a warning is logged.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, malformed `--source` / `--add` values.
pub const EXIT_USAGE: u8 = 2;

/// Settings file exists but cannot be read, parsed, or validated.
pub const EXIT_CONFIG_INVALID: u8 = 10;

/// One or more sources failed to load under `--strict`.
pub const EXIT_SOURCE_UNAVAILABLE: u8 = 20;

/// Writing the export artifact failed.
pub const EXIT_EXPORT_FAILED: u8 = 30;

/// `confirm` named a guest/host pair that is not a current suggestion.
pub const EXIT_NOT_FOUND: u8 = 40;
