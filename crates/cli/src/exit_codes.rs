//! CLI Exit Code Registry
//!
//! Single source of truth for `cotejo` exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success, and the two sources fully agree         |
//! | 2    | CLI usage error (clap)                           |
//! | 3    | Discrepancies found (mismatched or unmatched)    |
//! | 4    | Invalid config (parse or validation failure)     |
//! | 5    | Runtime error (unreadable file, malformed CSV)   |

/// Discrepancies found: field mismatches or keys present on one side only.
/// Like `diff(1)`, a non-zero code means "the sources differ."
pub const EXIT_MISMATCH: u8 = 3;

/// Config file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// Runtime failure: unreadable input file, malformed CSV, write error.
pub const EXIT_RUNTIME: u8 = 5;
