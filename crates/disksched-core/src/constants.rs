//! Constants for workload layout and process exit codes.

/// Number of header fields (`capacity head previous`) preceding the pending list.
pub const HEADER_FIELDS: usize = 3;

/// Number of scheduling policies evaluated per cycle.
pub const POLICY_COUNT: usize = 6;

/// Word that ends an interactive session when read in place of a filename.
pub const DEFAULT_QUIT_WORD: &str = "QUIT";

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error (I/O, unreadable input).
    pub const ERROR_GENERIC: i32 = 1;
    /// A workload failed validation.
    pub const ERROR_MALFORMED: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// A worker died or violated the cycle protocol.
    pub const ERROR_WORKER: i32 = 5;
}
