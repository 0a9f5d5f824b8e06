//! Exit codes returned by [`run`](crate::run).

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// General error exit code.
pub const ERROR: i32 = 2;

/// Input closed before the session ended.
pub const INTERRUPTED: i32 = 130;
