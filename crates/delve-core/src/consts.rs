//! Layout constants

/// Maximum number of samples a cell search draws before giving up
pub const RETRY_BUDGET: usize = 200;

/// Sampled cells closer than this (Euclidean) to a door are rejected
pub const DOOR_CLEARANCE: i32 = 3;

/// Default room width/height floor
pub const DEFAULT_MIN_SIZE: i32 = 10;

/// Default room width/height ceiling
pub const DEFAULT_MAX_SIZE: i32 = 16;
