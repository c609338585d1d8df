/*!
 * Core Module
 * Fundamental simulator types, clocks and error handling
 */

pub mod clock;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use clock::{Clock, LogicalClock, WallClock};
pub use errors::*;
pub use types::*;
