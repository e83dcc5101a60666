//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `Frontier`: the work queue, the visited set, and the idle signal
//! - `PageRecord`: the per-URL result recorded after a fetch attempt

mod frontier;
mod page_record;

// Re-export main types
pub use frontier::{Admission, Frontier, InFlight};
pub use page_record::{PageOutcome, PageRecord};
