//! Domain logic for TA assignment matching.
//!
//! Everything here is synchronous and free of I/O: the assignment records,
//! the key they merge on, the draft store behind the matching view, and the
//! reconciliation of committed and draft assignments into one view.

pub mod assignment;
pub mod error;
pub mod key;
pub mod matching;
pub mod types;
