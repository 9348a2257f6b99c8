//! Functional core for pricebook.
//!
//! Pure types and functions for priced, time-bounded offers: validation,
//! scope filtering and the priority-based interval flattening that turns a
//! bag of overlapping offers into a timetable. The `storage` module only
//! declares the repository contract; implementations live in the server.

pub mod offer;
pub mod serde;
pub mod storage;
