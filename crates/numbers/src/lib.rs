//! Integer list filtering by sign and parity, dispatched through `sift-filter`.

/// Displayed-list model and its filter implementation.
pub mod list;
/// Sign and parity constraints.
pub mod number_filter;

pub use list::NumberList;
pub use number_filter::NumberFilter;
