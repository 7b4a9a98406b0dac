//! Small helpers shared by resolvers and reports.

pub mod date;
pub mod plural;
pub mod slug;

pub use date::DateTimeUtc;
pub use plural::plural_count;
pub use slug::standardize;
