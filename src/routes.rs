mod contact;
mod health_check;
mod status;

pub use contact::*;
pub use health_check::*;
pub use status::*;

/// Cap applied to every listing query to bound response size.
pub(crate) const MAX_LISTED_RECORDS: i64 = 1000;
