pub mod analytic;
pub mod daily_summary;
pub mod query;

pub use analytic::*;
pub use daily_summary::*;
pub use query::*;
