//! Client for the RescueTime analytic data and daily summary APIs.
//!
//! ```no_run
//! use rescuetime::{AnalyticDataQuery, ClientConfig, RescueTime};
//!
//! let client = RescueTime::new(ClientConfig::new("B63..."));
//! let query = AnalyticDataQuery::new().perspective("rank").restrict_kind("activity");
//! let data = client.get_analytic_data(Some("Europe/Berlin"), &query)?;
//! for row in &data.rows {
//!     println!("{:?} {:?}", row.activity, row.time_spent());
//! }
//! # Ok::<(), rescuetime::Error>(())
//! ```

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
pub use models::*;
pub use services::client::RescueTime;
pub use services::decoder::{canonicalize_header, decode_analytic_data, Column, ColumnMap};
pub use services::request_builder::build_url;
pub use services::transport::{HttpTransport, Transport};
pub use utils::config::ClientConfig;
