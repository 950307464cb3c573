pub mod geo;
pub mod query;
pub mod report;

pub use geo::{CoordinateError, GeoPoint};
pub use query::{InvalidRadiusError, SearchQuery, SearchRadius};
pub use report::{Report, ReportError};
