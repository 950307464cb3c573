pub mod loader;

pub use loader::{DataLoadError, load_reports};
