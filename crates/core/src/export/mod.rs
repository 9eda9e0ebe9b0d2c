//! Export module - CSV serialization of the current view.

mod csv_export;

pub use csv_export::{export_filename, serialize_leads, EXPORT_HEADERS};
