pub mod dimension;
pub mod marker;
pub mod status;

pub use dimension::Dimension;
pub use marker::MarkerRecord;
pub use status::{PlayerReport, ServerSnapshot};
