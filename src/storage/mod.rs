pub mod markers;
pub mod portraits;
