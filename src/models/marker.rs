// src/models/marker.rs
use serde::Serialize;
use crate::models::PlayerReport;
use crate::utils::serialize_coord;

/// What the map renderer gets to see of a player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerRecord {
    pub name: String,
    #[serde(serialize_with = "serialize_coord")]
    pub x: f64,
    #[serde(serialize_with = "serialize_coord")]
    pub z: f64,
    pub bot: bool,
}

impl From<&PlayerReport> for MarkerRecord {
    fn from(p: &PlayerReport) -> Self {
        Self {
            name: p.name.clone(),
            x: p.x,
            z: p.z,
            bot: p.is_bot,
        }
    }
}
