// src/models/status.rs
use serde::Deserialize;

/// A player as carpet reports it. Missing fields are zero-filled so one bad
/// record only costs that player (no uuid fails its portrait, no dimension
/// fails classification) instead of the whole snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerReport {
    pub name: String,
    pub uuid: String,
    pub x: f64,
    pub z: f64,
    pub dimension: String,
    pub health: f32,
    pub is_bot: bool,
}

/// One poll of the carpet status endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSnapshot {
    #[serde(default)]
    pub online: i32,
    #[serde(default)]
    pub start_time: i64,
    #[serde(default)]
    pub players: Vec<PlayerReport>,
}
