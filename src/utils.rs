// src/utils.rs
use reqwest::StatusCode;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("unrecognized dimension: {0}")]
    Unrecognized(String),
}

#[derive(Debug, Error)]
pub enum PortraitError {
    #[error("request to skin service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    HttpStatus { url: String, status: StatusCode },
    #[error("malformed profile: {0}")]
    MalformedProfile(serde_json::Error),
    #[error("profile has no textures property")]
    MissingTextures,
    #[error("textures property is not valid base64: {0}")]
    SkinPayloadEncoding(#[from] base64::DecodeError),
    #[error("malformed textures payload: {0}")]
    MalformedSkinPayload(serde_json::Error),
    #[error("skin image: {0}")]
    Image(#[from] image::ImageError),
    #[error("skin is {width}x{height}, too small for the face region")]
    SkinTooSmall { width: u32, height: u32 },
    #[error("portrait io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize markers: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write markers: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error("failed to call server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered with status {0}")]
    HttpStatus(StatusCode),
    #[error("failed to decode status json: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Profile lookups want the bare 32-char lowercase form.
pub fn normalize_uuid(uuid: &str) -> String {
    uuid.to_lowercase().replace('-', "")
}

/// Writes whole coordinates as integers (`12`, not `12.0`), which is what the
/// marker script consumers have always received. Negative zero stays `-0`.
pub fn serialize_coord<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if *value == 0.0 && value.is_sign_negative() {
        let raw = RawValue::from_string("-0".to_string()).map_err(S::Error::custom)?;
        return raw.serialize(serializer);
    }
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
