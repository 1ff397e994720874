// src/mojang.rs
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use log::debug;
use serde::Deserialize;
use crate::utils::PortraitError;

pub const DEFAULT_PROFILE_URL: &str = "https://sessionserver.mojang.com/session/minecraft/profile/";

const TEXTURES_PROPERTY: &str = "textures";

/// Where skins come from. Both calls hand back the raw response body.
#[async_trait]
pub trait SkinService: Send + Sync {
    async fn fetch_profile(&self, uuid: &str) -> Result<Vec<u8>, PortraitError>;
    async fn fetch_skin(&self, url: &str) -> Result<Vec<u8>, PortraitError>;
}

pub struct MojangClient {
    client: reqwest::Client,
    profile_url: String,
}

impl MojangClient {
    pub fn new(client: reqwest::Client, profile_url: impl Into<String>) -> Self {
        Self {
            client,
            profile_url: profile_url.into(),
        }
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, PortraitError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PortraitError::HttpStatus { url: url.to_string(), status });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SkinService for MojangClient {
    async fn fetch_profile(&self, uuid: &str) -> Result<Vec<u8>, PortraitError> {
        let url = format!("{}{}", self.profile_url, uuid);
        self.get_bytes(&url).await
    }

    async fn fetch_skin(&self, url: &str) -> Result<Vec<u8>, PortraitError> {
        self.get_bytes(url).await
    }
}

#[derive(Debug, Deserialize)]
struct Profile {
    #[serde(default)]
    properties: Vec<ProfileProperty>,
}

#[derive(Debug, Deserialize)]
struct ProfileProperty {
    name: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct TexturesPayload {
    #[serde(default)]
    textures: Textures,
}

#[derive(Debug, Default, Deserialize)]
struct Textures {
    #[serde(rename = "SKIN", default)]
    skin: SkinTexture,
}

#[derive(Debug, Default, Deserialize)]
struct SkinTexture {
    #[serde(default)]
    url: String,
}

/// Pulls the base64 `textures` property out of a profile response.
pub fn texture_property(body: &[u8]) -> Result<String, PortraitError> {
    let profile: Profile = serde_json::from_slice(body).map_err(PortraitError::MalformedProfile)?;
    profile
        .properties
        .into_iter()
        .find(|p| p.name == TEXTURES_PROPERTY)
        .map(|p| p.value)
        .filter(|v| !v.is_empty())
        .ok_or(PortraitError::MissingTextures)
}

/// Decodes a textures property. `None` means the player runs the default skin.
pub fn skin_url(texture: &str) -> Result<Option<String>, PortraitError> {
    let raw = BASE64_STANDARD.decode(texture)?;
    let payload: TexturesPayload =
        serde_json::from_slice(&raw).map_err(PortraitError::MalformedSkinPayload)?;
    let url = payload.textures.skin.url;
    Ok(if url.is_empty() { None } else { Some(url) })
}
