// src/storage/portraits.rs
use image::{imageops, GenericImageView, ImageBuffer, ImageFormat, Pixel};
use log::{debug, info};
use std::io::Cursor;
use std::path::PathBuf;
use crate::mojang::{self, SkinService};
use crate::utils::{normalize_uuid, PortraitError};

/// Pre-seeded portrait for players on the default skin.
pub const FALLBACK_PORTRAIT: &str = "Alex.png";

/// Face region of a standard skin layout: 8x8 at (8, 8).
const FACE_X: u32 = 8;
const FACE_Y: u32 = 8;
const FACE_SIZE: u32 = 8;

/// Portraits on disk, keyed by player name.
///
/// A file's existence is the only cache metadata. Whatever portrait is written
/// first for a name stays bound to it.
pub struct PortraitCache<S> {
    folder: PathBuf,
    skins: S,
}

impl<S: SkinService> PortraitCache<S> {
    pub fn new(folder: impl Into<PathBuf>, skins: S) -> Self {
        Self {
            folder: folder.into(),
            skins,
        }
    }

    pub fn portrait_path(&self, name: &str) -> PathBuf {
        self.folder.join(format!("{}.png", name))
    }

    pub fn fallback_path(&self) -> PathBuf {
        self.folder.join(FALLBACK_PORTRAIT)
    }

    pub async fn is_known(&self, name: &str) -> bool {
        tokio::fs::metadata(self.portrait_path(name)).await.is_ok()
    }

    pub async fn ensure_portrait(&self, uuid: &str, name: &str) -> Result<(), PortraitError> {
        if self.is_known(name).await {
            return Ok(());
        }
        self.fetch_portrait(uuid, name).await
    }

    async fn fetch_portrait(&self, uuid: &str, name: &str) -> Result<(), PortraitError> {
        let uuid = normalize_uuid(uuid);
        let profile = self.skins.fetch_profile(&uuid).await?;
        let texture = mojang::texture_property(&profile)?;

        let url = match mojang::skin_url(&texture)? {
            Some(url) => url,
            None => {
                debug!("Player [{}] has no custom skin, using {}", name, FALLBACK_PORTRAIT);
                tokio::fs::copy(self.fallback_path(), self.portrait_path(name)).await?;
                return Ok(());
            }
        };

        let bytes = self.skins.fetch_skin(&url).await?;
        let skin = image::load_from_memory(&bytes)?;
        let face = crop_face(&skin)?;

        let mut png = Vec::new();
        face.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        tokio::fs::write(self.portrait_path(name), png).await?;

        info!("Cached portrait for [{}]", name);
        Ok(())
    }
}

#[cfg(test)]
impl<S> PortraitCache<S> {
    pub(crate) fn skins(&self) -> &S {
        &self.skins
    }
}

/// Cuts the face out of a skin. Works on any image that can hand out a view
/// of a sub-rectangle.
pub fn crop_face<I>(skin: &I) -> Result<ImageBuffer<I::Pixel, Vec<<I::Pixel as Pixel>::Subpixel>>, PortraitError>
where
    I: GenericImageView + 'static,
{
    let (width, height) = skin.dimensions();
    if width < FACE_X + FACE_SIZE || height < FACE_Y + FACE_SIZE {
        return Err(PortraitError::SkinTooSmall { width, height });
    }
    Ok(imageops::crop_imm(skin, FACE_X, FACE_Y, FACE_SIZE, FACE_SIZE).to_image())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::mojang::tests::profile_body;
    use async_trait::async_trait;
    use image::{DynamicImage, Rgba, RgbaImage};
    use reqwest::StatusCode;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    pub(crate) const SKIN_URL: &str = "http://textures.example/skin";

    /// Answers every lookup with the same canned profile and skin.
    pub(crate) struct FakeSkins {
        profile: Option<Vec<u8>>,
        skin: Vec<u8>,
        pub calls: AtomicUsize,
    }

    impl FakeSkins {
        pub(crate) fn custom(skin: Vec<u8>) -> Self {
            let texture = format!(r#"{{"textures":{{"SKIN":{{"url":"{}"}}}}}}"#, SKIN_URL);
            Self { profile: Some(profile_body(&texture)), skin, calls: AtomicUsize::new(0) }
        }

        pub(crate) fn default_skin() -> Self {
            Self { profile: Some(profile_body(r#"{"textures":{}}"#)), skin: Vec::new(), calls: AtomicUsize::new(0) }
        }

        pub(crate) fn unreachable() -> Self {
            Self { profile: None, skin: Vec::new(), calls: AtomicUsize::new(0) }
        }

        pub(crate) fn with_profile(body: &[u8]) -> Self {
            Self { profile: Some(body.to_vec()), skin: Vec::new(), calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl SkinService for FakeSkins {
        async fn fetch_profile(&self, uuid: &str) -> Result<Vec<u8>, PortraitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.profile.clone().ok_or_else(|| PortraitError::HttpStatus {
                url: uuid.to_string(),
                status: StatusCode::SERVICE_UNAVAILABLE,
            })
        }

        async fn fetch_skin(&self, url: &str) -> Result<Vec<u8>, PortraitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(url, SKIN_URL);
            Ok(self.skin.clone())
        }
    }

    /// A skin where every pixel encodes its own coordinates.
    pub(crate) fn coordinate_skin(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        png
    }

    pub(crate) fn seed_fallback(dir: &Path) -> Vec<u8> {
        let alex = coordinate_skin(8, 8);
        std::fs::write(dir.join(FALLBACK_PORTRAIT), &alex).unwrap();
        alex
    }

    #[tokio::test]
    async fn known_portrait_skips_network() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Steve.png"), b"cached").unwrap();
        let cache = PortraitCache::new(dir.path(), FakeSkins::unreachable());

        cache.ensure_portrait("any-uuid", "Steve").await.unwrap();

        assert_eq!(cache.skins.calls.load(Ordering::SeqCst), 0);
        assert_eq!(std::fs::read(dir.path().join("Steve.png")).unwrap(), b"cached");
    }

    #[tokio::test]
    async fn default_skin_copies_fallback() {
        let dir = TempDir::new().unwrap();
        let alex = seed_fallback(dir.path());
        let cache = PortraitCache::new(dir.path(), FakeSkins::default_skin());

        cache.ensure_portrait("069A79F4-44E9-4726-A5BE-FCA90E38AAF5", "Newbie").await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("Newbie.png")).unwrap(), alex);
        assert_eq!(cache.skins.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn custom_skin_is_cropped_to_face() {
        let dir = TempDir::new().unwrap();
        let cache = PortraitCache::new(dir.path(), FakeSkins::custom(coordinate_skin(64, 64)));

        cache.ensure_portrait("uuid", "Notch").await.unwrap();

        let face = image::open(dir.path().join("Notch.png")).unwrap().to_rgba8();
        assert_eq!(face.dimensions(), (8, 8));
        assert_eq!(face.get_pixel(0, 0), &Rgba([8, 8, 7, 255]));
        assert_eq!(face.get_pixel(7, 7), &Rgba([15, 15, 7, 255]));
        assert_eq!(face.get_pixel(3, 5), &Rgba([11, 13, 7, 255]));
    }

    #[tokio::test]
    async fn second_call_uses_cache() {
        let dir = TempDir::new().unwrap();
        let cache = PortraitCache::new(dir.path(), FakeSkins::custom(coordinate_skin(64, 32)));

        cache.ensure_portrait("uuid", "Notch").await.unwrap();
        cache.ensure_portrait("uuid", "Notch").await.unwrap();

        assert_eq!(cache.skins.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_leave_no_file() {
        let dir = TempDir::new().unwrap();

        let cache = PortraitCache::new(dir.path(), FakeSkins::unreachable());
        let err = cache.ensure_portrait("uuid", "Ghost").await.unwrap_err();
        assert!(matches!(err, PortraitError::HttpStatus { .. }));

        let cache = PortraitCache::new(dir.path(), FakeSkins::with_profile(br#"{"properties":[]}"#));
        let err = cache.ensure_portrait("uuid", "Ghost").await.unwrap_err();
        assert!(matches!(err, PortraitError::MissingTextures));

        let cache = PortraitCache::new(dir.path(), FakeSkins::custom(b"not a png".to_vec()));
        let err = cache.ensure_portrait("uuid", "Ghost").await.unwrap_err();
        assert!(matches!(err, PortraitError::Image(_)));

        assert!(!dir.path().join("Ghost.png").exists());
    }

    #[tokio::test]
    async fn missing_fallback_is_io_error() {
        let dir = TempDir::new().unwrap();
        let cache = PortraitCache::new(dir.path(), FakeSkins::default_skin());
        let err = cache.ensure_portrait("uuid", "Newbie").await.unwrap_err();
        assert!(matches!(err, PortraitError::Io(_)));
    }

    #[test]
    fn tiny_skin_is_rejected() {
        let skin = RgbaImage::new(12, 64);
        assert!(matches!(
            crop_face(&skin),
            Err(PortraitError::SkinTooSmall { width: 12, height: 64 })
        ));
    }
}
