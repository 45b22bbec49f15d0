use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::api::error::GameError;
use crate::core::layout::Size;

/// Asset manifest describing every image the scene uses.
/// Loaded from a JSON file at runtime; the host fills in native sizes after
/// decoding so layout and hit-testing never touch pixels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Named image lookup: key → path + native size.
    #[serde(default)]
    pub images: HashMap<String, ImageDescriptor>,
}

/// Describes a single decoded raster image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Relative path to the image file (e.g., "assets/doggy.png").
    pub path: String,
    /// Native width in pixels.
    pub width: f32,
    /// Native height in pixels.
    pub height: f32,
}

impl ImageDescriptor {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style insert, mostly for tests and embedded defaults.
    pub fn with_image(mut self, key: impl Into<String>, path: impl Into<String>, width: f32, height: f32) -> Self {
        self.images.insert(
            key.into(),
            ImageDescriptor {
                path: path.into(),
                width,
                height,
            },
        );
        self
    }

    /// Look up an image that the scene cannot run without.
    pub fn require(&self, key: &str) -> Result<&ImageDescriptor, GameError> {
        self.images
            .get(key)
            .ok_or_else(|| GameError::MissingAsset(key.to_string()))
    }

    /// Native size of a required image.
    pub fn size_of(&self, key: &str) -> Result<Size, GameError> {
        self.require(key).map(ImageDescriptor::size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "images": {
                "bg": { "path": "assets/back_five_dogs.jpg", "width": 2400, "height": 1350 },
                "doggy": { "path": "assets/doggy.png", "width": 120, "height": 96 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.images.len(), 2);
        assert_eq!(manifest.size_of("bg").unwrap(), Size::new(2400.0, 1350.0));
        assert_eq!(manifest.require("doggy").unwrap().path, "assets/doggy.png");
    }

    #[test]
    fn missing_image_is_reported_by_key() {
        let manifest = AssetManifest::new().with_image("bg", "bg.jpg", 10.0, 10.0);
        match manifest.require("logo") {
            Err(GameError::MissingAsset(key)) => assert_eq!(key, "logo"),
            other => panic!("expected MissingAsset, got {:?}", other),
        }
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(AssetManifest::from_json("{ \"images\": 3 }"), Err(GameError::Config(_))));
    }
}
