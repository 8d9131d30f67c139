//! Loaded sprite images

use std::collections::HashMap;

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use crate::platform::{AssetError, AssetKind, LoadBarrier};

/// The decoded image for every [`AssetKind`]
#[derive(Debug, Default)]
pub struct Sprites {
    images: HashMap<AssetKind, HtmlImageElement>,
}

impl Sprites {
    /// Request all images at once and wait until every one has decoded
    ///
    /// Fails on the first image that cannot be fetched or decoded.
    pub async fn load() -> Result<Self, AssetError> {
        let mut barrier = LoadBarrier::new();
        let mut pending = Vec::with_capacity(AssetKind::ALL.len());

        // Start every download before awaiting any of them
        for kind in AssetKind::ALL {
            let image = HtmlImageElement::new()
                .map_err(|e| barrier.fail(kind, format!("{:?}", e)))?;
            image.set_src(kind.path());
            let decoding = JsFuture::from(image.decode());
            pending.push((kind, image, decoding));
        }

        let mut sprites = Sprites::default();
        for (kind, image, decoding) in pending {
            decoding
                .await
                .map_err(|e| barrier.fail(kind, format!("{:?}", e)))?;
            sprites.images.insert(kind, image);
            if barrier.complete(kind)? {
                log::info!("Sprites ready");
            }
        }
        Ok(sprites)
    }

    pub fn get(&self, kind: AssetKind) -> Option<&HtmlImageElement> {
        self.images.get(&kind)
    }

    /// Natural width/height ratio (1.0 for a missing or empty image)
    pub fn aspect(&self, kind: AssetKind) -> f64 {
        match self.get(kind) {
            Some(image) if image.natural_height() > 0 => {
                image.natural_width() as f64 / image.natural_height() as f64
            }
            _ => 1.0,
        }
    }
}
