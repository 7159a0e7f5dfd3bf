// This is free and unencumbered software released into the public domain.

use crate::shared::{AssetStore, OverlayError};
use bytes::Bytes;

/// Decoded RGBA8 texture with straight (non-premultiplied) alpha.
///
/// Pixels are stored row-major with no padding, so `data.len()` is always
/// `width * height * 4`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageAsset {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub data: Bytes,
}

impl ImageAsset {
    pub const BYTES_PER_PIXEL: usize = 4;

    pub fn stride(&self) -> usize {
        self.width as usize * Self::BYTES_PER_PIXEL
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride() + x as usize * Self::BYTES_PER_PIXEL;
        let px = self.data.get(offset..offset + Self::BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Decodes a bundled image into raw RGBA8 pixels.
///
/// The image is kept at its source size and colors are not dithered or
/// premultiplied; the compositor works on the raw pixels itself.
pub fn load_image_asset(
    store: &dyn AssetStore,
    path: &str,
) -> Result<ImageAsset, OverlayError> {
    let encoded = store.open(path)?;
    let decoded = image::load_from_memory(&encoded).map_err(|e| OverlayError::AssetDecode {
        path: path.to_string(),
        source: e,
    })?;

    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(OverlayError::EmptyAsset {
            path: path.to_string(),
            width,
            height,
        });
    }

    Ok(ImageAsset {
        path: path.to_string(),
        width,
        height,
        data: Bytes::from(rgba.into_raw()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{ErrorKind, MemoryAssetStore};
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_without_premultiplying() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, Rgba([200, 100, 50, 64]));
        let store = MemoryAssetStore::new().with_file("classic_colors.png", encode(&img));

        let asset = load_image_asset(&store, "classic_colors.png").unwrap();
        assert_eq!((asset.width, asset.height), (3, 2));
        assert_eq!(asset.data.len(), 3 * 2 * 4);
        assert_eq!(asset.pixel(2, 1), Some([200, 100, 50, 64]));
        assert_eq!(asset.pixel(3, 0), None);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let store = MemoryAssetStore::new().with_file("sneaker/texture.jpg", &b"not an image"[..]);
        let err = load_image_asset(&store, "sneaker/texture.jpg").unwrap_err();
        assert!(matches!(err, OverlayError::AssetDecode { .. }));
        assert_eq!(err.kind(), ErrorKind::Asset);
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let store = MemoryAssetStore::new().with_file("blank.ppm", &b"P6\n0 0\n255\n"[..]);
        let err = load_image_asset(&store, "blank.ppm").unwrap_err();
        assert!(matches!(
            err,
            OverlayError::EmptyAsset { ref path, width: 0, height: 0 } if path == "blank.ppm"
        ));
        assert_eq!(err.kind(), ErrorKind::Asset);
    }

    #[test]
    fn missing_asset_is_not_found() {
        let err = load_image_asset(&MemoryAssetStore::new(), "nope.png").unwrap_err();
        assert!(matches!(err, OverlayError::AssetNotFound { ref path, .. } if path == "nope.png"));
    }
}
