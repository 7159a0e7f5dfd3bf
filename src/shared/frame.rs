// This is free and unencumbered software released into the public domain.

use crate::shared::OverlayError;
use bytes::{Bytes, BytesMut};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub data: Bytes,
    pub width: usize,
    pub height: usize,
    pub stride: usize,
    pub pixel_format: PixelFormat,
    pub timestamp_ns: u64,
}

impl Frame {
    /// Wraps an RGBA8 buffer. Fails when a row is narrower than `width`
    /// pixels or the buffer is shorter than `height` rows of `stride` bytes.
    pub fn new_rgba(
        data: impl Into<Bytes>,
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self, OverlayError> {
        let data = data.into();
        let pixel_format = PixelFormat::Rgba8;
        let min_stride = width.checked_mul(pixel_format.bytes_per_pixel());
        let min_len = stride.checked_mul(height);
        let fits = matches!(
            (min_stride, min_len),
            (Some(row), Some(len)) if stride >= row && data.len() >= len
        );
        if !fits {
            return Err(OverlayError::InvalidFrame {
                width,
                height,
                stride,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            pixel_format,
            timestamp_ns: 0,
        })
    }

    pub fn with_timestamp(mut self, timestamp_ns: u64) -> Self {
        self.timestamp_ns = timestamp_ns;
        self
    }

    /// Returns the frame with its rows in reverse order. Camera textures
    /// arrive bottom-up relative to what the graph expects.
    ///
    /// A frame whose fields were edited so the buffer no longer holds
    /// `height` rows is returned unchanged.
    pub fn flipped_vertically(&self) -> Frame {
        let row = self.stride;
        let Some(rows) = row
            .checked_mul(self.height)
            .and_then(|len| self.data.get(..len))
        else {
            return self.clone();
        };
        let mut out = BytesMut::with_capacity(rows.len());
        for y in (0..self.height).rev() {
            let start = y * row;
            out.extend_from_slice(&rows[start..start + row]);
        }
        Frame {
            data: out.freeze(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ErrorKind;

    #[test]
    fn flip_reverses_rows_and_keeps_padding() {
        // 1 pixel wide, stride 8 (4 bytes padding), 2 rows.
        let data: Vec<u8> = (0..16).collect();
        let frame = Frame::new_rgba(data, 1, 2, 8).unwrap().with_timestamp(42);
        let flipped = frame.flipped_vertically();
        assert_eq!(&flipped.data[..8], &[8, 9, 10, 11, 12, 13, 14, 15]);
        assert_eq!(&flipped.data[8..], &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(flipped.timestamp_ns, 42);
        assert_eq!(flipped.pixel_format.bytes_per_pixel(), 4);
    }

    #[test]
    fn rejects_buffers_that_do_not_match_the_geometry() {
        // stride narrower than width * 4
        let err = Frame::new_rgba(vec![0; 16], 2, 2, 4).unwrap_err();
        assert!(matches!(err, OverlayError::InvalidFrame { stride: 4, .. }));
        assert_eq!(err.kind(), ErrorKind::Camera);

        // one row short
        let err = Frame::new_rgba(vec![0; 12], 1, 4, 4).unwrap_err();
        assert!(matches!(err, OverlayError::InvalidFrame { len: 12, .. }));

        assert!(Frame::new_rgba(Vec::<u8>::new(), 0, 0, 0).is_ok());
    }
}
