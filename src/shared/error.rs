// This is free and unencumbered software released into the public domain.

use derive_more::Display;
use std::{error::Error as StdError, io, num::ParseFloatError};
use thiserror::Error;

/// Coarse classification of an [`OverlayError`], used for exit codes and
/// for telling asset failures apart from manifest failures.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("asset")]
    Asset,
    #[display("manifest")]
    Manifest,
    #[display("runtime")]
    Runtime,
    #[display("engine")]
    Engine,
    #[display("camera")]
    Camera,
    #[display("other")]
    Other,
}

#[derive(Debug, Error)]
#[error("malformed number {segment:?} at position {index}")]
pub struct FloatSequenceError {
    pub index: usize,
    pub segment: String,
    #[source]
    pub source: ParseFloatError,
}

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("asset not found: {path}")]
    AssetNotFound {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode asset {path}")]
    AssetDecode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("asset {path} decoded to an empty {width}x{height} image")]
    EmptyAsset {
        path: String,
        width: u32,
        height: u32,
    },

    #[error("deployment descriptor unavailable")]
    DescriptorUnavailable {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("missing manifest field: {0}")]
    MissingField(String),

    #[error("manifest field {key} is not {expected}")]
    WrongFieldType { key: String, expected: &'static str },

    #[error("malformed manifest field {key}")]
    MalformedField {
        key: String,
        #[source]
        source: FloatSequenceError,
    },

    #[error("invalid manifest field {key}: {reason}")]
    InvalidField { key: String, reason: String },

    #[error("failed to load native library {name}: {reason}")]
    NativeLibrary { name: String, reason: String },

    #[error("engine is not configured")]
    NotConfigured,

    #[error("engine error while {context}")]
    EngineError {
        context: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("frame buffer of {len} bytes does not hold {width}x{height} RGBA pixels at stride {stride}")]
    InvalidFrame {
        width: usize,
        height: usize,
        stride: usize,
        len: usize,
    },

    #[error("driver error while {context}")]
    DriverError {
        context: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("stream closed")]
    Closed,

    #[error("{0}")]
    Other(String),
}

impl OverlayError {
    #[inline]
    pub fn asset_not_found(path: impl Into<String>, source: io::Error) -> Self {
        Self::AssetNotFound {
            path: path.into(),
            source,
        }
    }

    #[inline]
    pub fn descriptor(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::DescriptorUnavailable {
            source: Box::new(source),
        }
    }

    #[inline]
    pub fn missing_field(key: impl Into<String>) -> Self {
        Self::MissingField(key.into())
    }

    #[inline]
    pub fn wrong_type(key: impl Into<String>, expected: &'static str) -> Self {
        Self::WrongFieldType {
            key: key.into(),
            expected,
        }
    }

    #[inline]
    pub fn invalid_field(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            key: key.into(),
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn engine(context: &'static str, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::EngineError {
            context,
            source: Box::new(source),
        }
    }

    #[inline]
    pub fn driver(context: &'static str, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::DriverError {
            context,
            source: Box::new(source),
        }
    }

    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        use OverlayError::*;
        match self {
            AssetNotFound { .. } | AssetDecode { .. } | EmptyAsset { .. } => ErrorKind::Asset,
            DescriptorUnavailable { .. }
            | MissingField(_)
            | WrongFieldType { .. }
            | MalformedField { .. }
            | InvalidField { .. } => ErrorKind::Manifest,
            NativeLibrary { .. } => ErrorKind::Runtime,
            NotConfigured | EngineError { .. } | Closed => ErrorKind::Engine,
            InvalidFrame { .. } | DriverError { .. } => ErrorKind::Camera,
            Other(_) => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_and_manifest_kinds_differ() {
        let asset = OverlayError::asset_not_found(
            "sneaker/texture.jpg",
            io::Error::from(io::ErrorKind::NotFound),
        );
        let manifest = OverlayError::missing_field("categoryName");
        assert_eq!(asset.kind(), ErrorKind::Asset);
        assert_eq!(manifest.kind(), ErrorKind::Manifest);
        assert_eq!(asset.to_string(), "asset not found: sneaker/texture.jpg");
    }

    #[test]
    fn malformed_field_keeps_cause() {
        let source = "x".parse::<f32>().unwrap_err();
        let err = OverlayError::MalformedField {
            key: "modelScale".into(),
            source: FloatSequenceError {
                index: 1,
                segment: "x".into(),
                source,
            },
        };
        let cause = err.source().map(|c| c.to_string());
        assert_eq!(cause.as_deref(), Some("malformed number \"x\" at position 1"));
    }
}
