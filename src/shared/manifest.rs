// This is free and unencumbered software released into the public domain.

use crate::shared::{FloatSequenceError, MetadataSource, OverlayError};
use manifest_key::*;

/// Metadata keys declared in the deployment descriptor.
pub mod manifest_key {
    pub const CATEGORY_NAME: &str = "categoryName";
    pub const MAX_NUM_OBJECTS: &str = "maxNumObjects";
    pub const MODEL_SCALE: &str = "modelScale";
    pub const MODEL_TRANSFORMATION: &str = "modelTransformation";
}

/// Detection and model settings declared in the deployment descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct ManifestConfig {
    pub category_name: String,
    pub max_num_objects: i32,
    pub model_scale: Vec<f32>,
    pub model_transformation: Vec<f32>,
}

impl ManifestConfig {
    /// Reads all four fields. Every field is required; nothing is defaulted.
    pub fn read(metadata: &dyn MetadataSource) -> Result<Self, OverlayError> {
        let category_name = metadata.get_string(CATEGORY_NAME)?;

        let max_num_objects = metadata.get_int(MAX_NUM_OBJECTS)?;
        if max_num_objects < 1 {
            return Err(OverlayError::invalid_field(
                MAX_NUM_OBJECTS,
                format!("must be at least 1, got {max_num_objects}"),
            ));
        }

        let model_scale = read_float_sequence(metadata, MODEL_SCALE)?;
        let model_transformation = read_float_sequence(metadata, MODEL_TRANSFORMATION)?;

        Ok(Self {
            category_name,
            max_num_objects,
            model_scale,
            model_transformation,
        })
    }
}

fn read_float_sequence(
    metadata: &dyn MetadataSource,
    key: &'static str,
) -> Result<Vec<f32>, OverlayError> {
    let raw = metadata.get_string(key)?;
    parse_float_sequence(&raw).map_err(|source| OverlayError::MalformedField {
        key: key.to_string(),
        source,
    })
}

/// Parses a comma-separated list of decimal numbers.
///
/// Trailing empty segments (from a trailing comma) are dropped. Any other
/// segment must be a number; surrounding whitespace is ignored.
///
/// Numbers use Rust float syntax: `inf`, `infinity` and `nan` are accepted in
/// any case, while type suffixes such as `1.0f` or `1d` are rejected.
pub fn parse_float_sequence(raw: &str) -> Result<Vec<f32>, FloatSequenceError> {
    let mut segments: Vec<&str> = raw.split(',').collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| {
            segment
                .trim()
                .parse::<f32>()
                .map_err(|source| FloatSequenceError {
                    index,
                    segment: segment.to_string(),
                    source,
                })
        })
        .collect()
}
