// This is free and unencumbered software released into the public domain.

use crate::shared::OverlayError;
use alloc::borrow::Cow;
use serde_json::{Map, Value};
use core::str::FromStr;
use std::{collections::BTreeMap, fs, path::Path};

/// A single value declared in the deployment descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum MetadataValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Read-only key/value metadata attached to the application package.
pub trait MetadataSource: dogma::Named {
    fn lookup(&self, key: &str) -> Option<MetadataValue>;

    fn get_string(&self, key: &str) -> Result<String, OverlayError> {
        match self.lookup(key) {
            Some(MetadataValue::String(s)) => Ok(s),
            Some(_) => Err(OverlayError::wrong_type(key, "a string")),
            None => Err(OverlayError::missing_field(key)),
        }
    }

    fn get_int(&self, key: &str) -> Result<i32, OverlayError> {
        match self.lookup(key) {
            Some(MetadataValue::Int(n)) => {
                i32::try_from(n).map_err(|_| OverlayError::wrong_type(key, "a 32-bit integer"))
            },
            Some(_) => Err(OverlayError::wrong_type(key, "an integer")),
            None => Err(OverlayError::missing_field(key)),
        }
    }
}

/// Metadata held in memory, typically filled in by the host platform.
#[derive(Clone, Debug, Default)]
pub struct MapMetadata {
    values: BTreeMap<String, MetadataValue>,
}

impl MapMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .insert(key.into(), MetadataValue::String(value.into()));
        self
    }

    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.values.insert(key.into(), MetadataValue::Int(value));
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.values.remove(key);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetadataValue) {
        self.values.insert(key.into(), value);
    }
}

impl dogma::Named for MapMetadata {
    fn name(&self) -> Cow<'_, str> {
        "map".into()
    }
}

impl MetadataSource for MapMetadata {
    fn lookup(&self, key: &str) -> Option<MetadataValue> {
        self.values.get(key).cloned()
    }
}

/// Metadata loaded from a JSON descriptor: a single flat object whose
/// members are the declared meta-data entries.
#[derive(Clone, Debug)]
pub struct JsonMetadata {
    members: Map<String, Value>,
}

impl JsonMetadata {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OverlayError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            #[cfg(feature = "tracing")]
            asimov_module::tracing::error!(
                target: "asimov_overlay_module",
                path = %path.display(),
                error = %e,
                "cannot read deployment descriptor"
            );
            OverlayError::descriptor(e)
        })?;
        text.parse()
    }
}

impl FromStr for JsonMetadata {
    type Err = OverlayError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            #[cfg(feature = "tracing")]
            asimov_module::tracing::error!(
                target: "asimov_overlay_module",
                error = %e,
                "cannot parse deployment descriptor"
            );
            OverlayError::descriptor(e)
        })?;
        match value {
            Value::Object(members) => Ok(Self { members }),
            _ => Err(OverlayError::descriptor(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "descriptor root is not a JSON object",
            ))),
        }
    }
}

impl dogma::Named for JsonMetadata {
    fn name(&self) -> Cow<'_, str> {
        "json".into()
    }
}

impl MetadataSource for JsonMetadata {
    fn lookup(&self, key: &str) -> Option<MetadataValue> {
        match self.members.get(key)? {
            Value::String(s) => Some(MetadataValue::String(s.clone())),
            Value::Bool(b) => Some(MetadataValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(MetadataValue::Int(i)),
                None => n.as_f64().map(MetadataValue::Float),
            },
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
