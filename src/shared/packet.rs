// This is free and unencumbered software released into the public domain.

use crate::shared::{ImageAsset, ManifestConfig, OverlayConfig};
use alloc::sync::Arc;
use derive_more::Display;
use side_packet::*;
use std::collections::BTreeMap;

/// Names of the input side packets consumed by the overlay graph.
pub mod side_packet {
    pub const OBJ_ASSET_NAME: &str = "obj_asset_name";
    pub const BOX_ASSET_NAME: &str = "box_asset_name";
    pub const OBJ_TEXTURE: &str = "obj_texture";
    pub const BOX_TEXTURE: &str = "box_texture";
    pub const ALLOWED_LABELS: &str = "allowed_labels";
    pub const MAX_NUM_OBJECTS: &str = "max_num_objects";
    pub const MODEL_SCALE: &str = "model_scale";
    pub const MODEL_TRANSFORMATION: &str = "model_transformation";

    /// Every key of a complete side-packet set, in no particular order.
    pub const ALL: [&str; 8] = [
        OBJ_ASSET_NAME,
        BOX_ASSET_NAME,
        OBJ_TEXTURE,
        BOX_TEXTURE,
        ALLOWED_LABELS,
        MAX_NUM_OBJECTS,
        MODEL_SCALE,
        MODEL_TRANSFORMATION,
    ];
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum PacketType {
    #[display("string")]
    String,
    #[display("int32")]
    Int32,
    #[display("rgba_image")]
    RgbaImage,
    #[display("float32[]")]
    Float32Array,
}

/// A typed, one-shot configuration value for the processing engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Packet {
    String(String),
    Int32(i32),
    RgbaImage(Arc<ImageAsset>),
    Float32Array(Vec<f32>),
}

impl Packet {
    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::String(_) => PacketType::String,
            Packet::Int32(_) => PacketType::Int32,
            Packet::RgbaImage(_) => PacketType::RgbaImage,
            Packet::Float32Array(_) => PacketType::Float32Array,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Packet::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Packet::Int32(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageAsset> {
        match self {
            Packet::RgbaImage(img) => Some(img),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f32]> {
        match self {
            Packet::Float32Array(v) => Some(v),
            _ => None,
        }
    }
}

/// The complete, immutable set of input side packets for the overlay graph.
///
/// Only [`SidePacketSet::assemble`] can build one, so a value of this type
/// always carries exactly the keys in [`side_packet::ALL`].
#[derive(Clone, Debug, PartialEq)]
pub struct SidePacketSet {
    packets: BTreeMap<&'static str, Packet>,
}

impl SidePacketSet {
    pub fn assemble(
        config: &OverlayConfig,
        manifest: &ManifestConfig,
        obj_texture: Arc<ImageAsset>,
        box_texture: Arc<ImageAsset>,
    ) -> Self {
        let packets = BTreeMap::from([
            (OBJ_ASSET_NAME, Packet::String(config.obj_model.clone())),
            (BOX_ASSET_NAME, Packet::String(config.box_model.clone())),
            (OBJ_TEXTURE, Packet::RgbaImage(obj_texture)),
            (BOX_TEXTURE, Packet::RgbaImage(box_texture)),
            (ALLOWED_LABELS, Packet::String(manifest.category_name.clone())),
            (MAX_NUM_OBJECTS, Packet::Int32(manifest.max_num_objects)),
            (MODEL_SCALE, Packet::Float32Array(manifest.model_scale.clone())),
            (
                MODEL_TRANSFORMATION,
                Packet::Float32Array(manifest.model_transformation.clone()),
            ),
        ]);
        Self { packets }
    }

    pub fn get(&self, key: &str) -> Option<&Packet> {
        self.packets.get(key)
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.packets.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Packet)> {
        self.packets.iter().map(|(k, v)| (*k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn texture(path: &str) -> Arc<ImageAsset> {
        Arc::new(ImageAsset {
            path: path.into(),
            width: 1,
            height: 1,
            data: Bytes::from_static(&[1, 2, 3, 4]),
        })
    }

    #[test]
    fn assembles_exactly_the_side_packet_keys() {
        let manifest = ManifestConfig {
            category_name: "Footwear".into(),
            max_num_objects: 4,
            model_scale: vec![0.25, 0.25, 0.12],
            model_transformation: vec![],
        };
        let set = SidePacketSet::assemble(
            &OverlayConfig::default(),
            &manifest,
            texture("sneaker/texture.jpg"),
            texture("classic_colors.png"),
        );

        let mut keys: Vec<_> = set.keys().collect();
        keys.sort_unstable();
        let mut expected = side_packet::ALL.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);

        assert_eq!(set.get(OBJ_ASSET_NAME).and_then(Packet::as_str), Some("sneaker/model.obj.uuu"));
        assert_eq!(set.get(BOX_ASSET_NAME).and_then(Packet::as_str), Some("box.obj.uuu"));
        assert_eq!(set.get(ALLOWED_LABELS).and_then(Packet::as_str), Some("Footwear"));
        assert_eq!(set.get(MAX_NUM_OBJECTS).and_then(Packet::as_i32), Some(4));
        assert_eq!(
            set.get(BOX_TEXTURE).and_then(Packet::as_image).map(|i| i.path.as_str()),
            Some("classic_colors.png")
        );
        assert_eq!(
            set.get(MODEL_TRANSFORMATION).map(Packet::packet_type),
            Some(PacketType::Float32Array)
        );
        assert_eq!(set.get(MODEL_TRANSFORMATION).and_then(Packet::as_floats), Some(&[][..]));
    }
}
