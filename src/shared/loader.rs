// This is free and unencumbered software released into the public domain.

use crate::shared::{
    AssetStore, ImageAsset, ManifestConfig, MetadataSource, OverlayConfig, OverlayError,
    SidePacketSet, load_image_asset,
};
use alloc::sync::Arc;

/// Everything read from the package at startup, before assembly.
#[derive(Clone, Debug)]
pub struct DemoAssets {
    pub obj_texture: Arc<ImageAsset>,
    pub box_texture: Arc<ImageAsset>,
}

impl DemoAssets {
    pub fn load(store: &dyn AssetStore, config: &OverlayConfig) -> Result<Self, OverlayError> {
        let obj_texture = load_texture(store, &config.obj_texture, "object")?;
        let box_texture = load_texture(store, &config.box_texture, "box")?;
        Ok(Self {
            obj_texture: Arc::new(obj_texture),
            box_texture: Arc::new(box_texture),
        })
    }
}

fn load_texture(
    store: &dyn AssetStore,
    path: &str,
    role: &'static str,
) -> Result<ImageAsset, OverlayError> {
    match load_image_asset(store, path) {
        Ok(texture) => {
            #[cfg(feature = "tracing")]
            asimov_module::tracing::debug!(
                target: "asimov_overlay_module",
                role,
                path,
                width = texture.width,
                height = texture.height,
                store = %dogma::Named::name(store),
                "loaded texture"
            );
            Ok(texture)
        },
        Err(err) => {
            #[cfg(feature = "tracing")]
            asimov_module::tracing::error!(
                target: "asimov_overlay_module",
                role,
                path,
                error = %err,
                "error parsing {role} texture"
            );
            #[cfg(not(feature = "tracing"))]
            let _ = role;
            Err(err)
        },
    }
}

/// Reads the manifest and both textures and assembles the side packets.
///
/// Nothing is returned unless every input loaded and validated.
pub fn load_side_packets(
    store: &dyn AssetStore,
    metadata: &dyn MetadataSource,
    config: &OverlayConfig,
) -> Result<SidePacketSet, OverlayError> {
    let manifest = ManifestConfig::read(metadata).inspect_err(|_err| {
        #[cfg(feature = "tracing")]
        asimov_module::tracing::error!(
            target: "asimov_overlay_module",
            error = %_err,
            source = %dogma::Named::name(metadata),
            "invalid manifest metadata"
        );
    })?;
    let assets = DemoAssets::load(store, config)?;

    Ok(SidePacketSet::assemble(
        config,
        &manifest,
        assets.obj_texture,
        assets.box_texture,
    ))
}
