// This is free and unencumbered software released into the public domain.

mod activity;
pub use activity::*;

mod asset;
pub use asset::*;

mod camera;
pub use camera::*;

mod config;
pub use config::*;

pub mod drivers {
    #[cfg(all(feature = "android", target_os = "android"))]
    pub mod android;
}

mod engine;
pub use engine::*;

mod error;
pub use error::*;

mod feed;
pub use feed::*;

mod frame;
pub use frame::*;

mod loader;
pub use loader::*;

mod manifest;
pub use manifest::*;

mod metadata;
pub use metadata::*;

mod packet;
pub use packet::*;

mod permission;
pub use permission::*;

mod pipeline;
pub use pipeline::*;

mod runtime;
pub use runtime::*;

mod texture;
pub use texture::*;
