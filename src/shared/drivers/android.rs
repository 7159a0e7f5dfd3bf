// This is free and unencumbered software released into the public domain.

use crate::shared::{AssetStore, OverlayError};
use alloc::{borrow::Cow, ffi::CString};
use bytes::{Bytes, BytesMut};
use core::{ffi::c_void, ptr::NonNull};
use ndk_sys::{
    AAsset_close, AAsset_getLength64, AAsset_read, AAssetManager, AAssetManager_open,
    AASSET_MODE_BUFFER,
};
use scopeguard::defer;
use std::io;

/// Asset store over the APK's `assets/` directory.
#[derive(Debug)]
pub struct AndroidAssetStore {
    handle: NonNull<AAssetManager>,
}

// AAssetManager is thread-safe for reads.
unsafe impl Send for AndroidAssetStore {}
unsafe impl Sync for AndroidAssetStore {}

impl AndroidAssetStore {
    /// Wraps an asset manager obtained from `AAssetManager_fromJava`.
    ///
    /// # Safety
    ///
    /// `handle` must stay valid for the lifetime of the store; the Java
    /// `AssetManager` it came from must be kept alive by the caller.
    pub unsafe fn from_raw(handle: NonNull<AAssetManager>) -> Self {
        Self { handle }
    }
}

impl dogma::Named for AndroidAssetStore {
    fn name(&self) -> Cow<'_, str> {
        "android".into()
    }
}

impl AssetStore for AndroidAssetStore {
    fn open(&self, path: &str) -> Result<Bytes, OverlayError> {
        let c_path = CString::new(path).map_err(|_| {
            OverlayError::asset_not_found(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "asset path contains a NUL byte"),
            )
        })?;

        let asset = unsafe {
            AAssetManager_open(self.handle.as_ptr(), c_path.as_ptr(), AASSET_MODE_BUFFER as _)
        };
        if asset.is_null() {
            return Err(OverlayError::asset_not_found(
                path,
                io::Error::from(io::ErrorKind::NotFound),
            ));
        }
        defer! {
            unsafe { AAsset_close(asset); }
        }

        let len = unsafe { AAsset_getLength64(asset) }.max(0) as usize;
        let mut buf = BytesMut::zeroed(len);
        let mut filled = 0;
        while filled < len {
            let n = unsafe {
                AAsset_read(
                    asset,
                    buf[filled..].as_mut_ptr() as *mut c_void,
                    len - filled,
                )
            };
            if n < 0 {
                return Err(OverlayError::asset_not_found(
                    path,
                    io::Error::other("asset read failed"),
                ));
            }
            if n == 0 {
                break;
            }
            filled += n as usize;
        }
        buf.truncate(filled);
        Ok(buf.freeze())
    }
}
