// This is free and unencumbered software released into the public domain.

use crate::shared::OverlayError;
use std::sync::{Mutex, OnceLock};

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Native libraries to load, by short name (`mediapipe_jni` loads
    /// `libmediapipe_jni.so` on Linux and Android).
    pub libraries: Vec<String>,
}

cfg_if::cfg_if! {
    if #[cfg(target_os = "android")] {
        const DEFAULT_LIBRARIES: &[&str] = &["mediapipe_jni", "opencv_java3"];
    } else {
        const DEFAULT_LIBRARIES: &[&str] = &[];
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            libraries: DEFAULT_LIBRARIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self {
            libraries: Vec::new(),
        }
    }

    pub fn with_library(mut self, name: impl Into<String>) -> Self {
        self.libraries.push(name.into());
        self
    }
}

/// Proof that the process-wide native dependencies have been loaded.
#[derive(Debug)]
pub struct NativeRuntime {
    libraries: Vec<String>,
}

static RUNTIME: OnceLock<NativeRuntime> = OnceLock::new();
static INIT: Mutex<()> = Mutex::new(());

impl NativeRuntime {
    /// Loads the configured libraries once per process. Later calls return
    /// the runtime from the first successful call and ignore `config`.
    pub fn initialize(config: &RuntimeConfig) -> Result<&'static NativeRuntime, OverlayError> {
        if let Some(runtime) = RUNTIME.get() {
            return Ok(runtime);
        }

        let _guard = INIT.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(runtime) = RUNTIME.get() {
            return Ok(runtime);
        }

        for name in &config.libraries {
            load_library(name)?;
            #[cfg(feature = "tracing")]
            asimov_module::tracing::info!(
                target: "asimov_overlay_module",
                library = %name,
                "loaded native library"
            );
        }

        Ok(RUNTIME.get_or_init(|| NativeRuntime {
            libraries: config.libraries.clone(),
        }))
    }

    pub fn get() -> Option<&'static NativeRuntime> {
        RUNTIME.get()
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }
}

#[cfg(unix)]
fn load_library(name: &str) -> Result<(), OverlayError> {
    use std::{
        env::consts::{DLL_PREFIX, DLL_SUFFIX},
        ffi::{CStr, CString},
    };

    let file = CString::new(format!("{DLL_PREFIX}{name}{DLL_SUFFIX}")).map_err(|_| OverlayError::NativeLibrary {
        name: name.to_string(),
        reason: "library name contains a NUL byte".into(),
    })?;

    // The handle is never closed: the library stays mapped for the life of the process.
    let handle = unsafe { libc::dlopen(file.as_ptr(), libc::RTLD_NOW | libc::RTLD_GLOBAL) };
    if handle.is_null() {
        let reason = unsafe {
            let msg = libc::dlerror();
            if msg.is_null() {
                "unknown dlopen failure".to_string()
            } else {
                CStr::from_ptr(msg).to_string_lossy().into_owned()
            }
        };
        return Err(OverlayError::NativeLibrary {
            name: name.to_string(),
            reason,
        });
    }
    Ok(())
}

#[cfg(not(unix))]
fn load_library(name: &str) -> Result<(), OverlayError> {
    Err(OverlayError::NativeLibrary {
        name: name.to_string(),
        reason: "native library loading is not supported on this platform".into(),
    })
}
