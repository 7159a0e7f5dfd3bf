// This is free and unencumbered software released into the public domain.

//! CLI helpers (error reporting, verbosity handling, packet rendering).
//!
//! This module must compile even when the crate feature `cli` is disabled,
//! because the library is built in non-CLI configurations.

use crate::shared::{Packet, SidePacketSet};
use serde_json::{Value, json};

#[cfg(feature = "cli")]
use crate::shared::{ErrorKind, OverlayError};

#[cfg(feature = "cli")]
use asimov_module::SysexitsError::{self, *};

#[cfg(feature = "cli")]
use clientele::StandardOptions;

#[cfg(feature = "cli")]
pub fn handle_error(err: &OverlayError, flags: &StandardOptions) -> SysexitsError {
    #[cfg(feature = "tracing")]
    {
        use asimov_module::tracing::{debug, error};

        error!(target: "asimov_overlay_module", %err, kind = %err.kind(), "overlay command failed");

        if flags.debug || flags.verbose >= 2 {
            debug!(target: "asimov_overlay_module", ?err, "detailed error");
        }
    }

    report_error(err, flags);
    map_error_to_sysexit(err)
}

#[cfg(feature = "cli")]
pub fn info_user(flags: &StandardOptions, msg: &str) {
    if flags.debug || flags.verbose >= 1 {
        eprintln!("INFO: {msg}");
    }

    #[cfg(feature = "tracing")]
    asimov_module::tracing::info!(target: "asimov_overlay_module", "{msg}");
}

#[cfg(feature = "cli")]
pub fn warn_user(flags: &StandardOptions, msg: &str) {
    if flags.debug || flags.verbose >= 1 {
        eprintln!("WARN: {msg}");
    }

    #[cfg(feature = "tracing")]
    asimov_module::tracing::warn!(target: "asimov_overlay_module", "{msg}");
}

#[cfg(feature = "cli")]
fn report_error(err: &OverlayError, flags: &StandardOptions) {
    use std::error::Error as _;
    use std::io::Write;

    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "ERROR: {err}");

    if flags.debug || flags.verbose >= 2 {
        let mut source = err.source();
        while let Some(cause) = source {
            let _ = writeln!(stderr, "  Caused by: {}", cause);
            source = cause.source();
        }
    }
}

#[cfg(feature = "cli")]
pub fn map_error_to_sysexit(err: &OverlayError) -> SysexitsError {
    match err {
        OverlayError::AssetNotFound { .. } => EX_NOINPUT,
        OverlayError::AssetDecode { .. } | OverlayError::EmptyAsset { .. } => EX_DATAERR,
        _ => match err.kind() {
            ErrorKind::Manifest => EX_CONFIG,
            ErrorKind::Runtime => EX_UNAVAILABLE,
            ErrorKind::Camera => EX_UNAVAILABLE,
            ErrorKind::Asset | ErrorKind::Engine | ErrorKind::Other => EX_SOFTWARE,
        },
    }
}

/// One-line human-readable description of a side packet.
pub fn describe_packet(key: &str, packet: &Packet) -> String {
    let ty = packet.packet_type();
    match packet {
        Packet::String(s) => format!("{key}: {ty} {s:?}"),
        Packet::Int32(n) => format!("{key}: {ty} {n}"),
        Packet::RgbaImage(img) => {
            format!("{key}: {ty} {}x{} from {}", img.width, img.height, img.path)
        },
        Packet::Float32Array(v) => format!("{key}: {ty} {v:?}"),
    }
}

/// JSON description of a side packet. Images are summarized, not dumped.
pub fn packet_to_json(key: &str, packet: &Packet) -> Value {
    let value = match packet {
        Packet::String(s) => json!(s),
        Packet::Int32(n) => json!(n),
        Packet::RgbaImage(img) => json!({
            "path": img.path,
            "width": img.width,
            "height": img.height,
            "bytes": img.data.len(),
        }),
        Packet::Float32Array(v) => json!(v),
    };
    json!({ "key": key, "type": packet.packet_type().to_string(), "value": value })
}

pub fn describe_side_packets(packets: &SidePacketSet) -> Vec<String> {
    packets
        .iter()
        .map(|(key, packet)| describe_packet(key, packet))
        .collect()
}
