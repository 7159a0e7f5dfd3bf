// This is free and unencumbered software released into the public domain.

use crate::shared::{Frame, OverlayError, SidePacketSet};
use alloc::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplaySurface {
    pub width: u32,
    pub height: u32,
}

/// Lifecycle of the preview surface the engine renders into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    Created(DisplaySurface),
    Changed(DisplaySurface),
    Destroyed,
}

/// The graph that consumes side packets and camera frames and renders the
/// overlay. Implementations are expected to be internally synchronized;
/// frames arrive from the feed thread.
pub trait ProcessingEngine: dogma::Named + Send + Sync {
    /// Receives the complete side-packet set. Called exactly once, before
    /// [`ProcessingEngine::start`].
    fn set_input_side_packets(&self, packets: Arc<SidePacketSet>) -> Result<(), OverlayError>;

    fn start(&self) -> Result<(), OverlayError>;

    fn process_frame(&self, frame: Frame) -> Result<(), OverlayError>;

    fn set_output_surface(&self, _surface: Option<DisplaySurface>) -> Result<(), OverlayError> {
        Ok(())
    }

    fn stop(&self) -> Result<(), OverlayError> {
        Ok(())
    }
}
