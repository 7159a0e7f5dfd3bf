// This is free and unencumbered software released into the public domain.

use crate::shared::{CameraFacing, FrameSink, OverlayError};

/// A camera the host can start once permission is granted. Captured frames
/// are pushed into the given sink from whatever thread the source uses.
pub trait CameraSource: dogma::Named + Send {
    fn start(&mut self, facing: CameraFacing, sink: FrameSink) -> Result<(), OverlayError>;

    fn stop(&mut self) -> Result<(), OverlayError> {
        Ok(())
    }
}
