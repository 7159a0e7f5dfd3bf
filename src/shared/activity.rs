// This is free and unencumbered software released into the public domain.

use crate::shared::{
    AssetStore, CameraSource, MetadataSource, NativeRuntime, OverlayConfig, OverlayError,
    OverlayEvent, OverlayPipeline, PermissionProvider, PermissionRequest, PermissionStatus,
    ProcessingEngine, SurfaceEvent,
};
use alloc::sync::Arc;
use std::{sync::mpsc::Receiver, time::Duration};

/// The AR overlay screen: pipeline, camera and permission wired together.
///
/// The host forwards its lifecycle callbacks (`resume`, `pause`, surface
/// changes) and polls [`OverlayActivity::poll_permission`] or waits on
/// [`OverlayActivity::wait_for_permission`] after asking the user.
pub struct OverlayActivity {
    pipeline: OverlayPipeline,
    camera: Box<dyn CameraSource>,
    permission: PermissionRequest,
    camera_running: bool,
    denial_reported: bool,
}

impl OverlayActivity {
    pub fn create(
        runtime: &NativeRuntime,
        engine: Arc<dyn ProcessingEngine>,
        assets: &dyn AssetStore,
        metadata: &dyn MetadataSource,
        permissions: &dyn PermissionProvider,
        camera: Box<dyn CameraSource>,
        config: OverlayConfig,
    ) -> Result<Self, OverlayError> {
        let pipeline = OverlayPipeline::create(runtime, engine, assets, metadata, config)?;
        let permission = PermissionRequest::ask(permissions);
        Ok(Self {
            pipeline,
            camera,
            permission,
            camera_running: false,
            denial_reported: false,
        })
    }

    pub fn pipeline(&self) -> &OverlayPipeline {
        &self.pipeline
    }

    pub fn events(&self) -> &Receiver<OverlayEvent> {
        self.pipeline.events()
    }

    pub fn is_camera_running(&self) -> bool {
        self.camera_running
    }

    pub fn resume(&mut self) -> Result<(), OverlayError> {
        self.pipeline.resume()?;
        self.poll_permission()?;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), OverlayError> {
        let result = self.stop_camera();
        self.pipeline.pause();
        result
    }

    /// Checks for a permission answer and starts the camera if it was
    /// granted while resumed.
    pub fn poll_permission(&mut self) -> Result<PermissionStatus, OverlayError> {
        let status = self.permission.status();
        self.apply_permission(status)?;
        Ok(status)
    }

    pub fn wait_for_permission(
        &mut self,
        timeout: Duration,
    ) -> Result<PermissionStatus, OverlayError> {
        let status = self.permission.wait(timeout);
        self.apply_permission(status)?;
        Ok(status)
    }

    pub fn on_surface(&self, event: SurfaceEvent) -> Result<(), OverlayError> {
        self.pipeline.on_surface(event)
    }

    fn apply_permission(&mut self, status: PermissionStatus) -> Result<(), OverlayError> {
        match status {
            PermissionStatus::Granted => self.start_camera(),
            PermissionStatus::Denied => {
                if !self.denial_reported {
                    self.denial_reported = true;
                    #[cfg(feature = "tracing")]
                    asimov_module::tracing::warn!(
                        target: "asimov_overlay_module",
                        "camera permission denied"
                    );
                    self.pipeline.emit(OverlayEvent::PermissionDenied);
                }
                Ok(())
            },
            PermissionStatus::Pending => Ok(()),
        }
    }

    fn start_camera(&mut self) -> Result<(), OverlayError> {
        if self.camera_running {
            return Ok(());
        }
        let Some(sink) = self.pipeline.frame_sink() else {
            return Ok(());
        };
        let facing = self.pipeline.config().camera_facing;
        self.camera.start(facing, sink)?;
        self.camera_running = true;

        #[cfg(feature = "tracing")]
        asimov_module::tracing::info!(
            target: "asimov_overlay_module",
            camera = %dogma::Named::name(&*self.camera),
            %facing,
            "camera started"
        );
        self.pipeline.emit(OverlayEvent::CameraStarted { facing });
        Ok(())
    }

    fn stop_camera(&mut self) -> Result<(), OverlayError> {
        if !self.camera_running {
            return Ok(());
        }
        self.camera_running = false;
        let result = self.camera.stop();
        self.pipeline.emit(OverlayEvent::CameraStopped);
        result
    }
}

impl Drop for OverlayActivity {
    fn drop(&mut self) {
        let _ = self.stop_camera();
    }
}
