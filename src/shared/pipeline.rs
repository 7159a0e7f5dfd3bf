// This is free and unencumbered software released into the public domain.

use crate::shared::{
    AssetStore, FrameFeed, FrameSink, MetadataSource, NativeRuntime, OverlayConfig, OverlayError,
    OverlayEvent, ProcessingEngine, SidePacketSet, SurfaceEvent, load_side_packets,
};
use alloc::sync::Arc;
use dogma::Named;
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};

const EVENT_CAPACITY: usize = 64;

/// An engine that has received its side packets.
///
/// Creating the pipeline loads every asset and manifest field and delivers
/// the side packets; only then can it be resumed, which starts the engine
/// and opens the frame feed.
pub struct OverlayPipeline {
    config: OverlayConfig,
    engine: Arc<dyn ProcessingEngine>,
    packets: Arc<SidePacketSet>,
    started: bool,
    feed: Option<FrameFeed>,
    events_tx: SyncSender<OverlayEvent>,
    events_rx: Receiver<OverlayEvent>,
}

impl core::fmt::Debug for OverlayPipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverlayPipeline")
            .field("config", &self.config)
            .field("engine", &self.engine.name())
            .field("started", &self.started)
            .field("feed", &self.feed.as_ref().map(|_| "<feed>"))
            .finish()
    }
}

impl OverlayPipeline {
    pub fn create(
        _runtime: &NativeRuntime,
        engine: Arc<dyn ProcessingEngine>,
        assets: &dyn AssetStore,
        metadata: &dyn MetadataSource,
        config: OverlayConfig,
    ) -> Result<Self, OverlayError> {
        let packets = Arc::new(load_side_packets(assets, metadata, &config)?);
        engine.set_input_side_packets(Arc::clone(&packets))?;

        #[cfg(feature = "tracing")]
        asimov_module::tracing::info!(
            target: "asimov_overlay_module",
            engine = %engine.name(),
            graph = %config.graph,
            packets = packets.len(),
            "side packets delivered"
        );

        let (events_tx, events_rx) = sync_channel(EVENT_CAPACITY);
        Ok(Self {
            config,
            engine,
            packets,
            started: false,
            feed: None,
            events_tx,
            events_rx,
        })
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn side_packets(&self) -> &SidePacketSet {
        &self.packets
    }

    pub fn engine(&self) -> &Arc<dyn ProcessingEngine> {
        &self.engine
    }

    pub fn events(&self) -> &Receiver<OverlayEvent> {
        &self.events_rx
    }

    pub(crate) fn emit(&self, event: OverlayEvent) {
        let _ = self.events_tx.try_send(event);
    }

    pub fn is_resumed(&self) -> bool {
        self.feed.is_some()
    }

    /// Starts the engine on first use and opens a fresh frame feed.
    pub fn resume(&mut self) -> Result<(), OverlayError> {
        if self.feed.is_some() {
            return Ok(());
        }
        if !self.started {
            self.engine.start()?;
            self.started = true;
        }
        self.feed = Some(FrameFeed::new(
            self.config.buffer_frames,
            self.config.flip_frames_vertically,
            Arc::clone(&self.engine),
            self.events_tx.clone(),
        ));
        Ok(())
    }

    /// Closes the frame feed. The engine keeps its side packets and is not
    /// restarted on the next resume.
    pub fn pause(&mut self) {
        if let Some(mut feed) = self.feed.take() {
            feed.stop();
        }
    }

    pub fn frame_sink(&self) -> Option<FrameSink> {
        self.feed.as_ref().map(FrameFeed::sink)
    }

    pub fn on_surface(&self, event: SurfaceEvent) -> Result<(), OverlayError> {
        match event {
            SurfaceEvent::Created(surface) | SurfaceEvent::Changed(surface) => {
                self.engine.set_output_surface(Some(surface))
            },
            SurfaceEvent::Destroyed => self.engine.set_output_surface(None),
        }
    }
}

impl Drop for OverlayPipeline {
    fn drop(&mut self) {
        self.pause();
        if self.started {
            let _ = self.engine.stop();
        }
    }
}
