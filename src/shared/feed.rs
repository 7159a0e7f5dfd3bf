// This is free and unencumbered software released into the public domain.

use crate::shared::{CameraFacing, Frame, OverlayError, ProcessingEngine};
use alloc::sync::Arc;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{RecvTimeoutError, SyncSender, TrySendError, sync_channel},
    },
    thread::JoinHandle,
    time::Duration,
};

pub type FrameSink = Arc<dyn Fn(Frame) + Send + Sync + 'static>;

#[derive(Debug)]
pub enum OverlayEvent {
    FeedStarted,
    FeedStopped,
    FrameDropped,
    CameraStarted { facing: CameraFacing },
    CameraStopped,
    PermissionDenied,
    Error { error: OverlayError },
}

enum FrameMsg {
    Frame(Frame),
    Stop,
}

/// Hands camera frames to the engine on a dedicated thread.
///
/// The channel is bounded; when the engine falls behind, new frames are
/// dropped rather than queued.
pub struct FrameFeed {
    tx: SyncSender<FrameMsg>,
    events_tx: SyncSender<OverlayEvent>,
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl FrameFeed {
    pub fn new(
        capacity: usize,
        flip_vertically: bool,
        engine: Arc<dyn ProcessingEngine>,
        events_tx: SyncSender<OverlayEvent>,
    ) -> Self {
        let (tx, rx) = sync_channel::<FrameMsg>(capacity.max(1));
        let stop = Arc::new(AtomicBool::new(false));

        let stop2 = Arc::clone(&stop);
        let events_tx2 = events_tx.clone();

        let join = std::thread::spawn(move || {
            let _ = events_tx2.try_send(OverlayEvent::FeedStarted);

            while !stop2.load(Ordering::Relaxed) {
                match rx.recv_timeout(Duration::from_millis(200)) {
                    Ok(FrameMsg::Frame(frame)) => {
                        let frame = if flip_vertically {
                            frame.flipped_vertically()
                        } else {
                            frame
                        };
                        if let Err(error) = engine.process_frame(frame) {
                            let _ = events_tx2.try_send(OverlayEvent::Error { error });
                        }
                    },
                    Ok(FrameMsg::Stop) => break,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            let _ = events_tx2.try_send(OverlayEvent::FeedStopped);
        });

        Self {
            tx,
            events_tx,
            stop,
            join: Some(join),
        }
    }

    /// A sink for camera sources. Frames pushed after the feed stopped are
    /// reported as [`OverlayError::Closed`].
    pub fn sink(&self) -> FrameSink {
        let tx = self.tx.clone();
        let events_tx = self.events_tx.clone();
        Arc::new(move |frame: Frame| try_send_frame(&tx, &events_tx, frame))
    }

    pub fn is_running(&self) -> bool {
        self.join.is_some()
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.tx.try_send(FrameMsg::Stop);
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

impl Drop for FrameFeed {
    fn drop(&mut self) {
        self.stop();
    }
}

fn try_send_frame(
    frame_tx: &SyncSender<FrameMsg>,
    events_tx: &SyncSender<OverlayEvent>,
    frame: Frame,
) {
    match frame_tx.try_send(FrameMsg::Frame(frame)) {
        Ok(()) => {},
        Err(TrySendError::Full(_)) => {
            let _ = events_tx.try_send(OverlayEvent::FrameDropped);
        },
        Err(TrySendError::Disconnected(_)) => {
            let _ = events_tx.try_send(OverlayEvent::Error {
                error: OverlayError::Closed,
            });
        },
    }
}
