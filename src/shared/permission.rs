// This is free and unencumbered software released into the public domain.

use std::{
    sync::mpsc::{Receiver, RecvTimeoutError, SyncSender, TryRecvError, sync_channel},
    time::Duration,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStatus {
    Pending,
    Granted,
    Denied,
}

/// Host-side camera permission handling.
pub trait PermissionProvider {
    fn is_granted(&self) -> bool;

    /// Asks the user for permission. The provider answers through
    /// `responder`, possibly later and from another thread.
    fn request(&self, responder: PermissionResponder);
}

/// Sending half of a permission request. Answering consumes it, so a
/// request is answered at most once.
#[derive(Debug)]
pub struct PermissionResponder {
    tx: SyncSender<bool>,
}

impl PermissionResponder {
    pub fn respond(self, granted: bool) {
        let _ = self.tx.try_send(granted);
    }
}

/// Receiving half of a permission request.
#[derive(Debug)]
pub struct PermissionRequest {
    rx: Receiver<bool>,
    status: PermissionStatus,
}

impl PermissionRequest {
    pub fn channel() -> (PermissionResponder, PermissionRequest) {
        let (tx, rx) = sync_channel(1);
        (
            PermissionResponder { tx },
            PermissionRequest {
                rx,
                status: PermissionStatus::Pending,
            },
        )
    }

    /// Issues a request through `provider`, or resolves immediately when the
    /// permission is already held.
    pub fn ask(provider: &dyn PermissionProvider) -> PermissionRequest {
        let (responder, mut request) = Self::channel();
        if provider.is_granted() {
            request.status = PermissionStatus::Granted;
        } else {
            provider.request(responder);
        }
        request
    }

    pub fn status(&mut self) -> PermissionStatus {
        if self.status == PermissionStatus::Pending {
            match self.rx.try_recv() {
                Ok(granted) => self.resolve(granted),
                Err(TryRecvError::Empty) => {},
                Err(TryRecvError::Disconnected) => self.status = PermissionStatus::Denied,
            }
        }
        self.status
    }

    pub fn wait(&mut self, timeout: Duration) -> PermissionStatus {
        if self.status == PermissionStatus::Pending {
            match self.rx.recv_timeout(timeout) {
                Ok(granted) => self.resolve(granted),
                Err(RecvTimeoutError::Timeout) => {},
                Err(RecvTimeoutError::Disconnected) => self.status = PermissionStatus::Denied,
            }
        }
        self.status
    }

    fn resolve(&mut self, granted: bool) {
        self.status = if granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, thread};

    struct Granted;

    impl PermissionProvider for Granted {
        fn is_granted(&self) -> bool {
            true
        }

        fn request(&self, _responder: PermissionResponder) {
            panic!("should not ask when already granted");
        }
    }

    #[derive(Default)]
    struct Deferred {
        responder: Cell<Option<PermissionResponder>>,
    }

    impl PermissionProvider for Deferred {
        fn is_granted(&self) -> bool {
            false
        }

        fn request(&self, responder: PermissionResponder) {
            self.responder.set(Some(responder));
        }
    }

    #[test]
    fn already_granted_resolves_without_asking() {
        let mut request = PermissionRequest::ask(&Granted);
        assert_eq!(request.status(), PermissionStatus::Granted);
    }

    #[test]
    fn answer_arrives_from_another_thread() {
        let provider = Deferred::default();
        let mut request = PermissionRequest::ask(&provider);
        assert_eq!(request.status(), PermissionStatus::Pending);

        let responder = provider.responder.take().unwrap();
        thread::spawn(move || responder.respond(true));
        assert_eq!(request.wait(Duration::from_secs(5)), PermissionStatus::Granted);
        assert_eq!(request.status(), PermissionStatus::Granted);
    }

    #[test]
    fn dropped_responder_counts_as_denied() {
        let provider = Deferred::default();
        let mut request = PermissionRequest::ask(&provider);
        drop(provider);
        assert_eq!(request.status(), PermissionStatus::Denied);
    }
}
