//! Simulated QR-code scanning.
//!
//! A scan opens the camera, "looks" at it for a fixed delay and then reports a
//! randomly generated wallet address. The camera is held by a
//! [`CaptureSession`] which stops every capture track when dropped, so the
//! camera is released however the scan ends.

use std::{future::Future, time::Duration};

use uuid::Uuid;

use crate::{
    ResultEngine,
    util::{Completion, simulated_delay},
};

/// Message shown when the device gives no better explanation.
pub const CAMERA_ERROR_FALLBACK: &str = "Failed to access camera";

/// Platform camera.
pub trait CaptureDevice {
    type Track;

    /// Open the rear-facing camera and return its capture tracks.
    ///
    /// Denied or missing cameras are reported as
    /// [`EngineError::CameraUnavailable`](crate::EngineError::CameraUnavailable).
    fn open(&self) -> ResultEngine<Vec<Self::Track>>;

    /// Stop one capture track.
    fn stop(&self, track: Self::Track);
}

/// Open camera. Every track is stopped on drop.
pub struct CaptureSession<'a, D: CaptureDevice> {
    device: &'a D,
    tracks: Vec<D::Track>,
}

impl<'a, D: CaptureDevice> CaptureSession<'a, D> {
    pub fn acquire(device: &'a D) -> ResultEngine<Self> {
        let tracks = device.open()?;
        tracing::debug!(tracks = tracks.len(), "camera acquired");
        Ok(Self { device, tracks })
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}

impl<D: CaptureDevice> Drop for CaptureSession<'_, D> {
    fn drop(&mut self) {
        for track in self.tracks.drain(..) {
            self.device.stop(track);
        }
        tracing::debug!("camera released");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Scanned(String),
    Cancelled,
}

#[derive(Debug, Clone, Copy)]
pub struct Scanner {
    delay: Duration,
}

impl Scanner {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Run one scan on `device`.
    ///
    /// Leaving the scan screen is modelled by `cancelled`; the camera is
    /// released in that case too.
    pub async fn scan<D: CaptureDevice>(
        &self,
        device: &D,
        cancelled: impl Future<Output = ()>,
    ) -> ResultEngine<ScanOutcome> {
        let session = CaptureSession::acquire(device).inspect_err(|err| {
            tracing::warn!("camera unavailable: {err}");
        })?;

        let outcome = match simulated_delay(self.delay, cancelled).await {
            Completion::Done => ScanOutcome::Scanned(random_wallet_address()),
            Completion::Cancelled => ScanOutcome::Cancelled,
        };
        drop(session);
        Ok(outcome)
    }
}

/// `0x` followed by 40 random hex digits.
pub fn random_wallet_address() -> String {
    let hex = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    format!("0x{}", &hex[..40])
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::EngineError;

    #[derive(Default)]
    struct FakeCamera {
        denied: bool,
        opened: Cell<u32>,
        stopped: RefCell<Vec<u8>>,
    }

    impl CaptureDevice for FakeCamera {
        type Track = u8;

        fn open(&self) -> ResultEngine<Vec<u8>> {
            if self.denied {
                return Err(EngineError::CameraUnavailable("Permission denied".to_string()));
            }
            self.opened.set(self.opened.get() + 1);
            Ok(vec![1, 2])
        }

        fn stop(&self, track: u8) {
            self.stopped.borrow_mut().push(track);
        }
    }

    #[test]
    fn session_stops_every_track_on_drop() {
        let camera = FakeCamera::default();
        let session = CaptureSession::acquire(&camera).unwrap();
        assert_eq!(session.track_count(), 2);
        assert!(camera.stopped.borrow().is_empty());
        drop(session);
        assert_eq!(*camera.stopped.borrow(), vec![1, 2]);
    }

    #[test]
    fn addresses_look_like_wallets() {
        let address = random_wallet_address();
        assert_eq!(address.len(), 42);
        assert!(address.starts_with("0x"));
        assert!(address[2..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(address, random_wallet_address());
    }

    #[tokio::test(start_paused = true)]
    async fn scan_reports_address_and_releases_camera() {
        let camera = FakeCamera::default();
        let outcome = Scanner::new(Duration::from_secs(3))
            .scan(&camera, std::future::pending())
            .await
            .unwrap();
        assert!(matches!(outcome, ScanOutcome::Scanned(ref a) if a.starts_with("0x")));
        assert_eq!(camera.opened.get(), 1);
        assert_eq!(camera.stopped.borrow().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_scan_releases_camera() {
        let camera = FakeCamera::default();
        let outcome = Scanner::new(Duration::from_secs(3))
            .scan(&camera, tokio::time::sleep(Duration::from_secs(1)))
            .await
            .unwrap();
        assert_eq!(outcome, ScanOutcome::Cancelled);
        assert_eq!(camera.stopped.borrow().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn denied_camera_surfaces_message() {
        let camera = FakeCamera {
            denied: true,
            ..FakeCamera::default()
        };
        let err = Scanner::new(Duration::from_secs(3))
            .scan(&camera, std::future::pending())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Permission denied");
        assert!(camera.stopped.borrow().is_empty());
    }
}
