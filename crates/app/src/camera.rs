//! Stand-in for the device camera.

use std::cell::Cell;

use engine::{CaptureDevice, EngineError, scanner::CAMERA_ERROR_FALLBACK};

#[derive(Debug)]
pub struct SimulatedTrack {
    id: u32,
}

/// Camera whose availability comes from the settings.
#[derive(Debug)]
pub struct SimulatedCamera {
    available: bool,
    live_tracks: Cell<u32>,
}

impl SimulatedCamera {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            live_tracks: Cell::new(0),
        }
    }

    /// Tracks opened and not yet stopped.
    pub fn live_tracks(&self) -> u32 {
        self.live_tracks.get()
    }
}

impl CaptureDevice for SimulatedCamera {
    type Track = SimulatedTrack;

    fn open(&self) -> Result<Vec<SimulatedTrack>, EngineError> {
        if !self.available {
            return Err(EngineError::CameraUnavailable(
                CAMERA_ERROR_FALLBACK.to_string(),
            ));
        }
        self.live_tracks.set(self.live_tracks.get() + 1);
        tracing::debug!("video track started");
        Ok(vec![SimulatedTrack { id: 1 }])
    }

    fn stop(&self, track: SimulatedTrack) {
        self.live_tracks.set(self.live_tracks.get().saturating_sub(1));
        tracing::debug!(track = track.id, "video track stopped");
    }
}
