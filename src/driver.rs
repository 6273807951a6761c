//! Repeating "compute frame, paint, commit" task.
//!
//! The driver never schedules itself; the host calls [`AnimationDriver::tick`]
//! once per refresh with the current time and live parameters. Between ticks
//! exactly one frame is pending while running. Stopping, either directly or
//! through a [`StopToken`], drops the pending frame, and later ticks do
//! nothing.

use crate::catalog::Catalog;
use crate::frame::FrameCache;
use crate::mapper::{compute_frame, Geometry};
use crate::params::Parameters;
use crate::render::paint_frame;
use crate::surface::Surface;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Stopped,
}

/// Shared teardown flag, checked before every frame acts.
#[derive(Clone, Debug, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Frame computed, painted and committed to the cache.
    Painted,
    /// No surface this tick; retried on the next one.
    Skipped,
    /// Driver not running, nothing happened.
    Cancelled,
}

/// Milliseconds on some monotonic-enough time base.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall-clock time. A suspended host resumes with a visible jump.
pub struct WallClock;

impl Clock for WallClock {
    fn now_ms(&self) -> f64 {
        chrono::Utc::now().timestamp_millis() as f64
    }
}

pub struct AnimationDriver {
    state: DriverState,
    pending: bool,
    token: StopToken,
    cache: FrameCache,
}

impl AnimationDriver {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            state: DriverState::Idle,
            pending: false,
            token: StopToken::new(),
            cache: FrameCache::new(catalog.len()),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running && !self.token.is_stopped()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending
    }

    pub fn stop_token(&self) -> StopToken {
        self.token.clone()
    }

    /// Read-only view for hit-testing.
    pub fn cache(&self) -> &FrameCache {
        &self.cache
    }

    /// Idle -> Running and schedule the first frame. Ignored in any other state.
    pub fn start(&mut self) {
        if self.state != DriverState::Idle || self.token.is_stopped() {
            return;
        }
        self.state = DriverState::Running;
        self.pending = true;
        info!("animation driver running");
    }

    /// Cancel the pending frame and stop for good.
    pub fn stop(&mut self) {
        self.token.stop();
        self.pending = false;
        if self.state != DriverState::Stopped {
            info!("animation driver stopped after {} frames", self.cache.frame_no());
            self.state = DriverState::Stopped;
        }
    }

    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        time_ms: f64,
        catalog: &Catalog,
        params: &Parameters,
        hovered: Option<usize>,
        surface: Option<&mut S>,
    ) -> FrameOutcome {
        if self.token.is_stopped() && self.state != DriverState::Stopped {
            self.stop();
        }
        if self.state != DriverState::Running || !self.pending {
            return FrameOutcome::Cancelled;
        }
        self.pending = false;

        let Some(surface) = surface else {
            debug!("surface unavailable, frame skipped");
            self.pending = true;
            return FrameOutcome::Skipped;
        };

        let (w, h) = surface.size();
        let geometry = Geometry::from_size(w, h);
        let frame = compute_frame(catalog, time_ms, params, &geometry);
        paint_frame(surface, catalog, &frame, params.show_orbits, hovered);
        self.cache.commit(&frame);

        self.pending = true;
        FrameOutcome::Painted
    }
}

impl Drop for AnimationDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
