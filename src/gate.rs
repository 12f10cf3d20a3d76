//! The capture gate: decides when a sustained, qualifying detection becomes a
//! capture command.
//!
//! The gate is pure decision logic. It performs no I/O and owns no timers;
//! instead of scheduling a delayed callback it latches a monotonic fire-at
//! instant when a face enters the target region and compares it against the
//! timestamp of every subsequent batch. Deciding to capture and performing the
//! capture are separated by the [`CaptureRequest`] boundary (see
//! [`crate::pipeline`] for the half that does I/O).

use std::time::{Duration, Instant};

use crate::detection::DetectionBatch;
use crate::rect::Rect;
use crate::region::TargetRegion;
use crate::resolution::Resolution;

/// Tunables of a [`CaptureGate`].
///
/// By default, a face has to hold inside the target region for 2 seconds,
/// captures require a confidence of at least 0.90 (independent of whatever
/// threshold the detector itself uses for display), and at most 2 photos are
/// taken per session.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Minimum detection confidence for a capture to be emitted.
    pub capture_confidence: f32,
    /// Maximum number of captures per gate session.
    pub max_captures: u32,
    /// How long a face must stay inside the target region before the first
    /// capture.
    pub hold: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            capture_confidence: 0.90,
            max_captures: 2,
            hold: Duration::from_millis(2000),
        }
    }
}

/// A request to persist the current view contents as a photo.
///
/// Emitted by [`CaptureGate::advance`]; carries the caption for the stored
/// photo and the qualifying detection's box in view coordinates.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    caption: String,
    confidence: f32,
    rect: Rect,
}

impl CaptureRequest {
    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn into_caption(self) -> String {
        self.caption
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Returns the qualifying detection's bounding box in view coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// The face-in-target capture gate.
///
/// All mutable state lives in this struct and is only touched by its
/// transition function ([`advance`](Self::advance)) and the explicit
/// [`clear`](Self::clear)/[`reset`](Self::reset) calls.
#[derive(Debug)]
pub struct CaptureGate {
    config: GateConfig,
    view: Resolution,
    region: TargetRegion,
    armed: bool,
    fire_at: Option<Instant>,
    captures_emitted: u32,
}

impl CaptureGate {
    /// Creates a gate for a view of the given size.
    pub fn new(view: Resolution, config: GateConfig) -> Self {
        Self {
            config,
            view,
            region: TargetRegion::from_view(view),
            armed: false,
            fire_at: None,
            captures_emitted: 0,
        }
    }

    /// Updates the view dimensions, recomputing the target region.
    ///
    /// Call this when the hosting view is laid out or resized.
    pub fn set_view(&mut self, view: Resolution) {
        self.view = view;
        self.region = TargetRegion::from_view(view);
    }

    pub fn view(&self) -> Resolution {
        self.view
    }

    pub fn region(&self) -> &TargetRegion {
        &self.region
    }

    /// Returns whether a face is currently being held inside the target region.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns how many captures have been emitted so far.
    ///
    /// Never exceeds [`GateConfig::max_captures`].
    pub fn captures_emitted(&self) -> u32 {
        self.captures_emitted
    }

    /// Feeds one detection batch through the gate, returning the captures to
    /// perform for this frame.
    ///
    /// Invoked once per inference pass. Detections are scaled from the batch's
    /// source-frame coordinates into view coordinates before the containment
    /// test. A batch with no detection inside the target region disarms the
    /// gate; the hold countdown starts over when a face re-enters. Once the
    /// hold is satisfied, every detection with sufficient confidence yields one
    /// [`CaptureRequest`], until `max_captures` is reached.
    pub fn advance(&mut self, batch: &DetectionBatch) -> Vec<CaptureRequest> {
        let scale = self.view.fit_scale(batch.resolution());
        let inside = batch
            .iter()
            .any(|det| self.region.contains_rect(&det.rect().scale_coords(scale)));

        if !inside {
            if self.armed {
                log::trace!("face left target region, disarming");
            }
            self.armed = false;
            self.fire_at = None;
            return Vec::new();
        }

        let now = batch.timestamp();
        if !self.armed {
            // Arming edge: latch the deadline once. Re-arming while already
            // armed must not push it back.
            self.armed = true;
            self.fire_at = Some(now + self.config.hold);
            log::debug!("face entered target region, capturing in {:?}", self.config.hold);
        }

        // The deadline stays latched after it passes, so frames following the
        // first capture qualify immediately.
        let held = self.fire_at.map_or(false, |at| now >= at);
        if !held {
            return Vec::new();
        }

        let mut requests = Vec::new();
        for det in batch.iter() {
            if self.captures_emitted >= self.config.max_captures {
                break;
            }
            if det.confidence() < self.config.capture_confidence {
                continue;
            }
            self.captures_emitted += 1;
            log::debug!(
                "capture {}/{} ({})",
                self.captures_emitted,
                self.config.max_captures,
                det.caption(),
            );
            requests.push(CaptureRequest {
                caption: det.caption(),
                confidence: det.confidence(),
                rect: det.rect().scale_coords(scale),
            });
        }
        requests
    }

    /// Signals that performing an emitted capture failed (eg. the photo store
    /// rejected the write).
    ///
    /// Releases one capture slot so the attempt is retried naturally on the
    /// next qualifying frame.
    pub fn capture_failed(&mut self) {
        self.captures_emitted = self.captures_emitted.saturating_sub(1);
    }

    /// Clears the per-face state: disarms the gate and drops any pending
    /// deadline.
    ///
    /// The capture counter is intentionally *retained*, so the
    /// `max_captures` cap persists across clears within the same gate
    /// lifetime. Use [`reset`](Self::reset) to start a new session.
    pub fn clear(&mut self) {
        self.armed = false;
        self.fire_at = None;
    }

    /// Fully resets the gate, including the capture counter.
    pub fn reset(&mut self) {
        self.clear();
        self.captures_emitted = 0;
    }
}
