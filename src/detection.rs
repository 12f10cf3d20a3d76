//! Detection input types.
//!
//! The face detector itself is external to this crate. Whatever produces the
//! detections (one inference pass per analyzed camera frame) hands the results
//! over as a [`DetectionBatch`].

use std::time::Instant;

use crate::rect::Rect;
use crate::resolution::Resolution;

/// A detected face.
///
/// A [`Detection`] consists of a [`Rect`] enclosing the detected face in
/// source-frame pixel coordinates, a confidence value, and a category label.
///
/// Per convention, the confidence value lies between 0.0 and 1.0. Detections
/// are immutable once constructed.
#[derive(Debug, Clone)]
pub struct Detection {
    confidence: f32,
    rect: Rect,
    label: String,
}

impl Detection {
    /// Creates a detection with an empty label.
    pub fn new(confidence: f32, rect: Rect) -> Self {
        Self {
            confidence,
            rect,
            label: String::new(),
        }
    }

    /// Creates a detection carrying the detector's category label.
    pub fn with_label<L: Into<String>>(confidence: f32, rect: Rect, label: L) -> Self {
        Self {
            confidence,
            rect,
            label: label.into(),
        }
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Returns the bounding rectangle in source-frame pixel coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Renders the display/caption string for this detection: the label
    /// followed by the confidence with two decimals (eg. `face 0.97`).
    pub fn caption(&self) -> String {
        if self.label.is_empty() {
            format!("{:.2}", self.confidence)
        } else {
            format!("{} {:.2}", self.label, self.confidence)
        }
    }
}

/// The set of detections produced from one analyzed frame.
///
/// Carries the source frame's [`Resolution`] (needed to scale bounding boxes
/// into view coordinates) and a monotonic timestamp. A batch may be empty;
/// feeding an empty batch through the gate is a valid no-op.
#[derive(Debug, Clone)]
pub struct DetectionBatch {
    detections: Vec<Detection>,
    resolution: Resolution,
    timestamp: Instant,
}

impl DetectionBatch {
    /// Creates an empty batch for a frame of the given size, taken at `timestamp`.
    pub fn new(resolution: Resolution, timestamp: Instant) -> Self {
        Self {
            detections: Vec::new(),
            resolution,
            timestamp,
        }
    }

    pub fn push(&mut self, detection: Detection) {
        self.detections.push(detection);
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Returns an iterator yielding the stored detections.
    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter()
    }

    /// Returns the pixel resolution of the source frame.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Returns the monotonic timestamp the source frame was analyzed at.
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }
}
