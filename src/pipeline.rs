//! Wires the capture gate to view snapshotting and photo persistence.
//!
//! The gate itself only *decides* (see [`crate::gate`]); this module performs.
//! [`CapturePipeline::process`] snapshots the view synchronously for every
//! emitted capture, since the saved image has to match the frame that triggered
//! it, and hands the encode/write to a background saver worker so the caller's
//! (usually the UI/draw) thread never blocks on store I/O. Save outcomes flow
//! back asynchronously; a failed save releases the capture slot.

use std::{io, mem};

use pawawwewism::{promise, Promise, PromiseHandle, Worker};

use crate::detection::DetectionBatch;
use crate::gate::{CaptureGate, GateConfig};
use crate::resolution::Resolution;
use crate::store::{PhotoStore, Snapshot};
use crate::timer::{FpsCounter, Timer};

struct SaveJob {
    snapshot: Snapshot,
    caption: String,
    outcome: Promise<bool>,
}

/// Drives a [`CaptureGate`] and performs the captures it emits.
pub struct CapturePipeline {
    gate: CaptureGate,
    saver: Worker<SaveJob>,
    pending: Vec<PromiseHandle<bool>>,
    fps: FpsCounter,
}

impl CapturePipeline {
    /// Creates a pipeline that saves captured photos to `store`.
    ///
    /// Spawns the background saver thread; the store moves onto that thread
    /// for the lifetime of the pipeline.
    pub fn new<S: PhotoStore + Send + 'static>(
        view: Resolution,
        config: GateConfig,
        mut store: S,
    ) -> io::Result<Self> {
        let t_save = Timer::new("save");
        let saver = Worker::builder().name("photo-saver").spawn(
            move |SaveJob {
                      snapshot,
                      caption,
                      outcome,
                  }| {
                match t_save.time(|| store.save(&snapshot, &caption)) {
                    Ok(id) => {
                        log::debug!("photo saved as {id}");
                        outcome.fulfill(true);
                    }
                    Err(e) => {
                        log::warn!("failed to save photo: {e:#}");
                        outcome.fulfill(false);
                    }
                }
                log::trace!("{t_save}");
            },
        )?;

        Ok(Self {
            gate: CaptureGate::new(view, config),
            saver,
            pending: Vec::new(),
            fps: FpsCounter::new("capture"),
        })
    }

    /// Feeds one detection batch through the gate, snapshotting and saving a
    /// photo for every capture it emits.
    ///
    /// `snapshot` is invoked once per emitted capture *before* this method
    /// returns, so the stored image reflects the triggering frame's view
    /// contents. Returns the number of captures started for this batch.
    pub fn process(
        &mut self,
        batch: &DetectionBatch,
        mut snapshot: impl FnMut() -> Snapshot,
    ) -> usize {
        self.poll_outcomes();

        let requests = self.gate.advance(batch);
        let started = requests.len();
        for request in requests {
            let (outcome, handle) = promise();
            self.saver.send(SaveJob {
                snapshot: snapshot(),
                caption: request.into_caption(),
                outcome,
            });
            self.pending.push(handle);
        }

        self.fps.tick();
        started
    }

    /// Applies the outcomes of saves that have finished, without blocking.
    fn poll_outcomes(&mut self) {
        for handle in mem::take(&mut self.pending) {
            // `will_block` is also false when the promise was dropped;
            // `apply_outcome` treats that like a failed save.
            if !handle.will_block() {
                self.apply_outcome(handle);
            } else {
                self.pending.push(handle);
            }
        }
    }

    fn apply_outcome(&mut self, handle: PromiseHandle<bool>) {
        match handle.block() {
            Ok(true) => {}
            // A save that failed (or whose saver died) releases its slot.
            Ok(false) | Err(_) => self.gate.capture_failed(),
        }
    }

    /// Blocks until all in-flight saves have finished and applies their
    /// outcomes.
    pub fn flush(&mut self) {
        for handle in mem::take(&mut self.pending) {
            self.apply_outcome(handle);
        }
    }

    /// Clears the gate's per-face state; see [`CaptureGate::clear`].
    pub fn clear(&mut self) {
        self.gate.clear();
    }

    /// Updates the view dimensions after a layout pass.
    pub fn set_view(&mut self, view: Resolution) {
        self.gate.set_view(view);
    }

    pub fn gate(&self) -> &CaptureGate {
        &self.gate
    }
}
