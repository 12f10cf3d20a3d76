//! Capture gating for face-detection camera overlays.
//!
//! This crate implements the decision logic behind a "hold your face in the
//! oval" capture flow: the detection results for each analyzed camera frame are
//! scaled into view coordinates and tested against an elliptical target
//! region. Once a face has stayed inside the region for the configured hold
//! duration, the gate emits a bounded number of photo capture commands.
//!
//! Camera access and face inference are *not* part of this crate. Callers feed
//! in [`detection::DetectionBatch`]es produced by whatever detector they run
//! and either consume [`gate::CaptureRequest`]s themselves or let
//! [`pipeline::CapturePipeline`] snapshot the view and persist the photos to a
//! [`store::PhotoStore`].

use log::LevelFilter;

pub mod detection;
pub mod gate;
pub mod pipeline;
pub mod rect;
pub mod region;
pub mod resolution;
pub mod store;
pub mod timer;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and this library will log at *debug* level; everything
/// else follows `RUST_LOG`.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
