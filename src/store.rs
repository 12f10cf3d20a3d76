//! Photo persistence.
//!
//! Capturing a photo means snapshotting the view into a pixel buffer and
//! handing it to a [`PhotoStore`]. The platform's shared media store is behind
//! this trait; [`DirStore`] is the plain-filesystem implementation.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use image::RgbaImage;

/// Pixel contents of the view at capture time.
///
/// The buffer dimensions match the view the overlay is drawn on, not the
/// source camera frame.
pub type Snapshot = RgbaImage;

/// Identifier of a successfully stored photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoId(String);

impl PhotoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persists captured photos.
///
/// A failed save is non-fatal: callers log it and release the capture slot so
/// the shot is retried on the next qualifying frame (see
/// [`CaptureGate::capture_failed`](crate::gate::CaptureGate::capture_failed)).
pub trait PhotoStore {
    /// Persists `snapshot` with the given caption, returning an identifier for
    /// the stored photo.
    fn save(&mut self, snapshot: &Snapshot, caption: &str) -> anyhow::Result<PhotoId>;
}

impl<S: PhotoStore + ?Sized> PhotoStore for Box<S> {
    fn save(&mut self, snapshot: &Snapshot, caption: &str) -> anyhow::Result<PhotoId> {
        (**self).save(snapshot, caption)
    }
}

/// Stores photos as PNG files in a directory.
///
/// Files are named `FaceCapture_<unix millis>-<seq>.png`; the sequence number
/// keeps two captures from the same frame from colliding.
pub struct DirStore {
    dir: PathBuf,
    seq: u64,
}

impl DirStore {
    /// Opens (and creates, if necessary) the photo directory.
    pub fn new<P: Into<PathBuf>>(dir: P) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, seq: 0 })
    }
}

impl PhotoStore for DirStore {
    fn save(&mut self, snapshot: &Snapshot, caption: &str) -> anyhow::Result<PhotoId> {
        let millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
        let path = self.dir.join(format!("FaceCapture_{millis}-{}.png", self.seq));
        self.seq += 1;

        snapshot.save(&path)?;
        log::debug!("saved photo to {} ({caption})", path.display());
        Ok(PhotoId(path.display().to_string()))
    }
}
