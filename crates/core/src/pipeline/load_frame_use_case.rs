use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::frame_read_error::FrameReadError;
use crate::video::domain::frame_reader::FrameReader;
use crate::video::domain::image_writer::ImageWriter;

#[derive(Error, Debug)]
pub enum LoadFrameError {
    #[error(transparent)]
    Read(#[from] FrameReadError),
    #[error("failed to write snapshot to {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error>,
    },
}

/// Single-frame extraction: open → (seek) → decode one picture → close,
/// optionally saving the picture as an image.
pub struct LoadFrameUseCase {
    reader: Box<dyn FrameReader>,
    image_writer: Option<Box<dyn ImageWriter>>,
}

impl LoadFrameUseCase {
    pub fn new(reader: Box<dyn FrameReader>, image_writer: Option<Box<dyn ImageWriter>>) -> Self {
        Self {
            reader,
            image_writer,
        }
    }

    /// Decodes one frame from `input`. When `seek_to` is set the reader
    /// first seeks to that timestamp (stream time base). The reader is
    /// closed before returning, on success and on failure alike.
    pub fn execute(
        &mut self,
        input: &Path,
        seek_to: Option<i64>,
        snapshot: Option<&Path>,
    ) -> Result<(VideoMetadata, Frame), LoadFrameError> {
        let result = self.decode(input, seek_to);
        self.reader.close();
        let (metadata, frame) = result?;

        if let (Some(path), Some(writer)) = (snapshot, self.image_writer.as_ref()) {
            writer
                .write(path, &frame)
                .map_err(|source| LoadFrameError::Snapshot {
                    path: path.to_path_buf(),
                    source,
                })?;
        }

        Ok((metadata, frame))
    }

    fn decode(
        &mut self,
        input: &Path,
        seek_to: Option<i64>,
    ) -> Result<(VideoMetadata, Frame), FrameReadError> {
        let metadata = self.reader.open(input)?;
        if let Some(ts) = seek_to {
            self.reader.seek(ts)?;
        }
        let frame = self.reader.read_frame()?;
        log::info!(
            "Loaded {}x{} frame (pts {:?}, {:.3}s)",
            frame.width(),
            frame.height(),
            frame.pts(),
            frame
                .pts()
                .map(|pts| metadata.time_base.to_seconds(pts))
                .unwrap_or(0.0)
        );
        Ok((metadata, frame))
    }
}
