use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::frame_read_error::FrameReadError;

/// Presentation timestamp of a decoded picture in the stream's time base,
/// absent when the container carries none.
pub type FrameTimestamp = Option<i64>;

/// Decodes individual pictures from a video source into RGBA buffers.
///
/// Implementations own every decoding resource between `open` and `close`
/// and release them on drop as well.
pub trait FrameReader {
    /// Opens a video file and selects its first decodable video stream.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, FrameReadError>;

    /// Metadata of the currently open source.
    fn metadata(&self) -> Option<&VideoMetadata>;

    /// Decodes the next picture into `buffer` (width * height * 4 bytes,
    /// rows tightly packed) and returns its presentation timestamp.
    fn read_frame_into(&mut self, buffer: &mut [u8]) -> Result<FrameTimestamp, FrameReadError>;

    /// Seeks to the closest key frame at or before `timestamp`, expressed in
    /// the stream's time base.
    fn seek(&mut self, timestamp: i64) -> Result<(), FrameReadError>;

    /// Releases any resources held by the reader. Safe to call repeatedly.
    fn close(&mut self);

    /// Decodes the next picture into a newly allocated [`Frame`].
    fn read_frame(&mut self) -> Result<Frame, FrameReadError> {
        let (width, height) = self
            .metadata()
            .map(|m| (m.width, m.height))
            .ok_or(FrameReadError::NotOpened)?;
        let mut data = vec![0u8; Frame::buffer_len(width, height)];
        let pts = self.read_frame_into(&mut data)?;
        Ok(Frame::new(data, width, height, pts))
    }
}
