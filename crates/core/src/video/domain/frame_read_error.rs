use std::path::PathBuf;

use thiserror::Error;

/// Error raised by the decoding backend, kept opaque to the domain layer.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum FrameReadError {
    #[error("failed to open container {path}: {source}")]
    ContainerOpen {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("no video stream found in {path}")]
    NoVideoStream { path: PathBuf },
    #[error("no decoder available for video codec {codec}")]
    UnsupportedCodec { codec: String },
    #[error("failed to initialize decoder: {0}")]
    DecoderInit(#[source] BackendError),
    #[error("failed to decode frame: {0}")]
    Decode(#[source] BackendError),
    #[error("failed to convert frame to RGBA: {0}")]
    ColorConversion(#[source] BackendError),
    #[error("failed to seek to timestamp {timestamp}: {source}")]
    Seek {
        timestamp: i64,
        #[source]
        source: BackendError,
    },
    #[error("frame buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("no decodable picture within {limit} packets")]
    PacketLimit { limit: usize },
    #[error("end of stream reached")]
    EndOfStream,
    #[error("reader is not open")]
    NotOpened,
}

impl FrameReadError {
    /// True for failures raised while opening a source, before any frame
    /// could be read.
    pub fn is_open_failure(&self) -> bool {
        matches!(
            self,
            Self::ContainerOpen { .. }
                | Self::NoVideoStream { .. }
                | Self::UnsupportedCodec { .. }
                | Self::DecoderInit(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::container(FrameReadError::ContainerOpen { path: PathBuf::from("a.mp4"), source: "missing".into() }, true)]
    #[case::no_video(FrameReadError::NoVideoStream { path: PathBuf::from("a.wav") }, true)]
    #[case::codec(FrameReadError::UnsupportedCodec { codec: "foo".into() }, true)]
    #[case::decoder(FrameReadError::DecoderInit("boom".into()), true)]
    #[case::decode(FrameReadError::Decode("bad packet".into()), false)]
    #[case::limit(FrameReadError::PacketLimit { limit: 8 }, false)]
    #[case::eos(FrameReadError::EndOfStream, false)]
    #[case::not_opened(FrameReadError::NotOpened, false)]
    fn test_is_open_failure(#[case] err: FrameReadError, #[case] expected: bool) {
        assert_eq!(err.is_open_failure(), expected);
    }

    #[test]
    fn test_messages_carry_context() {
        let err = FrameReadError::ContainerOpen {
            path: PathBuf::from("/videos/clip.mp4"),
            source: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/videos/clip.mp4"));
        assert!(msg.contains("No such file or directory"));

        let err = FrameReadError::BufferSize {
            expected: 16,
            actual: 12,
        };
        assert_eq!(err.to_string(), "frame buffer holds 12 bytes, expected 16");
    }

    #[test]
    fn test_source_is_exposed() {
        use std::error::Error;
        let err = FrameReadError::Decode("bad packet".into());
        assert_eq!(err.source().unwrap().to_string(), "bad packet");
    }
}
