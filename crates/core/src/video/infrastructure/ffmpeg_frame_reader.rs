use std::path::Path;

use ffmpeg_next::format::context::Input;
use ffmpeg_next::format::Pixel;
use ffmpeg_next::software::scaling;
use ffmpeg_next::util::frame::video::Video as VideoFrame;

use crate::shared::constants::{DEFAULT_MAX_PACKETS, RGBA_CHANNELS};
use crate::shared::frame::Frame;
use crate::shared::video_metadata::{TimeBase, VideoMetadata};
use crate::video::domain::frame_read_error::FrameReadError;
use crate::video::domain::frame_reader::{FrameReader, FrameTimestamp};

/// Decodes single pictures via ffmpeg-next (libavformat + libavcodec) and
/// converts them to RGBA with libswscale.
///
/// Every native handle lives in [`OpenStream`], so closing the reader or
/// dropping it tears down the container, decoder, frames and scaler exactly
/// once.
pub struct FfmpegFrameReader {
    stream: Option<OpenStream>,
    metadata: Option<VideoMetadata>,
    max_packets: usize,
}

impl FfmpegFrameReader {
    pub fn new() -> Self {
        Self {
            stream: None,
            metadata: None,
            max_packets: DEFAULT_MAX_PACKETS,
        }
    }

    /// Caps how many container packets a single read may consume before
    /// giving up with [`FrameReadError::PacketLimit`].
    pub fn with_max_packets(mut self, max_packets: usize) -> Self {
        self.max_packets = max_packets;
        self
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

impl Default for FfmpegFrameReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameReader for FfmpegFrameReader {
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, FrameReadError> {
        self.close();

        let container_err = |e: ffmpeg_next::Error| FrameReadError::ContainerOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        };

        ffmpeg_next::init().map_err(container_err)?;
        let input = ffmpeg_next::format::input(&path).map_err(container_err)?;
        let stream_index = select_video_stream(&input, path)?;

        let (decoder, time_base, fps, total_frames) = {
            let stream = input
                .stream(stream_index)
                .ok_or_else(|| FrameReadError::NoVideoStream {
                    path: path.to_path_buf(),
                })?;

            let codec_ctx =
                ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
                    .map_err(|e| FrameReadError::DecoderInit(Box::new(e)))?;
            let decoder = codec_ctx
                .decoder()
                .video()
                .map_err(|e| FrameReadError::DecoderInit(Box::new(e)))?;

            let tb = stream.time_base();
            let rate = stream.rate();
            let fps = if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            };

            (
                decoder,
                TimeBase::new(tb.numerator(), tb.denominator()),
                fps,
                stream.frames().max(0) as usize,
            )
        };

        let width = decoder.width();
        let height = decoder.height();
        if width == 0 || height == 0 {
            return Err(FrameReadError::DecoderInit(
                format!("stream reports invalid dimensions {width}x{height}").into(),
            ));
        }

        let metadata = VideoMetadata {
            width,
            height,
            stream_index,
            time_base,
            fps,
            total_frames,
            codec: decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            source_path: Some(path.to_path_buf()),
        };

        log::info!(
            "Opened {}: stream #{} {} {}x{} @ {:.2} fps",
            path.display(),
            stream_index,
            metadata.codec,
            width,
            height,
            fps
        );

        self.stream = Some(OpenStream {
            decoder,
            scaler: None,
            decoded: VideoFrame::empty(),
            converted: VideoFrame::empty(),
            stream_index,
            width,
            height,
            end_of_input: false,
            input,
        });
        self.metadata = Some(metadata.clone());

        Ok(metadata)
    }

    fn metadata(&self) -> Option<&VideoMetadata> {
        self.metadata.as_ref()
    }

    fn read_frame_into(&mut self, buffer: &mut [u8]) -> Result<FrameTimestamp, FrameReadError> {
        let max_packets = self.max_packets;
        let stream = self.stream.as_mut().ok_or(FrameReadError::NotOpened)?;

        let expected = Frame::buffer_len(stream.width, stream.height);
        if buffer.len() != expected {
            return Err(FrameReadError::BufferSize {
                expected,
                actual: buffer.len(),
            });
        }

        stream.decode_next(max_packets)?;
        stream.convert_into(buffer)?;

        Ok(stream.decoded.pts().or(stream.decoded.timestamp()))
    }

    fn seek(&mut self, timestamp: i64) -> Result<(), FrameReadError> {
        let time_base = self
            .metadata
            .as_ref()
            .map(|m| m.time_base)
            .ok_or(FrameReadError::NotOpened)?;
        let stream = self.stream.as_mut().ok_or(FrameReadError::NotOpened)?;

        let target = time_base.to_micros(timestamp);
        stream
            .input
            .seek(target, ..target)
            .map_err(|e| FrameReadError::Seek {
                timestamp,
                source: Box::new(e),
            })?;
        stream.decoder.flush();
        stream.end_of_input = false;

        log::debug!("Seeked to pts {timestamp} ({target} us)");
        Ok(())
    }

    fn close(&mut self) {
        self.stream = None;
        self.metadata = None;
    }
}

/// Native decoding state for one open source.
///
/// Fields drop in declaration order, so the container goes last.
struct OpenStream {
    decoder: ffmpeg_next::decoder::Video,
    scaler: Option<scaling::Context>,
    decoded: VideoFrame,
    converted: VideoFrame,
    stream_index: usize,
    width: u32,
    height: u32,
    end_of_input: bool,
    input: Input,
}

impl OpenStream {
    /// Pulls packets until the decoder yields one picture into `self.decoded`.
    fn decode_next(&mut self, max_packets: usize) -> Result<(), FrameReadError> {
        if self.receive()? {
            return Ok(());
        }

        let mut packets_read = 0;
        while !self.end_of_input {
            if packets_read >= max_packets {
                return Err(FrameReadError::PacketLimit { limit: max_packets });
            }

            let mut packet = ffmpeg_next::Packet::empty();
            match packet.read(&mut self.input) {
                Ok(()) => packets_read += 1,
                Err(ffmpeg_next::Error::Eof) => {
                    self.decoder
                        .send_eof()
                        .map_err(|e| FrameReadError::Decode(Box::new(e)))?;
                    self.end_of_input = true;
                    break;
                }
                Err(e) => return Err(FrameReadError::Decode(Box::new(e))),
            }

            if packet.stream() != self.stream_index {
                continue;
            }

            self.decoder
                .send_packet(&packet)
                .map_err(|e| FrameReadError::Decode(Box::new(e)))?;

            if self.receive()? {
                return Ok(());
            }
        }

        // Drain whatever the decoder still buffers after end of input.
        if self.receive()? {
            Ok(())
        } else {
            Err(FrameReadError::EndOfStream)
        }
    }

    /// Returns `Ok(false)` when the decoder needs more input or is drained.
    fn receive(&mut self) -> Result<bool, FrameReadError> {
        match self.decoder.receive_frame(&mut self.decoded) {
            Ok(()) => {
                log::debug!(
                    "Frame {:?} pts {:?} best-effort {:?} key_frame {}",
                    self.decoded.kind(),
                    self.decoded.pts(),
                    self.decoded.timestamp(),
                    self.decoded.is_key()
                );
                Ok(true)
            }
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffmpeg_next::util::error::EAGAIN => {
                Ok(false)
            }
            Err(ffmpeg_next::Error::Eof) => Ok(false),
            Err(e) => Err(FrameReadError::Decode(Box::new(e))),
        }
    }

    /// Converts `self.decoded` to RGBA and copies it into `buffer` without
    /// row padding.
    fn convert_into(&mut self, buffer: &mut [u8]) -> Result<(), FrameReadError> {
        let format = self.decoded.format();
        let src_width = self.decoded.width();
        let src_height = self.decoded.height();

        let stale = self.scaler.as_ref().map_or(true, |s| {
            let input = s.input();
            input.format != format || input.width != src_width || input.height != src_height
        });
        if stale {
            let scaler = scaling::Context::get(
                format,
                src_width,
                src_height,
                Pixel::RGBA,
                self.width,
                self.height,
                scaling::Flags::BILINEAR,
            )
            .map_err(|e| FrameReadError::ColorConversion(Box::new(e)))?;
            self.scaler = Some(scaler);
        }

        let scaler = self
            .scaler
            .as_mut()
            .ok_or_else(|| FrameReadError::ColorConversion("scaler unavailable".into()))?;
        scaler
            .run(&self.decoded, &mut self.converted)
            .map_err(|e| FrameReadError::ColorConversion(Box::new(e)))?;

        copy_packed_rows(
            self.converted.data(0),
            self.converted.stride(0),
            self.width as usize * RGBA_CHANNELS,
            self.height as usize,
            buffer,
        );
        Ok(())
    }
}

/// What stream selection needs to know about one container stream.
#[derive(Debug, Clone, Copy)]
struct StreamCandidate {
    index: usize,
    medium: ffmpeg_next::media::Type,
    codec: ffmpeg_next::codec::Id,
    decodable: bool,
}

fn select_video_stream(input: &Input, path: &Path) -> Result<usize, FrameReadError> {
    let candidates = input.streams().map(|stream| {
        let params = stream.parameters();
        let codec = params.id();
        StreamCandidate {
            index: stream.index(),
            medium: params.medium(),
            codec,
            decodable: ffmpeg_next::decoder::find(codec).is_some(),
        }
    });
    pick_video_stream(candidates, path)
}

/// Index of the first video stream that has a registered decoder.
fn pick_video_stream(
    candidates: impl IntoIterator<Item = StreamCandidate>,
    path: &Path,
) -> Result<usize, FrameReadError> {
    let mut undecodable = None;

    for candidate in candidates {
        if candidate.medium != ffmpeg_next::media::Type::Video {
            continue;
        }
        if candidate.decodable {
            return Ok(candidate.index);
        }
        undecodable.get_or_insert(candidate.codec);
    }

    match undecodable {
        Some(id) => Err(FrameReadError::UnsupportedCodec {
            codec: format!("{id:?}"),
        }),
        None => Err(FrameReadError::NoVideoStream {
            path: path.to_path_buf(),
        }),
    }
}

/// Copies `rows` rows of `row_bytes` each out of a strided plane into a
/// tightly packed destination.
fn copy_packed_rows(src: &[u8], stride: usize, row_bytes: usize, rows: usize, dst: &mut [u8]) {
    for (row, dst_row) in dst.chunks_exact_mut(row_bytes).take(rows).enumerate() {
        let start = row * stride;
        dst_row.copy_from_slice(&src[start..start + row_bytes]);
    }
}
