/// Video opened when no path is given on the command line.
pub const DEFAULT_VIDEO_PATH: &str = "assets/sample.mp4";

pub const WINDOW_TITLE: &str = "frameview";
pub const WINDOW_WIDTH: u32 = 640;
pub const WINDOW_HEIGHT: u32 = 480;

/// Top-left corner of the frame quad, in framebuffer pixels.
pub const QUAD_OFFSET_X: f32 = 200.0;
pub const QUAD_OFFSET_Y: f32 = 200.0;

/// Upper bound on container packets read while waiting for one decoded picture.
pub const DEFAULT_MAX_PACKETS: usize = 4096;

/// Bytes per pixel of the RGBA buffers handed to the presenter.
pub const RGBA_CHANNELS: usize = 4;

pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
