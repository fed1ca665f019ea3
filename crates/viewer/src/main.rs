mod app;

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use winit::event_loop::EventLoop;

use frameview_core::pipeline::load_frame_use_case::{LoadFrameError, LoadFrameUseCase};
use frameview_core::presentation::domain::projection::QuadLayout;
use frameview_core::shared::constants::{
    DEFAULT_MAX_PACKETS, DEFAULT_VIDEO_PATH, QUAD_OFFSET_X, QUAD_OFFSET_Y, WINDOW_HEIGHT,
    WINDOW_TITLE, WINDOW_WIDTH,
};
use frameview_core::shared::frame::Frame;
use frameview_core::video::domain::image_writer::ImageWriter;
use frameview_core::video::infrastructure::ffmpeg_frame_reader::FfmpegFrameReader;
use frameview_core::video::infrastructure::image_file_writer::ImageFileWriter;

use app::{ViewerApp, ViewerConfig};

/// Decodes a single frame of a video and shows it in a window.
#[derive(Parser, Debug)]
#[command(name = "frameview")]
struct Cli {
    /// Input video file.
    #[arg(default_value = DEFAULT_VIDEO_PATH)]
    input: PathBuf,

    /// Horizontal position of the frame inside the window, in pixels.
    #[arg(long, default_value_t = QUAD_OFFSET_X, allow_negative_numbers = true)]
    offset_x: f32,

    /// Vertical position of the frame inside the window, in pixels.
    #[arg(long, default_value_t = QUAD_OFFSET_Y, allow_negative_numbers = true)]
    offset_y: f32,

    /// Initial window width.
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    width: u32,

    /// Initial window height.
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    height: u32,

    /// Window title.
    #[arg(long, default_value = WINDOW_TITLE)]
    title: String,

    /// Seek to this timestamp (in the stream's time base) before decoding.
    #[arg(long, allow_negative_numbers = true)]
    seek: Option<i64>,

    /// Give up after this many packets without a decoded picture.
    #[arg(long, default_value_t = DEFAULT_MAX_PACKETS)]
    max_packets: usize,

    /// Also save the decoded frame to this image file.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let (event_loop, config, frame) = prepare(&cli, || Ok(EventLoop::new()?))?;
    let mut app = ViewerApp::new(config, frame);
    event_loop.run_app(&mut app)?;

    app.finish()
}

/// Connects to the display first, then decodes the frame to show. Without a
/// display nothing is decoded.
fn prepare<D>(
    cli: &Cli,
    open_display: impl FnOnce() -> Result<D, Box<dyn Error>>,
) -> Result<(D, ViewerConfig, Frame), Box<dyn Error>> {
    let display = open_display()?;
    let frame = load_frame(cli)?;

    let config = ViewerConfig {
        title: cli.title.clone(),
        window_size: (cli.width, cli.height),
        layout: QuadLayout::for_frame(cli.offset_x, cli.offset_y, frame.width(), frame.height()),
    };
    Ok((display, config, frame))
}

fn load_frame(cli: &Cli) -> Result<Frame, Box<dyn Error>> {
    let reader = FfmpegFrameReader::new().with_max_packets(cli.max_packets);
    let image_writer: Option<Box<dyn ImageWriter>> = cli
        .snapshot
        .as_ref()
        .map(|_| Box::new(ImageFileWriter::new()) as Box<dyn ImageWriter>);

    let mut use_case = LoadFrameUseCase::new(Box::new(reader), image_writer);
    let (_metadata, frame) = use_case
        .execute(&cli.input, cli.seek, cli.snapshot.as_deref())
        .map_err(describe_load_failure)?;
    Ok(frame)
}

fn describe_load_failure(err: LoadFrameError) -> Box<dyn Error> {
    match err {
        LoadFrameError::Read(e) if e.is_open_failure() => {
            format!("Unable to open video: {e}").into()
        }
        other => other.into(),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if cli.width == 0 || cli.height == 0 {
        return Err(format!(
            "Window size must be non-zero, got {}x{}",
            cli.width, cli.height
        )
        .into());
    }
    if cli.max_packets == 0 {
        return Err("--max-packets must be at least 1".into());
    }
    if !cli.offset_x.is_finite() || !cli.offset_y.is_finite() {
        return Err("Frame offset must be a finite number".into());
    }
    Ok(())
}
