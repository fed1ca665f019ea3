use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresentError {
    #[error("failed to create window surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no GPU adapter compatible with the window surface")]
    NoAdapter,
    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("frame {width}x{height} exceeds the maximum texture size {max}")]
    TextureTooLarge { width: u32, height: u32, max: u32 },
    #[error("frame is empty")]
    EmptyFrame,
    #[error("GPU ran out of memory while acquiring the next surface texture")]
    OutOfMemory,
}
