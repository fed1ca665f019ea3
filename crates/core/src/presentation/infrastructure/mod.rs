pub mod frame_presenter;
pub mod present_error;
mod surface;
