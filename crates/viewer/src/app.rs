use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use frameview_core::presentation::domain::projection::QuadLayout;
use frameview_core::presentation::infrastructure::frame_presenter::{
    FramePresenter, RenderOutcome,
};
use frameview_core::shared::frame::Frame;

pub struct ViewerConfig {
    pub title: String,
    pub window_size: (u32, u32),
    pub layout: QuadLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Running,
    Closing,
}

/// Window shell around a [`FramePresenter`].
///
/// The window and presenter are created on the first `resumed` and live
/// until the window is asked to close. Redraws happen in response to
/// window events only; between events the loop blocks.
pub struct ViewerApp {
    config: ViewerConfig,
    frame: Frame,
    // Presenter holds the surface, so it must be dropped before the window.
    presenter: Option<FramePresenter>,
    window: Option<Arc<Window>>,
    state: LoopState,
    error: Option<Box<dyn std::error::Error>>,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig, frame: Frame) -> Self {
        Self {
            config,
            frame,
            presenter: None,
            window: None,
            state: LoopState::Running,
            error: None,
        }
    }

    /// Consumes the app after the event loop returns, surfacing any fatal
    /// error raised inside a handler.
    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn std::error::Error>> {
        let (width, height) = self.config.window_size;
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();
        let presenter = FramePresenter::new(
            window.clone(),
            (size.width, size.height),
            &self.frame,
            self.config.layout,
        )?;

        log::info!(
            "Window {}x{} showing {}x{} frame at ({}, {})",
            size.width,
            size.height,
            self.frame.width(),
            self.frame.height(),
            self.config.layout.x,
            self.config.layout.y
        );

        self.presenter = Some(presenter);
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };
        match presenter.render() {
            Ok(outcome) if needs_retry(outcome) => {
                log::debug!("Redraw skipped; retrying");
                self.request_redraw();
            }
            Ok(_) => {}
            Err(e) => self.fail(event_loop, Box::new(e)),
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.state = LoopState::Closing;
        self.presenter = None;
        self.window = None;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Box<dyn std::error::Error>) {
        self.error = Some(error);
        self.close(event_loop);
    }
}

/// A skipped redraw left nothing on screen, so another one is queued rather
/// than waiting for an unrelated window event.
fn needs_retry(outcome: RenderOutcome) -> bool {
    matches!(outcome, RenderOutcome::Skipped)
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.state == LoopState::Closing {
            return;
        }
        event_loop.set_control_flow(ControlFlow::Wait);

        if let Err(e) = self.open_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.state == LoopState::Closing {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                self.close(event_loop);
                return;
            }
            WindowEvent::Resized(size) => {
                if let Some(presenter) = self.presenter.as_mut() {
                    presenter.resize(size.width, size.height);
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let (Some(presenter), Some(window)) = (self.presenter.as_mut(), &self.window) {
                    let size = window.inner_size();
                    presenter.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                return;
            }
            _ => {}
        }

        // Every other event wakes the loop for one more redraw of the same frame.
        self.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::presented(RenderOutcome::Presented, false)]
    #[case::skipped(RenderOutcome::Skipped, true)]
    fn test_needs_retry(#[case] outcome: RenderOutcome, #[case] expected: bool) {
        assert_eq!(needs_retry(outcome), expected);
    }
}
