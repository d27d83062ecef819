//! Window resource for the human rendering mode.
use crate::render::{Camera, Frame};
use anyhow::Result;
use log::info;
use pixels::{Pixels, SurfaceTexture};
use winit::{
    dpi::LogicalSize,
    event_loop::{ControlFlow, EventLoop},
    platform::run_return::EventLoopExtRunReturn,
    window::{Window, WindowBuilder},
};

/// Side length of the square window, in pixels.
pub const WINDOW_SIZE: u32 = 900;

/// Declared frame rate of the human rendering mode. The environment does
/// not throttle frames itself; pacing is left to the caller.
pub const RENDER_FPS: u32 = 20;

/// Window, pixel surface and camera of one environment instance.
///
/// Created lazily on the first frame of the human rendering mode and
/// dropped on `close`.
pub(crate) struct SwarmWindow {
    event_loop: EventLoop<()>,
    window: Window,
    pixels: Pixels,
    camera: Camera,
}

impl SwarmWindow {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_title("Aviary")
            .with_inner_size(LogicalSize::new(WINDOW_SIZE as f64, WINDOW_SIZE as f64))
            .with_resizable(false)
            .build(&event_loop)?;
        let surface_texture = SurfaceTexture::new(WINDOW_SIZE, WINDOW_SIZE, &window);
        let pixels = Pixels::new(WINDOW_SIZE, WINDOW_SIZE, surface_texture)?;
        info!("opened {}x{} render window", WINDOW_SIZE, WINDOW_SIZE);

        Ok(Self {
            event_loop,
            window,
            pixels,
            camera: Camera::new(WINDOW_SIZE, WINDOW_SIZE),
        })
    }

    /// The frame buffer to draw into and the scene camera.
    pub fn scene(&mut self) -> (Frame<'_>, &Camera) {
        let frame = Frame {
            buf: self.pixels.frame_mut(),
            width: WINDOW_SIZE,
            height: WINDOW_SIZE,
        };
        (frame, &self.camera)
    }

    /// Pumps pending window events and presents the drawn frame.
    pub fn present(&mut self) -> Result<()> {
        self.event_loop.run_return(|_event, _, control_flow| {
            *control_flow = ControlFlow::Exit;
        });
        self.pixels.render()?;
        self.window.request_redraw();
        Ok(())
    }
}
