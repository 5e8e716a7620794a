//! Contains the [`App`] struct, which ties the glutin context to the [`Renderer`] drawing into
//! it and drives the render loop.

use crate::config::Config;
use crate::core::{init_glutin_context, init_renderer, Renderer};
use crate::error::Result;

use glutin::event::{ElementState, Event, StartCause, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::platform::run_return::EventLoopExtRunReturn;
use glutin::{PossiblyCurrent, WindowedContext};

use log::info;

/// Escape closes the window as soon as it goes down.
pub fn closes_window(key: Option<VirtualKeyCode>, state: ElementState) -> bool {
    key == Some(VirtualKeyCode::Escape) && state == ElementState::Pressed
}

/// The window, its context and the GL objects living in it.
///
/// Field order matters: the renderer's GL objects are deleted on drop, which has to happen
/// while the context is still alive.
#[derive(Debug)]
pub struct App {
    pub renderer: Renderer,
    /// Contains the OpenGL context and its associated window. This is a
    /// [`glutin`](https://docs.rs/glutin/0.26.0/glutin/) struct; go see their documentation on
    /// [`WindowedContext`] for more information.
    pub context: WindowedContext<PossiblyCurrent>,
    pub frames: u64,
}

impl App {
    /// Open the window, compile the shaders and upload the quad.
    pub fn new(config: &Config, event_loop: &EventLoop<()>) -> Result<Self> {
        let context = init_glutin_context(config, event_loop)?;
        let size = context.window().inner_size();
        let renderer = init_renderer(config, size.width, size.height)?;
        Ok(App {
            renderer,
            context,
            frames: 0,
        })
    }

    /// Draw one frame and present it. Blocks on vsync when it is enabled.
    pub fn redraw(&mut self) -> Result<()> {
        self.renderer.redraw();
        self.context.swap_buffers()?;
        self.frames += 1;
        Ok(())
    }

    /// Run the render loop until the window is closed or Escape is pressed.
    ///
    /// The close request is only acted on once per loop iteration, after the pending events
    /// have been handled.
    pub fn run(&mut self, event_loop: &mut EventLoop<()>) -> Result<()> {
        let mut result = Ok(());
        let mut should_close = false;

        event_loop.run_return(|event, _, flow| {
            match event {
                Event::NewEvents(StartCause::Init) => *flow = ControlFlow::Poll,
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => should_close = true,
                    WindowEvent::KeyboardInput { input, .. } => {
                        if closes_window(input.virtual_keycode, input.state) {
                            should_close = true;
                        }
                    }
                    WindowEvent::Resized(size) => {
                        self.context.resize(size);
                        self.renderer.resize_viewport(size.width, size.height);
                    }
                    _ => {}
                },
                Event::MainEventsCleared => {
                    if should_close {
                        *flow = ControlFlow::Exit;
                    } else if let Err(err) = self.redraw() {
                        result = Err(err);
                        *flow = ControlFlow::Exit;
                    }
                }
                _ => {}
            }
        });

        info!("render loop finished after {} frames", self.frames);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_press_closes() {
        assert!(closes_window(Some(VirtualKeyCode::Escape), ElementState::Pressed));
    }

    #[test]
    fn escape_release_does_not_close() {
        assert!(!closes_window(Some(VirtualKeyCode::Escape), ElementState::Released));
    }

    #[test]
    fn other_keys_do_not_close() {
        assert!(!closes_window(Some(VirtualKeyCode::Q), ElementState::Pressed));
        assert!(!closes_window(Some(VirtualKeyCode::Space), ElementState::Pressed));
        assert!(!closes_window(None, ElementState::Pressed));
    }
}
