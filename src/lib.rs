//! Opens a window and draws a quad made of two indexed triangles, flipping between filled and
//! wireframe rasterization every frame.
//!
//! Powered by OpenGL. The window and context are provided by glutin; GL objects (program,
//! vertex array, vertex and element buffers) are created once and live until the window
//! closes.
//!
//! ```no_run
//! quad_demo::logging::init(Default::default());
//! quad_demo::run(quad_demo::Config::default()).unwrap();
//! ```

#[macro_use]
extern crate rustic_gl;

pub extern crate gl;
pub extern crate glutin;

mod config;
mod error;
pub mod app;
pub mod core;
pub mod logging;
pub mod mode;

pub use crate::app::App;
pub use crate::config::{Config, ConfigBuilder};
pub use crate::core::Renderer;
pub use crate::error::{Error, Result};
pub use crate::mode::PolygonMode;

use glutin::event_loop::EventLoop;

use std::any::Any;
use std::panic;

/// Opens the window described by `config`, renders until it is closed, then tears everything
/// down.
///
/// GL objects are deleted before the context goes away. If no display can be reached the
/// windowing backend panics while starting up; that panic is caught and returned as
/// [`Error::EventLoop`], although the default panic hook will already have printed it.
pub fn run(config: Config) -> Result<()> {
    let mut event_loop = create_event_loop()?;
    let mut app = App::new(&config, &event_loop)?;
    app.run(&mut event_loop)
}

fn create_event_loop() -> Result<EventLoop<()>> {
    panic::catch_unwind(EventLoop::new).map_err(|payload| Error::EventLoop(panic_message(payload)))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_panics_become_messages() {
        let payload = panic::catch_unwind(|| panic!("Failed to initialize any backend!"))
            .unwrap_err();
        assert_eq!(panic_message(payload), "Failed to initialize any backend!");

        let payload = panic::catch_unwind(|| panic!("no display {}", 0)).unwrap_err();
        assert_eq!(panic_message(payload), "no display 0");

        let payload = panic::catch_unwind(|| panic::panic_any(7u8)).unwrap_err();
        assert_eq!(panic_message(payload), "unknown panic");
    }

    #[test]
    fn event_loop_errors_display_the_cause() {
        let err = Error::EventLoop("no display".to_string());
        assert_eq!(err.to_string(), "failed to start the event loop: no display");
    }
}
