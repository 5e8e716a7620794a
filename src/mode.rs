//! Filled vs. wireframe rasterization, and the per-frame toggle between them.

use gl::types::*;

/// How triangles are rasterized, applied to both front and back faces.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u32)]
pub enum PolygonMode {
    Fill = gl::FILL,
    /// Wireframe: only the edges are drawn.
    Line = gl::LINE,
}

impl PolygonMode {
    pub fn to_gl_enum(self) -> GLenum {
        self as GLenum
    }

    pub fn flipped(self) -> PolygonMode {
        match self {
            PolygonMode::Fill => PolygonMode::Line,
            PolygonMode::Line => PolygonMode::Fill,
        }
    }
}

impl Default for PolygonMode {
    fn default() -> Self {
        PolygonMode::Fill
    }
}

/// Hands out the polygon mode for each frame.
///
/// The first frame is filled; when alternating, every frame after that flips.
#[derive(Clone, Debug)]
pub struct ModeToggle {
    next: PolygonMode,
    alternate: bool,
}

impl ModeToggle {
    pub fn new(alternate: bool) -> Self {
        ModeToggle {
            next: PolygonMode::Fill,
            alternate,
        }
    }

    /// Returns the mode for the frame about to be drawn and advances.
    pub fn next_frame(&mut self) -> PolygonMode {
        let mode = self.next;
        if self.alternate {
            self.next = mode.flipped();
        }
        mode
    }
}
