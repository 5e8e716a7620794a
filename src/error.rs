use glutin::{ContextError, CreationError};

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop the demo.
///
/// Shader compilation and linking problems are not errors here. They are logged and the demo
/// keeps running with whatever program it ended up with.
#[derive(Debug)]
pub enum Error {
    /// The windowing system could not be reached. Holds the backend's panic message.
    EventLoop(String),
    /// The window or its OpenGL context could not be created.
    Creation(CreationError),
    /// The context could not be made current or failed to swap buffers.
    Context(ContextError),
    /// OpenGL handed back a zero name when asked for a new object.
    Resource(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EventLoop(msg) => write!(f, "failed to start the event loop: {}", msg),
            Error::Creation(err) => write!(f, "failed to create window: {}", err),
            Error::Context(err) => write!(f, "OpenGL context error: {}", err),
            Error::Resource(what) => write!(f, "failed to allocate {}", what),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Creation(err) => Some(err),
            Error::Context(err) => Some(err),
            Error::EventLoop(_) | Error::Resource(_) => None,
        }
    }
}

impl From<CreationError> for Error {
    fn from(err: CreationError) -> Self {
        Error::Creation(err)
    }
}

impl From<ContextError> for Error {
    fn from(err: ContextError) -> Self {
        Error::Context(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn resource_error_names_the_object() {
        let err = Error::Resource("element buffer");
        assert_eq!(err.to_string(), "failed to allocate element buffer");
        assert!(err.source().is_none());
    }

    #[test]
    fn creation_error_keeps_its_source() {
        let err = Error::from(CreationError::NotSupported("no GL 3.3".to_string()));
        assert!(err.to_string().starts_with("failed to create window"));
        assert!(err.source().is_some());
    }

    #[test]
    fn context_error_converts() {
        let err: Error = ContextError::ContextLost.into();
        match err {
            Error::Context(ContextError::ContextLost) => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
