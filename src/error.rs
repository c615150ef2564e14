//! Startup failures
//!
//! Everything that can go wrong happens before the first frame. Once the
//! frame loop is running, update and draw are infallible.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no browser window available")]
    NoWindow,
    #[error("missing DOM element #{0}")]
    MissingElement(&'static str),
    #[error("element #{0} is not a canvas")]
    NotACanvas(&'static str),
    #[error("failed to create render surface: {0}")]
    Surface(String),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(String),
    #[error("failed to create GPU device: {0}")]
    Device(String),
    #[error("audio initialization failed: {0}")]
    Audio(String),
    #[error("failed to initialize logger: {0}")]
    Logger(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        assert_eq!(
            StartupError::MissingElement("canvas").to_string(),
            "missing DOM element #canvas"
        );
        assert_eq!(
            StartupError::Adapter("none".into()).to_string(),
            "no suitable GPU adapter: none"
        );
    }
}
