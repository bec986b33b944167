use thiserror::Error;

use crate::domain::view::View;

#[derive(Debug, Error)]
#[error("Failed to render view `{view}`: {message}")]
pub struct RenderError {
    pub view: &'static str,
    pub message: String,
}

/// Turns a named view and its payload into a response body.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &View) -> Result<String, RenderError>;
}
