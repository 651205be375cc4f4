//! Content blocks: typed payloads and their HTML presentation.

mod block;
mod html;

pub use block::*;
pub use html::{BlockRenderer, InteractionSink, render_block, render_body};
