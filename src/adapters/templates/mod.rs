//! Page rendering adapters.
//!
//! - `HtmlPageRenderer` - Default escaped HTML pages

mod html_renderer;

pub use html_renderer::{escape, HtmlPageRenderer};
