pub mod error;
pub mod html;
pub mod html_render;
pub mod result;
pub mod storage;
pub mod vdom;

pub use error::*;
pub use html::*;
pub use html_render::*;
pub use result::*;
pub use storage::*;
pub use vdom::*;
