//! CLI command implementations.

mod list;
mod render;

pub(crate) use list::{list_langs, list_themes};
pub(crate) use render::RenderArgs;
