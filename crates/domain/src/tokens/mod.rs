//! Override tables and token resolution

mod resolution;
mod table;

pub use resolution::{Resolution, TokenHit, TokenLayers, resolve};
pub use table::{TokenScope, TokenTable};
