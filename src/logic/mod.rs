pub mod color;
pub mod display;
pub mod navigator;
pub mod validate;

pub use color::{soften, to_hex, to_hsl};
pub use display::display_name;
pub use navigator::*;
pub use validate::*;
