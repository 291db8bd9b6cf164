pub mod common;
pub mod error;
pub mod tags;

pub use common::*;
pub use error::*;
pub use tags::*;
