pub mod domains;
pub mod memory;
pub mod repository;
pub mod taxonomy;
pub mod traits;

pub use domains::*;
pub use memory::*;
pub use repository::*;
pub use taxonomy::*;
pub use traits::*;
