mod aggregation;
mod error;
mod export;
mod plural;
pub mod render;
pub(crate) mod repository;
mod root;
mod store;

pub use aggregation::*;
pub use error::*;
pub use export::*;
pub use plural::*;
pub use root::*;
pub use store::*;
