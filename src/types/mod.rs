pub mod error;
pub mod frame;

pub use error::*;
pub use frame::*;
