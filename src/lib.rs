pub mod framing;
pub mod grease;
pub mod types;
pub mod varint;

pub use framing::*;
pub use grease::*;
pub use types::*;
pub use varint::*;
