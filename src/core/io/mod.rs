mod date;
mod read;

pub use date::*;
pub use read::*;

pub mod write;
pub use write::*;
