pub mod document;
pub mod outcome;

pub use document::*;
pub use outcome::*;
