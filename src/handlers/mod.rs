pub mod submit;

pub use submit::*;
