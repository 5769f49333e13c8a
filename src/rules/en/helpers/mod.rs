pub mod parse;
pub mod shift;

pub use parse::*;
pub use shift::*;
