pub mod check;
pub mod conversion;
pub mod equivalence;
pub mod lex;
pub mod normalize;
pub mod parse;
pub mod substitute;
pub mod unparse;

pub use check::{check, infer};
