pub mod context;
pub mod presyntax;
pub mod term;
pub mod tokenized;
