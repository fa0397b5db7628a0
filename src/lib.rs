pub mod common;
pub mod ir;
pub mod op;
pub mod report;
pub mod session;
mod utility;
