use std::rc::Rc;

use lasso::Spur;

use crate::ir::term::Term;

#[derive(Debug, Clone)]
pub struct ParsedProgram {
	pub statements: Vec<Statement>,
}

/// A top-level statement, with the range of tokens it spans.
#[derive(Debug, Clone)]
pub struct Statement {
	pub range: (usize, usize),
	pub kind: StatementKind,
}

#[derive(Debug, Clone)]
pub enum StatementKind {
	// term : ty.
	Check { term: Rc<Term>, ty: Rc<Term> },
	// name := value.
	Define { name: Spur, value: Rc<Term> },
}
