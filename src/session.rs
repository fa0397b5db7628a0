use std::{collections::HashMap, ops::AddAssign, rc::Rc};

use lasso::Spur;
use tracing::debug;

use crate::{
	common::{Name, Symbol},
	ir::{
		context::Context,
		presyntax::{ParsedProgram, Statement, StatementKind},
		term::Term,
	},
	op::{
		check::{check, infer, TypeError},
		substitute::{free_names, Substitute as _},
	},
};

/// An accepted statement.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
	Checked,
	/// `name` is the global the definition was committed as.
	Defined { name: Name, ty: Rc<Term> },
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Summary {
	pub accepted: usize,
	pub rejected: usize,
}

impl Summary {
	pub fn is_success(&self) -> bool { self.rejected == 0 }
}

impl AddAssign for Summary {
	fn add_assign(&mut self, other: Self) {
		self.accepted += other.accepted;
		self.rejected += other.rejected;
	}
}

/// Checks statements one at a time against a growing table of definitions.
///
/// Free names in a statement refer to the latest definition made before it. A later redefinition shadows the
/// name for later statements only.
#[derive(Default, Debug)]
pub struct Session {
	context: Context,
	latest: HashMap<Spur, Name>,
}

impl Session {
	pub fn new() -> Self { Self::default() }

	pub fn context(&self) -> &Context { &self.context }

	// Points every free source name that has a definition at its latest one.
	fn resolve(&self, term: &Rc<Term>) -> Rc<Term> {
		free_names(term).into_iter().fold(term.clone(), |term, name| {
			let Symbol::Source(symbol) = name.symbol else { return term };
			match self.latest.get(&symbol) {
				Some(global) => term.substitute(name, &Term::identifier(*global)),
				None => term,
			}
		})
	}

	/// Checks a single statement. Definitions are committed only once they have been inferred.
	pub fn run(&mut self, statement: &Statement) -> Result<Outcome, TypeError> {
		match &statement.kind {
			StatementKind::Check { term, ty } => {
				let (term, ty) = (self.resolve(term), self.resolve(ty));
				check(&mut self.context, &term, &ty)?;
				Ok(Outcome::Checked)
			}
			StatementKind::Define { name, value } => {
				let value = self.resolve(value);
				let ty = infer(&mut self.context, &value)?;
				let generation = self.latest.get(name).map_or(0, |previous| previous.generation + 1);
				let global = Name::global(*name, generation);
				self.context.define(global, value, ty.clone());
				self.latest.insert(*name, global);
				Ok(Outcome::Defined { name: global, ty })
			}
		}
	}

	/// Checks every statement of a program in order, handing each result to `report`.
	///
	/// A rejected statement does not affect later ones, unless `fail_fast` is set, in which case nothing after it is
	/// checked.
	pub fn run_program(
		&mut self,
		program: &ParsedProgram,
		fail_fast: bool,
		mut report: impl FnMut(&Statement, &Result<Outcome, TypeError>),
	) -> Summary {
		let mut summary = Summary::default();
		for statement in &program.statements {
			let result = self.run(statement);
			report(statement, &result);
			match result {
				Ok(_) => {
					debug!(range = ?statement.range, "accepted statement");
					summary.accepted += 1;
				}
				Err(error) => {
					debug!(range = ?statement.range, %error, "rejected statement");
					summary.rejected += 1;
					if fail_fast {
						break;
					}
				}
			}
		}
		summary
	}
}
