use std::rc::Rc;

use tracing::trace;

use crate::{
	common::{Label, Name},
	ir::term::Term,
	op::normalize::{Normalize as _, Unfold},
};

/// Decides whether two terms are judgementally equal, unfolding definitions from `definitions`.
///
/// A `false` result means "not provably equal"; it is an ordinary outcome, not an error.
pub fn check_eq(left: &Rc<Term>, right: &Rc<Term>, definitions: &impl Unfold) -> bool {
	Converter::new(definitions).can_convert(left, right)
}

/// What a comparison of two identifiers may assume about them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Assumption {
	/// Both are bound by the same pair of binders, so they stand for the same variable.
	MaybeEqual,
	/// Only one of them is bound by the binders in question, so they can never be equal.
	Killed,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Side {
	Left,
	Right,
}

pub struct Converter<'d, D> {
	definitions: &'d D,
	// Binders entered so far, innermost last: what the left term binds, and what the right term binds.
	binders: Vec<(Label, Label)>,
}

impl<'d, D: Unfold> Converter<'d, D> {
	pub fn new(definitions: &'d D) -> Self { Self { definitions, binders: Vec::new() } }

	pub fn can_convert(&mut self, left: &Rc<Term>, right: &Rc<Term>) -> bool {
		let left = left.whnf(&Scoped { converter: self, side: Side::Left });
		let right = right.whnf(&Scoped { converter: self, side: Side::Right });

		use Term::*;
		match (left.as_ref(), right.as_ref()) {
			(Zero, Zero) | (One, One) | (Singleton, Singleton) => true,
			(Universe(left), Universe(right)) => left == right,

			// Free identifiers have already been unfolded if they have definitions.
			(Identifier(left), Identifier(right)) => match self.assumption(*left, *right) {
				Some(Assumption::MaybeEqual) => true,
				Some(Assumption::Killed) => false,
				None => left == right,
			},

			// Dependent functions.
			(
				Pi { binder: left_binder, domain: left_domain, codomain: left_codomain },
				Pi { binder: right_binder, domain: right_domain, codomain: right_codomain },
			) =>
				self.can_convert(left_domain, right_domain)
					&& self.under(*left_binder, *right_binder, left_codomain, right_codomain),
			(
				Abstraction { binder: left_binder, domain: left_domain, body: left_body },
				Abstraction { binder: right_binder, domain: right_domain, body: right_body },
			) =>
				self.can_convert(left_domain, right_domain)
					&& self.under(Some(*left_binder), Some(*right_binder), left_body, right_body),
			(
				Call { function: left_function, argument: left_argument },
				Call { function: right_function, argument: right_argument },
			) => self.can_convert(left_function, right_function) && self.can_convert(left_argument, right_argument),

			// Dependent pairs.
			(
				Sigma { binder: left_binder, first: left_first, second: left_second },
				Sigma { binder: right_binder, first: right_first, second: right_second },
			)
			| (
				Tuple { binder: left_binder, first: left_first, second: left_second },
				Tuple { binder: right_binder, first: right_first, second: right_second },
			) =>
				self.can_convert(left_first, right_first)
					&& self.under(*left_binder, *right_binder, left_second, right_second),
			(
				Projection { field: left_field, argument: left_argument },
				Projection { field: right_field, argument: right_argument },
			) => left_field == right_field && self.can_convert(left_argument, right_argument),

			// Paths.
			(Refl(left), Refl(right)) | (Univalence(left), Univalence(right)) => self.can_convert(left, right),
			(
				Path { left: left_left, ty: left_ty, right: left_right },
				Path { left: right_left, ty: right_ty, right: right_right },
			) =>
				self.can_convert(left_left, right_left)
					&& self.can_convert(left_ty, right_ty)
					&& self.can_convert(left_right, right_right),

			// Inconvertible.
			_ => {
				trace!(?left, ?right, "inconvertible head constructors");
				false
			}
		}
	}

	// Compares two scoped subterms after entering their binders.
	fn under(&mut self, left_binder: Label, right_binder: Label, left: &Rc<Term>, right: &Rc<Term>) -> bool {
		self.binders.push((left_binder, right_binder));
		let result = self.can_convert(left, right);
		self.binders.pop();
		result
	}

	// Distance to the innermost binder of `name` on one side.
	fn bound(&self, side: Side, name: Name) -> Option<usize> {
		self.binders.iter().rev().position(|(left, right)| match side {
			Side::Left => *left == Some(name),
			Side::Right => *right == Some(name),
		})
	}

	/// Looks up what the entered binders say about a pair of identifiers. `None` means both are free.
	pub fn assumption(&self, left: Name, right: Name) -> Option<Assumption> {
		match (self.bound(Side::Left, left), self.bound(Side::Right, right)) {
			(None, None) => None,
			(Some(left), Some(right)) if left == right => Some(Assumption::MaybeEqual),
			_ => Some(Assumption::Killed),
		}
	}
}

// The definitions visible from one side: bound names are never unfolded.
struct Scoped<'c, 'd, D> {
	converter: &'c Converter<'d, D>,
	side: Side,
}

impl<'c, 'd, D: Unfold> Unfold for Scoped<'c, 'd, D> {
	fn unfold(&self, name: Name) -> Option<Rc<Term>> {
		match self.converter.bound(self.side, name) {
			Some(_) => None,
			None => self.converter.definitions.unfold(name),
		}
	}
}
