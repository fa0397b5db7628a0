use std::rc::Rc;

use crate::{
	common::{Field, Name},
	ir::{context::Context, term::Term},
	op::substitute::Substitute as _,
};

/// Decides which identifiers may be delta-reduced, and to what.
pub trait Unfold {
	fn unfold(&self, name: Name) -> Option<Rc<Term>>;
}

impl Unfold for Context {
	fn unfold(&self, name: Name) -> Option<Rc<Term>> { self.lookup(name)?.value().cloned() }
}

// A scope with no definitions at all.
impl Unfold for () {
	fn unfold(&self, _: Name) -> Option<Rc<Term>> { None }
}

pub trait Normalize {
	/// Reduces a term until its head constructor is stable.
	///
	/// This is only guaranteed to terminate for well-typed terms.
	fn whnf(&self, definitions: &impl Unfold) -> Rc<Term>;
}

impl Normalize for Rc<Term> {
	fn whnf(&self, definitions: &impl Unfold) -> Rc<Term> {
		let mut term = self.clone();
		loop {
			term = match term.as_ref() {
				Term::Identifier(name) => match definitions.unfold(*name) {
					Some(value) => value,
					None => return term.clone(),
				},
				Term::Call { function, argument } => {
					let function = function.whnf(definitions);
					match function.as_ref() {
						Term::Abstraction { binder, body, .. } => body.substitute(*binder, argument),
						// Transport along refl is the identity.
						Term::Call { function: inner, .. } if matches!(inner.as_ref(), Term::Refl(_)) =>
							argument.clone(),
						_ => return Term::call(function, argument.clone()),
					}
				}
				Term::Projection { field, argument } => {
					let argument = argument.whnf(definitions);
					let Term::Tuple { binder, first, second } = argument.as_ref() else {
						return Term::projection(*field, argument);
					};
					match (field, binder) {
						(Field::Base, _) => first.clone(),
						(Field::Fiber, None) => second.clone(),
						(Field::Fiber, Some(binder)) => second.substitute(*binder, first),
					}
				}
				_ => return term.clone(),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn var(c: char) -> Rc<Term> { Term::identifier(Name::synthetic(c)) }

	#[test]
	fn test_beta_reduction() {
		let x = Name::synthetic('x');
		let identity = Term::abstraction(x, Term::universe(0), var('x'));
		assert_eq!(Term::call(identity, Rc::new(Term::One)).whnf(&()), Rc::new(Term::One));
	}

	#[test]
	fn test_head_normal_forms_are_stable() {
		let redex = Term::call(Term::abstraction(Name::synthetic('x'), var('A'), var('x')), var('a'));
		let neutral = Term::call(var('f'), redex);
		// Only the head is reduced, so the argument keeps its redex.
		assert_eq!(neutral.whnf(&()), neutral);
		let pi = Term::function(Term::universe(0), Term::universe(0));
		assert_eq!(pi.whnf(&()), pi);
	}

	#[test]
	fn test_projections() {
		let tuple = Term::tuple(None, Rc::new(Term::Zero), Rc::new(Term::One));
		assert_eq!(Term::projection(Field::Base, tuple.clone()).whnf(&()), Rc::new(Term::Zero));
		assert_eq!(Term::projection(Field::Fiber, tuple).whnf(&()), Rc::new(Term::One));
	}

	#[test]
	fn test_dependent_projection_substitutes_basepoint() {
		let x = Name::synthetic('x');
		let tuple = Term::tuple(Some(x), Rc::new(Term::Zero), var('x'));
		assert_eq!(Term::projection(Field::Fiber, tuple.clone()).whnf(&()), Rc::new(Term::Zero));
		assert_eq!(Term::projection(Field::Base, tuple).whnf(&()), Rc::new(Term::Zero));
	}

	#[test]
	fn test_projection_of_neutral_is_stuck() {
		let term = Term::projection(Field::Base, var('p'));
		assert_eq!(term.whnf(&()), term);
	}

	#[test]
	fn test_transport_along_refl() {
		let transport = Term::call(Term::call(Term::refl(var('a')), var('P')), var('u'));
		assert_eq!(transport.whnf(&()), var('u'));
	}

	#[test]
	fn test_delta_reduction() {
		let a = Name::synthetic('a');
		let mut context = Context::empty();
		context.define(a, Rc::new(Term::Singleton), Rc::new(Term::One));
		assert_eq!(var('a').whnf(&context), Rc::new(Term::Singleton));
		// Assumptions shadow definitions and are already head-normal.
		let context = context.assume(Some(a), Rc::new(Term::One));
		assert_eq!(var('a').whnf(&*context), var('a'));
	}

	#[test]
	fn test_reduction_continues_after_unfolding() {
		let x = Name::synthetic('x');
		let f = Name::synthetic('f');
		let mut context = Context::empty();
		context.define(f, Term::abstraction(x, Term::universe(0), var('x')), Term::universe(1));
		let pair = Term::tuple(None, Term::universe(0), var('b'));
		let term = Term::projection(Field::Base, Term::call(var('f'), pair));
		assert_eq!(term.whnf(&context), Term::universe(0));
	}
}
