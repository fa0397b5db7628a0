use std::rc::Rc;

use crate::{
	common::{Label, Name, Symbol},
	ir::term::Term,
};

pub trait Substitute {
	/// Replaces every free occurrence of `name` with `replacement`.
	fn substitute(&self, name: Name, replacement: &Rc<Term>) -> Rc<Term>;
}

impl Substitute for Rc<Term> {
	fn substitute(&self, name: Name, replacement: &Rc<Term>) -> Rc<Term> {
		use Term::*;
		match self.as_ref() {
			Zero | One | Singleton | Universe(_) => self.clone(),
			Identifier(identifier) =>
				if *identifier == name {
					replacement.clone()
				} else {
					self.clone()
				},
			Pi { binder, domain, codomain } => {
				let domain = domain.substitute(name, replacement);
				let (binder, codomain) = substitute_under_label(*binder, codomain, name, replacement);
				Term::pi(binder, domain, codomain)
			}
			Abstraction { binder, domain, body } => {
				let domain = domain.substitute(name, replacement);
				let (binder, body) = substitute_under(*binder, body, name, replacement);
				Term::abstraction(binder, domain, body)
			}
			Call { function, argument } =>
				Term::call(function.substitute(name, replacement), argument.substitute(name, replacement)),
			Sigma { binder, first, second } => {
				let first = first.substitute(name, replacement);
				let (binder, second) = substitute_under_label(*binder, second, name, replacement);
				Term::sigma(binder, first, second)
			}
			Tuple { binder, first, second } => {
				let first = first.substitute(name, replacement);
				let (binder, second) = substitute_under_label(*binder, second, name, replacement);
				Term::tuple(binder, first, second)
			}
			Projection { field, argument } => Term::projection(*field, argument.substitute(name, replacement)),
			Refl(argument) => Term::refl(argument.substitute(name, replacement)),
			Path { left, ty, right } => Term::path(
				left.substitute(name, replacement),
				ty.substitute(name, replacement),
				right.substitute(name, replacement),
			),
			Univalence(inner) => Term::univalence(inner.substitute(name, replacement)),
		}
	}
}

fn substitute_under_label(
	binder: Label,
	body: &Rc<Term>,
	name: Name,
	replacement: &Rc<Term>,
) -> (Label, Rc<Term>) {
	match binder {
		Some(binder) => {
			let (binder, body) = substitute_under(binder, body, name, replacement);
			(Some(binder), body)
		}
		None => (None, body.substitute(name, replacement)),
	}
}

// Substitutes into the scope of `binder`, renaming the binder first if it would capture a free variable of
// the replacement.
fn substitute_under(binder: Name, body: &Rc<Term>, name: Name, replacement: &Rc<Term>) -> (Name, Rc<Term>) {
	if binder == name {
		return (binder, body.clone());
	}

	if occurs_free(replacement, binder) && occurs_free(body, name) {
		let renamed = fresh(binder, &[body.as_ref(), replacement.as_ref()]);
		let body = body.substitute(binder, &Term::identifier(renamed));
		(renamed, body.substitute(name, replacement))
	} else {
		(binder, body.substitute(name, replacement))
	}
}

/// Decides whether `name` occurs free in `term`.
pub fn occurs_free(term: &Term, name: Name) -> bool {
	use Term::*;
	match term {
		Zero | One | Singleton | Universe(_) => false,
		Identifier(identifier) => *identifier == name,
		Pi { binder, domain: head, codomain: body }
		| Sigma { binder, first: head, second: body }
		| Tuple { binder, first: head, second: body } =>
			occurs_free(head, name) || (*binder != Some(name) && occurs_free(body, name)),
		Abstraction { binder, domain, body } =>
			occurs_free(domain, name) || (*binder != name && occurs_free(body, name)),
		Call { function, argument } => occurs_free(function, name) || occurs_free(argument, name),
		Projection { argument, .. } | Refl(argument) | Univalence(argument) => occurs_free(argument, name),
		Path { left, ty, right } => occurs_free(left, name) || occurs_free(ty, name) || occurs_free(right, name),
	}
}

/// Lists the names occurring free in `term`, once each, in order of first occurrence.
pub fn free_names(term: &Term) -> Vec<Name> {
	let mut names = Vec::new();
	collect_free(term, &mut Vec::new(), &mut names);
	names
}

fn collect_free(term: &Term, bound: &mut Vec<Name>, names: &mut Vec<Name>) {
	use Term::*;
	match term {
		Zero | One | Singleton | Universe(_) => {}
		Identifier(name) =>
			if !bound.contains(name) && !names.contains(name) {
				names.push(*name);
			},
		Pi { binder, domain: head, codomain: body }
		| Sigma { binder, first: head, second: body }
		| Tuple { binder, first: head, second: body } => {
			collect_free(head, bound, names);
			collect_free_under(*binder, body, bound, names);
		}
		Abstraction { binder, domain, body } => {
			collect_free(domain, bound, names);
			collect_free_under(Some(*binder), body, bound, names);
		}
		Call { function, argument } => {
			collect_free(function, bound, names);
			collect_free(argument, bound, names);
		}
		Projection { argument, .. } | Refl(argument) | Univalence(argument) => collect_free(argument, bound, names),
		Path { left, ty, right } => {
			collect_free(left, bound, names);
			collect_free(ty, bound, names);
			collect_free(right, bound, names);
		}
	}
}

fn collect_free_under(binder: Label, body: &Term, bound: &mut Vec<Name>, names: &mut Vec<Name>) {
	bound.extend(binder);
	collect_free(body, bound, names);
	if binder.is_some() {
		bound.pop();
	}
}

/// Produces a variant of `name` that occurs nowhere (free or bound) in any of `avoid`.
pub fn fresh(name: Name, avoid: &[&Term]) -> Name {
	match avoid.iter().filter_map(|term| highest_generation(term, name.symbol)).max() {
		Some(generation) => name.with_generation(generation + 1),
		None => name,
	}
}

fn highest_generation(term: &Term, symbol: Symbol) -> Option<u32> {
	use Term::*;
	let of_name = |name: Name| (name.symbol == symbol).then_some(name.generation);
	let of_label = |label: Label| label.and_then(of_name);
	match term {
		Zero | One | Singleton | Universe(_) => None,
		Identifier(name) => of_name(*name),
		Pi { binder, domain: head, codomain: body }
		| Sigma { binder, first: head, second: body }
		| Tuple { binder, first: head, second: body } =>
			[of_label(*binder), highest_generation(head, symbol), highest_generation(body, symbol)]
				.into_iter()
				.flatten()
				.max(),
		Abstraction { binder, domain, body } =>
			[of_name(*binder), highest_generation(domain, symbol), highest_generation(body, symbol)]
				.into_iter()
				.flatten()
				.max(),
		Call { function, argument } =>
			highest_generation(function, symbol).max(highest_generation(argument, symbol)),
		Projection { argument, .. } | Refl(argument) | Univalence(argument) => highest_generation(argument, symbol),
		Path { left, ty, right } =>
			[highest_generation(left, symbol), highest_generation(ty, symbol), highest_generation(right, symbol)]
				.into_iter()
				.flatten()
				.max(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::common::Field;

	fn var(c: char) -> Rc<Term> { Term::identifier(Name::synthetic(c)) }

	#[test]
	fn test_replaces_free_occurrences() {
		let x = Name::synthetic('x');
		let term = Term::call(var('f'), var('x'));
		assert_eq!(term.substitute(x, &Term::universe(0)), Term::call(var('f'), Term::universe(0)));
	}

	#[test]
	fn test_binder_shadows_target() {
		let x = Name::synthetic('x');
		let term = Term::abstraction(x, Term::universe(0), var('x'));
		assert_eq!(term.substitute(x, &rc_one()), term);
	}

	#[test]
	fn test_domain_is_outside_scope() {
		let x = Name::synthetic('x');
		let term = Term::pi(Some(x), var('x'), var('x'));
		assert_eq!(term.substitute(x, &rc_one()), Term::pi(Some(x), rc_one(), var('x')));
	}

	#[test]
	fn test_dependent_tuple_second_is_scoped() {
		let x = Name::synthetic('x');
		let term = Term::tuple(Some(x), var('x'), Term::projection(Field::Base, var('x')));
		let expected = Term::tuple(Some(x), rc_one(), Term::projection(Field::Base, var('x')));
		assert_eq!(term.substitute(x, &rc_one()), expected);
	}

	#[test]
	fn test_avoids_capture() {
		// (\y: U0. x)[x := y] must not become \y: U0. y.
		let x = Name::synthetic('x');
		let y = Name::synthetic('y');
		let term = Term::abstraction(y, Term::universe(0), var('x'));
		let result = term.substitute(x, &var('y'));
		let Term::Abstraction { binder, body, .. } = result.as_ref() else { panic!("expected abstraction") };
		assert_ne!(*binder, y);
		assert_eq!(binder.symbol, y.symbol);
		assert_eq!(*body, var('y'));
	}

	#[test]
	fn test_no_renaming_without_capture() {
		let x = Name::synthetic('x');
		let y = Name::synthetic('y');
		let term = Term::abstraction(y, Term::universe(0), var('y'));
		assert_eq!(term.substitute(x, &var('y')), term);
	}

	#[test]
	fn test_fresh_skips_every_generation() {
		let y = Name::synthetic('y');
		let term = Term::call(var('y'), Term::identifier(y.with_generation(3)));
		assert_eq!(fresh(y, &[term.as_ref()]), y.with_generation(4));
		assert_eq!(fresh(Name::synthetic('z'), &[term.as_ref()]), Name::synthetic('z'));
	}

	#[test]
	fn test_occurs_free_respects_binders() {
		let x = Name::synthetic('x');
		assert!(!occurs_free(&Term::abstraction(x, Term::universe(0), var('x')), x));
		assert!(occurs_free(&Term::sigma(Some(x), var('x'), Term::universe(0)), x));
		assert!(occurs_free(&Term::sigma(None, Term::universe(0), var('x')), x));
	}

	#[test]
	fn test_free_names() {
		let (x, y) = (Name::synthetic('x'), Name::synthetic('y'));
		let term = Term::call(
			Term::abstraction(x, var('A'), Term::call(var('x'), var('y'))),
			Term::pi(Some(y), var('y'), var('y')),
		);
		assert_eq!(free_names(&term), [Name::synthetic('A'), y]);
		assert!(free_names(&Term::sigma(Some(x), Term::universe(0), var('x'))).is_empty());
	}

	fn rc_one() -> Rc<Term> { Rc::new(Term::One) }
}
