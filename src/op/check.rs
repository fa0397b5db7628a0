use std::{fmt, rc::Rc};

use thiserror::Error;
use tracing::debug;

use crate::{
	common::{Field, Name},
	ir::{
		context::{Context, Judgement},
		term::Term,
	},
	op::{
		conversion::check_eq,
		equivalence::{equivalence, equivalence_endpoints},
		normalize::Normalize as _,
		substitute::Substitute as _,
	},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Former {
	Pi,
	Sigma,
}

impl fmt::Display for Former {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Pi => write!(f, "pi"),
			Self::Sigma => write!(f, "sigma"),
		}
	}
}

/// A rejected judgement. Each variant carries the terms a diagnostic needs.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum TypeError {
	#[error("malformed {0} type")]
	MalformedType(Former),
	#[error("identifier is not in scope")]
	NotInScope(Name),
	#[error("must be a type")]
	NotAType(Rc<Term>),
	#[error("type mismatch")]
	Mismatch { expected: Rc<Term>, found: Rc<Term> },
	#[error("calls only valid on functions and paths")]
	NotCallable(Rc<Term>),
	#[error("can only project tuples")]
	NotProjectable(Rc<Term>),
	#[error("can only do univalence on paths or equivalences")]
	NotUnivalent(Rc<Term>),
	#[error("universe level is too large")]
	LevelOverflow(usize),
}

/// Synthesizes the type of `term`.
pub fn infer(context: &mut Context, term: &Rc<Term>) -> Result<Rc<Term>, TypeError> {
	Ok(match term.as_ref() {
		Term::Singleton => rc_one(),
		Term::Zero | Term::One => Term::universe(0),
		Term::Universe(level) => Term::universe(level.checked_add(1).ok_or(TypeError::LevelOverflow(*level))?),
		Term::Identifier(name) => context.lookup(*name).ok_or(TypeError::NotInScope(*name))?.ty().clone(),

		Term::Pi { binder, domain, codomain } => {
			let level = infer_former(context, Former::Pi, *binder, domain, codomain)?;
			Term::universe(level)
		}
		Term::Sigma { binder, first, second } => {
			let level = infer_former(context, Former::Sigma, *binder, first, second)?;
			Term::universe(level)
		}

		Term::Abstraction { binder, domain, body } => {
			if infer_universe(context, domain)?.is_none() {
				return Err(TypeError::NotAType(domain.clone()));
			}
			let body_ty = infer(&mut context.extend(*binder, Judgement::Type(domain.clone())), body)?;
			Term::pi(Some(*binder), domain.clone(), body_ty)
		}

		Term::Call { function, argument } => {
			let function_ty = infer(context, function)?.whnf(&*context);
			match function_ty.as_ref() {
				Term::Pi { binder, domain, codomain } => {
					let argument_ty = infer(context, argument)?;
					if !check_eq(domain, &argument_ty, &*context) {
						return Err(TypeError::Mismatch { expected: domain.clone(), found: argument_ty });
					}
					match binder {
						Some(binder) => codomain.substitute(*binder, argument),
						None => codomain.clone(),
					}
				}
				// Transport: a path from l to r sends a family P to a function P(l) -> P(r).
				Term::Path { left, ty, right } => {
					let argument_ty = infer(context, argument)?.whnf(&*context);
					let Term::Pi { domain, .. } = argument_ty.as_ref() else {
						return Err(TypeError::NotCallable(function_ty.clone()));
					};
					if !check_eq(ty, domain, &*context) {
						return Err(TypeError::Mismatch { expected: ty.clone(), found: domain.clone() });
					}
					Term::function(
						Term::call(argument.clone(), left.clone()),
						Term::call(argument.clone(), right.clone()),
					)
				}
				_ => return Err(TypeError::NotCallable(function_ty.clone())),
			}
		}

		Term::Tuple { binder, first, second } => {
			let first_ty = infer(context, first)?;
			let second_ty = infer(&mut context.assume(*binder, first_ty.clone()), second)?;
			Term::sigma(*binder, first_ty, second_ty)
		}
		Term::Projection { field, argument } => {
			let argument_ty = infer(context, argument)?.whnf(&*context);
			let Term::Sigma { binder, first, second } = argument_ty.as_ref() else {
				return Err(TypeError::NotProjectable(argument_ty.clone()));
			};
			match (field, binder) {
				(Field::Base, _) => first.clone(),
				(Field::Fiber, None) => second.clone(),
				(Field::Fiber, Some(binder)) => {
					let base = Term::projection(Field::Base, argument.clone()).whnf(&*context);
					second.substitute(*binder, &base)
				}
			}
		}

		Term::Refl(argument) => Term::path(argument.clone(), infer(context, argument)?, argument.clone()),
		Term::Path { ty, .. } => infer(context, ty)?,
		Term::Univalence(inner) => infer_univalence(context, inner)?,
	})
}

/// Checks that `term` has type `ty`, up to judgemental equality and universe cumulativity.
pub fn check(context: &mut Context, term: &Rc<Term>, ty: &Rc<Term>) -> Result<(), TypeError> {
	let inferred = infer(context, term)?;
	if check_eq(&inferred, ty, &*context) {
		return Ok(());
	}

	let found = inferred.whnf(&*context).as_universe();
	let expected = ty.whnf(&*context).as_universe();
	match found.zip(expected) {
		Some((found, expected)) if found <= expected => {
			debug!(found, expected, "accepted by universe cumulativity");
			Ok(())
		}
		_ => Err(TypeError::Mismatch { expected: ty.clone(), found: inferred }),
	}
}

// The level of the universe a type former lands in, after checking both of its components are types.
fn infer_former(
	context: &mut Context,
	former: Former,
	binder: Option<Name>,
	base: &Rc<Term>,
	family: &Rc<Term>,
) -> Result<usize, TypeError> {
	let base_level = infer_universe(context, base)?.ok_or(TypeError::MalformedType(former))?;
	let family_level =
		infer_universe(&mut context.assume(binder, base.clone()), family)?.ok_or(TypeError::MalformedType(former))?;
	Ok(base_level.max(family_level))
}

// The level of the universe `term` lives in, if it is a type at all.
fn infer_universe(context: &mut Context, term: &Rc<Term>) -> Result<Option<usize>, TypeError> {
	Ok(infer(context, term)?.whnf(&*context).as_universe())
}

fn infer_univalence(context: &mut Context, inner: &Rc<Term>) -> Result<Rc<Term>, TypeError> {
	let inner_ty = infer(context, inner)?.whnf(&*context);

	// From a path between types to an equivalence.
	if let Term::Path { left, right, .. } = inner_ty.as_ref() {
		if infer_universe(context, left)?.is_some() && infer_universe(context, right)?.is_some() {
			debug!("univalence on a path between types");
			return Ok(equivalence(left, right));
		}
	}

	// From an equivalence to a path between types.
	if let Some((left, right)) = equivalence_endpoints(&inner_ty, &*context) {
		if check_eq(&inner_ty, &equivalence(&left, &right), &*context) {
			if let (Some(left_level), Some(right_level)) =
				(infer_universe(context, &left)?, infer_universe(context, &right)?)
			{
				debug!("univalence on an equivalence");
				return Ok(Term::path(left, Term::universe(left_level.max(right_level)), right));
			}
		}
	}

	Err(TypeError::NotUnivalent(inner_ty))
}

fn rc_one() -> Rc<Term> { Rc::new(Term::One) }
