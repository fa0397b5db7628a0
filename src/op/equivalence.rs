use std::rc::Rc;

use crate::{
	common::Name,
	ir::term::Term,
	op::{
		normalize::{Normalize as _, Unfold},
		substitute::{fresh, occurs_free},
	},
};

/// Builds the type of equivalences between `a` and `b`: a function `f: a -> b` together with a right inverse `g`
/// and a left inverse `h`, each witnessed by a homotopy.
pub fn equivalence(a: &Rc<Term>, b: &Rc<Term>) -> Rc<Term> {
	let avoid = [a.as_ref(), b.as_ref()];
	let [f, g, h] = ['f', 'g', 'h'].map(|c| fresh(Name::synthetic(c), &avoid));
	let [f_var, g_var, h_var] = [f, g, h].map(Term::identifier);

	let section = Term::sigma(Some(g), Term::function(b.clone(), a.clone()), homotopy(b, &f_var, &g_var));
	let retraction = Term::sigma(Some(h), Term::function(b.clone(), a.clone()), homotopy(a, &h_var, &f_var));
	Term::sigma(Some(f), Term::function(a.clone(), b.clone()), Term::sigma(None, section, retraction))
}

/// The type of witnesses that `p` after `q` is pointwise equal to the identity on `ty`.
pub fn homotopy(ty: &Rc<Term>, p: &Rc<Term>, q: &Rc<Term>) -> Rc<Term> {
	let x = fresh(Name::synthetic('x'), &[ty.as_ref(), p.as_ref(), q.as_ref()]);
	let x_var = Term::identifier(x);
	let composite = Term::call(p.clone(), Term::call(q.clone(), x_var.clone()));
	Term::pi(Some(x), ty.clone(), Term::path(composite, ty.clone(), x_var))
}

/// Reads off the two types a term of type `ty` would be an equivalence between, if `ty` has the outward shape of an
/// equivalence type. The caller still has to compare `ty` against the full equivalence type.
pub fn equivalence_endpoints(ty: &Rc<Term>, definitions: &impl Unfold) -> Option<(Rc<Term>, Rc<Term>)> {
	let Term::Sigma { first, .. } = ty.whnf(definitions).as_ref().clone() else { return None };
	let Term::Pi { binder, domain, codomain } = first.whnf(definitions).as_ref().clone() else { return None };
	match binder {
		Some(binder) if occurs_free(&codomain, binder) => None,
		_ => Some((domain, codomain)),
	}
}
