use std::rc::Rc;

use lasso::Rodeo;
use univalent::{
	ir::{context::Context, term::Term},
	op::{
		check::{check, infer, TypeError},
		conversion::check_eq,
		equivalence::equivalence,
		lex::lex,
		normalize::Normalize as _,
		parse::parse_term,
	},
};

use crate::common::check_source;

fn term(source: &str, interner: &mut Rodeo) -> Rc<Term> { parse_term(&lex(source).unwrap(), interner).unwrap() }

fn accepts(source: &str) -> bool { check_source(source).0.is_success() }

#[test]
fn identity_on_functions() {
	assert!(accepts(r"\x: 0 -> 0. x : (0 -> 0) -> 0 -> 0."));
	// Arrows group to the right, so this asks for a function of three arguments.
	assert!(!accepts(r"\x: 0 -> 0. x : 0 -> 0 -> 0 -> 0."));
}

#[test]
fn one_introduction() {
	assert!(accepts("*: 1."));
}

#[test]
fn dependent_projections_normalize() {
	let mut interner = Rodeo::new();
	let zero = Rc::new(Term::Zero);
	assert_eq!(term("pr1((x := 0, x))", &mut interner).whnf(&()), zero);
	assert_eq!(term("pr2((x := 0, x))", &mut interner).whnf(&()), zero);
}

#[test]
fn univalence_on_refl() {
	let mut interner = Rodeo::new();
	let zero = Rc::new(Term::Zero);
	let ty = infer(&mut Context::empty(), &term("|refl(0)|", &mut interner));
	assert_eq!(ty, Ok(equivalence(&zero, &zero)));
}

#[test]
fn calling_zero_is_rejected() {
	let call = Term::call(Rc::new(Term::Zero), Rc::new(Term::Singleton));
	assert!(matches!(infer(&mut Context::empty(), &call), Err(TypeError::NotCallable(_))));
}

#[test]
fn cumulativity_goes_up_only() {
	let mut interner = Rodeo::new();
	let mut context = Context::empty();
	for source in ["0", "1", "U0", "0 -> 1", "[x: U0, x]", "0 =[U0] 1", "(A: U1 -> A)"] {
		let t = term(source, &mut interner);
		for level in 0..4 {
			if check(&mut context, &t, &Term::universe(level)).is_ok() {
				assert!(check(&mut context, &t, &Term::universe(level + 1)).is_ok(), "{source} : U{}", level + 1);
			}
		}
	}
	assert!(check(&mut context, &Term::universe(1), &Term::universe(2)).is_ok());
	assert!(check(&mut context, &Term::universe(1), &Term::universe(1)).is_err());
}

#[test]
fn well_typed_terms_are_self_equal() {
	let mut interner = Rodeo::new();
	let mut context = Context::empty();
	for source in [
		r"\A: U0. \x: A. x",
		"(A: U0 -> A -> A)",
		"[x: U0, x]",
		"refl(*) =[* =[1] *] refl(*)",
		r"(\A: U0. A)(1)",
		"(x := 0, x)",
		"refl(0)",
		"|refl(1)|",
	] {
		let t = term(source, &mut interner);
		assert!(infer(&mut context, &t).is_ok(), "{source}");
		assert!(check_eq(&t, &t, &()), "{source}");
	}
}

#[test]
fn binder_names_do_not_matter() {
	let mut interner = Rodeo::new();
	let left = term("(x: U0 -> x)", &mut interner);
	let right = term("(y: U0 -> y)", &mut interner);
	assert!(check_eq(&left, &right, &()));
	let killed = term("(y: U0 -> x)", &mut interner);
	assert!(!check_eq(&left, &killed, &()));
}

#[test]
fn equivalences_round_trip_to_paths() {
	assert!(accepts(
		"E := [f: 0 -> 1, [[g: 1 -> 0, (x: 1 -> f(g(x)) =[1] x)], [h: 1 -> 0, (x: 0 -> h(f(x)) =[0] x)]]].
		\\e: E. |e| : E -> 0 =[U0] 1."
	));
}

#[test]
fn redefinitions_keep_earlier_meanings() {
	assert!(!accepts("a := 0. r := refl(a). a := 1. r : 1 =[U0] 1."));
	assert!(!accepts(r"b := 0. g := \x: b. x. b := 1. g(*) : 1."));
	assert!(accepts(r"b := U0. a := b. \b: 0. refl(a) : (b: 0 -> a =[U1] U0)."));
}

#[test]
fn largest_universe_is_rejected() {
	let (summary, _) = check_source(&format!("U{} : U0.", usize::MAX));
	assert_eq!((summary.accepted, summary.rejected), (0, 1));
}
