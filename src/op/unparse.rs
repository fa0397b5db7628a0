use std::fmt::{self, Write};

use lasso::Resolver;

use crate::{
	common::{Label, Name, Symbol},
	ir::term::Term,
};

/// Renders a term in surface notation, which parses back to the same term for names written in source.
pub fn pretty_print(term: &Term, interner: &impl Resolver) -> String { Printed { term, interner }.to_string() }

struct Printed<'a, R> {
	term: &'a Term,
	interner: &'a R,
}

impl<'a, R: Resolver> fmt::Display for Printed<'a, R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { print(self.term, f, self.interner) }
}

pub fn print(term: &Term, f: &mut impl Write, interner: &impl Resolver) -> fmt::Result {
	match term {
		Term::Abstraction { binder, domain, body } => {
			write!(f, "\\")?;
			print_name(*binder, f, interner)?;
			write!(f, ": ")?;
			print(domain, f, interner)?;
			write!(f, ". ")?;
			print(body, f, interner)
		}
		Term::Pi { binder: None, domain, codomain } => {
			print_path(domain, f, interner)?;
			write!(f, " -> ")?;
			print(codomain, f, interner)
		}
		_ => print_path(term, f, interner),
	}
}

fn print_path(term: &Term, f: &mut impl Write, interner: &impl Resolver) -> fmt::Result {
	let Term::Path { left, ty, right } = term else { return print_spine(term, f, interner) };
	print_spine(left, f, interner)?;
	write!(f, " =[")?;
	print(ty, f, interner)?;
	write!(f, "] ")?;
	print_spine(right, f, interner)
}

fn print_spine(term: &Term, f: &mut impl Write, interner: &impl Resolver) -> fmt::Result {
	match term {
		Term::Call { function, argument } => {
			print_spine(function, f, interner)?;
			write!(f, "(")?;
			print(argument, f, interner)?;
			write!(f, ")")
		}
		Term::Projection { field, argument } => {
			write!(f, "pr{}(", if field.is_base() { 1 } else { 2 })?;
			print(argument, f, interner)?;
			write!(f, ")")
		}
		Term::Refl(argument) => {
			write!(f, "refl(")?;
			print(argument, f, interner)?;
			write!(f, ")")
		}
		_ => print_atom(term, f, interner),
	}
}

fn print_atom(term: &Term, f: &mut impl Write, interner: &impl Resolver) -> fmt::Result {
	match term {
		Term::Zero => write!(f, "0"),
		Term::One => write!(f, "1"),
		Term::Singleton => write!(f, "*"),
		Term::Universe(level) => write!(f, "U{level}"),
		Term::Identifier(name) => print_name(*name, f, interner),
		Term::Univalence(inner) => {
			write!(f, "|")?;
			print(inner, f, interner)?;
			write!(f, "|")
		}
		Term::Pi { binder: Some(binder), domain, codomain } => {
			write!(f, "(")?;
			print_name(*binder, f, interner)?;
			write!(f, ": ")?;
			print_path(domain, f, interner)?;
			write!(f, " -> ")?;
			print(codomain, f, interner)?;
			write!(f, ")")
		}
		Term::Tuple { binder, first, second } => {
			write!(f, "(")?;
			print_binding(*binder, " := ", f, interner)?;
			print(first, f, interner)?;
			write!(f, ", ")?;
			print(second, f, interner)?;
			write!(f, ")")
		}
		Term::Sigma { binder, first, second } => {
			write!(f, "[")?;
			print_binding(*binder, ": ", f, interner)?;
			print(first, f, interner)?;
			write!(f, ", ")?;
			print(second, f, interner)?;
			write!(f, "]")
		}
		Term::Pi { binder: None, .. }
		| Term::Abstraction { .. }
		| Term::Call { .. }
		| Term::Projection { .. }
		| Term::Refl(_)
		| Term::Path { .. } => {
			write!(f, "(")?;
			print(term, f, interner)?;
			write!(f, ")")
		}
	}
}

fn print_binding(binder: Label, separator: &str, f: &mut impl Write, interner: &impl Resolver) -> fmt::Result {
	let Some(binder) = binder else { return Ok(()) };
	print_name(binder, f, interner)?;
	write!(f, "{separator}")
}

// Renamed binders and redefinitions carry their generation, so that distinct variables print distinctly.
fn print_name(name: Name, f: &mut impl Write, interner: &impl Resolver) -> fmt::Result {
	match name.symbol {
		Symbol::Source(spur) | Symbol::Global(spur) => write!(f, "{}", interner.resolve(&spur))?,
		Symbol::Synthetic(c) => write!(f, "{c}")?,
	}
	if name.generation > 0 {
		write!(f, "'{}", name.generation)?;
	}
	Ok(())
}
