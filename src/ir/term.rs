use std::rc::Rc;

use crate::{
	common::{Field, Label, Name},
	utility::rc,
};

// The kernel syntax: the output of the parser and the input of every kernel operation.
// Terms are never mutated; operations build new nodes and share untouched subterms.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Term {
	// The empty type, the unit type and its only inhabitant.
	Zero,
	One,
	Singleton,

	Universe(usize),

	Identifier(Name),

	// Dependent functions.
	Pi { binder: Label, domain: Rc<Self>, codomain: Rc<Self> },
	Abstraction { binder: Name, domain: Rc<Self>, body: Rc<Self> },
	Call { function: Rc<Self>, argument: Rc<Self> },

	// Dependent pairs.
	Sigma { binder: Label, first: Rc<Self>, second: Rc<Self> },
	Tuple { binder: Label, first: Rc<Self>, second: Rc<Self> },
	Projection { field: Field, argument: Rc<Self> },

	// Paths.
	Refl(Rc<Self>),
	Path { left: Rc<Self>, ty: Rc<Self>, right: Rc<Self> },
	Univalence(Rc<Self>),
}

impl Term {
	pub fn identifier(name: Name) -> Rc<Self> { rc!(Self::Identifier(name)) }

	pub fn universe(level: usize) -> Rc<Self> { rc!(Self::Universe(level)) }

	pub fn pi(binder: Label, domain: Rc<Self>, codomain: Rc<Self>) -> Rc<Self> {
		rc!(Self::Pi { binder, domain, codomain })
	}

	pub fn function(domain: Rc<Self>, codomain: Rc<Self>) -> Rc<Self> { Self::pi(None, domain, codomain) }

	pub fn abstraction(binder: Name, domain: Rc<Self>, body: Rc<Self>) -> Rc<Self> {
		rc!(Self::Abstraction { binder, domain, body })
	}

	pub fn call(function: Rc<Self>, argument: Rc<Self>) -> Rc<Self> { rc!(Self::Call { function, argument }) }

	pub fn sigma(binder: Label, first: Rc<Self>, second: Rc<Self>) -> Rc<Self> {
		rc!(Self::Sigma { binder, first, second })
	}

	pub fn tuple(binder: Label, first: Rc<Self>, second: Rc<Self>) -> Rc<Self> {
		rc!(Self::Tuple { binder, first, second })
	}

	pub fn projection(field: Field, argument: Rc<Self>) -> Rc<Self> { rc!(Self::Projection { field, argument }) }

	pub fn refl(argument: Rc<Self>) -> Rc<Self> { rc!(Self::Refl(argument)) }

	pub fn path(left: Rc<Self>, ty: Rc<Self>, right: Rc<Self>) -> Rc<Self> { rc!(Self::Path { left, ty, right }) }

	pub fn univalence(inner: Rc<Self>) -> Rc<Self> { rc!(Self::Univalence(inner)) }

	pub fn as_universe(&self) -> Option<usize> {
		let Self::Universe(level) = self else { return None };
		Some(*level)
	}
}
