use std::{
	ops::{Deref, DerefMut},
	rc::Rc,
};

use crate::{
	common::{Label, Name},
	ir::term::Term,
};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Judgement {
	// An assumption: something of this type, with no known value.
	Type(Rc<Term>),
	// A definition, which may be unfolded.
	Definition { value: Rc<Term>, ty: Rc<Term> },
}

impl Judgement {
	pub fn ty(&self) -> &Rc<Term> {
		match self {
			Self::Type(ty) | Self::Definition { ty, .. } => ty,
		}
	}

	pub fn value(&self) -> Option<&Rc<Term>> {
		let Self::Definition { value, .. } = self else { return None };
		Some(value)
	}
}

/// A mapping from names to judgements. Later entries shadow earlier ones.
#[derive(Clone, Default, Debug)]
pub struct Context {
	entries: Vec<(Name, Judgement)>,
}

impl Context {
	pub fn empty() -> Self { Self::default() }

	pub fn len(&self) -> usize { self.entries.len() }

	pub fn is_empty(&self) -> bool { self.entries.is_empty() }

	pub fn lookup(&self, name: Name) -> Option<&Judgement> {
		self.entries.iter().rev().find_map(|(entry, judgement)| (*entry == name).then_some(judgement))
	}

	/// Permanently records a definition. Only the driver does this, and only after the definition has been
	/// checked.
	///
	/// `name` must not be one a binder can shadow, or unfolding the definition under that binder would capture
	/// it. The driver uses [`Symbol::Global`](crate::common::Symbol::Global) names.
	pub fn define(&mut self, name: Name, value: Rc<Term>, ty: Rc<Term>) {
		self.entries.push((name, Judgement::Definition { value, ty }));
	}

	/// Extends the context for the lifetime of the returned guard.
	pub fn extend(&mut self, name: Name, judgement: Judgement) -> ExtendedContext<'_> {
		ExtendedContext::new(self, Some((name, judgement)))
	}

	/// Binds `label` to an assumption of type `ty` for the lifetime of the returned guard, or does nothing for
	/// an absent label.
	pub fn assume(&mut self, label: Label, ty: Rc<Term>) -> ExtendedContext<'_> {
		ExtendedContext::new(self, label.map(|name| (name, Judgement::Type(ty))))
	}
}

pub struct ExtendedContext<'c> {
	context: &'c mut Context,
	is_extended: bool,
}

impl<'c> ExtendedContext<'c> {
	fn new(context: &'c mut Context, entry: Option<(Name, Judgement)>) -> Self {
		let is_extended = entry.is_some();
		context.entries.extend(entry);
		Self { context, is_extended }
	}
}

impl<'c> Deref for ExtendedContext<'c> {
	type Target = Context;

	fn deref(&self) -> &Self::Target { self.context }
}

impl<'c> DerefMut for ExtendedContext<'c> {
	fn deref_mut(&mut self) -> &mut Self::Target { self.context }
}

impl<'c> Drop for ExtendedContext<'c> {
	fn drop(&mut self) {
		if self.is_extended {
			self.context.entries.pop();
		}
	}
}
