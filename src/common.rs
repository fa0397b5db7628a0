use lasso::Spur;

/// The textual part of a name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Symbol {
	/// A name written in source, interned by the parser.
	Source(Spur),
	/// A name the kernel invents, e.g. the binders of an equivalence structure.
	Synthetic(char),
	/// A committed definition. Binders never carry these, so unfolding a definition cannot be captured.
	Global(Spur),
}

/// A variable name.
///
/// Two names are the same variable exactly when both the symbol and the generation agree. Names written in
/// source always start at generation zero; higher generations are produced when the kernel must rename a
/// binder to avoid capturing a free variable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Name {
	pub symbol: Symbol,
	pub generation: u32,
}

impl Name {
	pub fn new(symbol: Symbol) -> Self { Self { symbol, generation: 0 } }

	pub fn synthetic(c: char) -> Self { Self::new(Symbol::Synthetic(c)) }

	/// The `generation`th definition of `symbol`.
	pub fn global(symbol: Spur, generation: u32) -> Self { Self { symbol: Symbol::Global(symbol), generation } }

	pub fn with_generation(self, generation: u32) -> Self { Self { generation, ..self } }
}

impl From<Spur> for Name {
	fn from(value: Spur) -> Self { Self::new(Symbol::Source(value)) }
}

/// An optional binder: `None` marks a non-dependent former.
pub type Label = Option<Name>;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Field {
	Base,
	Fiber,
}

impl Field {
	pub fn is_base(self) -> bool { self == Self::Base }
}
