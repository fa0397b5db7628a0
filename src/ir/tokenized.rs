#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Token {
	Whitespace,
	Keyword(Keyword),
	Identifier,
	Number,
	// `U` followed by a level.
	Universe,
	// `pr` followed by a nonempty sequence of fields, applied left to right.
	Project,
	Ast,
	Backslash,
	Arrow,
	Colon,
	ColonEqual,
	Period,
	Comma,
	Equal,
	Pipe,
	ParenL,
	ParenR,
	SquareL,
	SquareR,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Keyword {
	Refl,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct LexError(pub usize, pub LexErrorKind);

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LexErrorKind {
	UnrecognizedLexemePrefix,
	UnexpectedCharacter(&'static [char]),
	UnexpectedEnd(&'static [char]),
}

pub struct TokenizedSource<'a> {
	pub source: &'a str,
	pub tokens: Box<[Token]>,
	pub ranges: Box<[(usize, usize)]>,
}
