use std::rc::Rc;

use lasso::{Rodeo, RodeoResolver, Spur};
use peg::error::ParseError;

use crate::{
	common::{Field, Name},
	ir::{
		presyntax::{ParsedProgram, Statement, StatementKind},
		term::Term,
		tokenized::{Keyword, Token, TokenizedSource},
	},
	utility::rc,
};

/// Parses a program from a tokenized source, interning its identifiers in a fresh interner.
pub fn parse(source: &TokenizedSource) -> Result<(ParsedProgram, RodeoResolver), ParseError<usize>> {
	let mut interner = Rodeo::new();
	let program = parse_with(source, &mut interner)?;
	Ok((program, interner.into_resolver()))
}

/// Parses a program, interning its identifiers in an existing interner so that names agree with earlier input.
pub fn parse_with(source: &TokenizedSource, interner: &mut Rodeo) -> Result<ParsedProgram, ParseError<usize>> {
	let mut parser = Parser { source: source.source, interner, ranges: &source.ranges };
	term_parse::program(&source.tokens, &mut parser)
}

/// Parses a single term.
pub fn parse_term(source: &TokenizedSource, interner: &mut Rodeo) -> Result<Rc<Term>, ParseError<usize>> {
	let mut parser = Parser { source: source.source, interner, ranges: &source.ranges };
	term_parse::lone_term(&source.tokens, &mut parser)
}

pub struct Parser<'s, 'i> {
	source: &'s str,
	interner: &'i mut Rodeo,
	ranges: &'s [(usize, usize)],
}

impl<'s, 'i> Parser<'s, 'i> {
	fn span(&self, token_index: usize) -> &'s str {
		let range = self.ranges[token_index];
		&self.source[range.0..range.1]
	}

	fn symbol(&mut self, token_index: usize) -> Spur {
		let span = self.span(token_index);
		self.interner.get_or_intern(span)
	}

	fn identifier(&mut self, token_index: usize) -> Name { self.symbol(token_index).into() }

	fn number(&self, token_index: usize) -> Option<usize> { self.span(token_index).parse::<usize>().ok() }

	fn level(&self, token_index: usize) -> Option<usize> {
		self.span(token_index).strip_prefix('U')?.parse::<usize>().ok()
	}

	// Each digit after `pr` projects the result of the previous one.
	fn project(&self, token_index: usize, argument: Rc<Term>) -> Rc<Term> {
		let digits = self.span(token_index).trim_start_matches("pr");
		digits.chars().fold(argument, |argument, digit| {
			Term::projection(if digit == '1' { Field::Base } else { Field::Fiber }, argument)
		})
	}
}

peg::parser! {
  grammar term_parse(parser: &mut Parser) for [Token] {
		rule _ = [Token::Whitespace]*

		rule symbol() -> Spur
			= pos:position!() [Token::Identifier] {parser.symbol(pos)}

		rule identifier() -> Name
			= pos:position!() [Token::Identifier] {parser.identifier(pos)}

		rule constant() -> Rc<Term>
			= pos:position!() [Token::Number] {?
				match parser.number(pos) {
					Some(0) => Ok(rc!(Term::Zero)),
					Some(1) => Ok(rc!(Term::One)),
					_ => Err("0 or 1"),
				}
			}

		rule universe() -> Rc<Term>
			= pos:position!() [Token::Universe] {? parser.level(pos).map(Term::universe).ok_or("universe level") }

		// Tuples and products nest to the right.
		rule tuple() -> Rc<Term>
			= binder:identifier() _ [Token::ColonEqual] _ first:term() _ [Token::Comma] _ second:tuple() {Term::tuple(Some(binder), first, second)}
			/ first:term() _ [Token::Comma] _ second:tuple() {Term::tuple(None, first, second)}
			/ term()

		rule product() -> Rc<Term>
			= binder:identifier() _ [Token::Colon] _ first:term() _ [Token::Comma] _ second:product() {Term::sigma(Some(binder), first, second)}
			/ first:term() _ [Token::Comma] _ second:product() {Term::sigma(None, first, second)}
			/ term()

		rule atom() -> Rc<Term>
			= constant()
			/ [Token::Ast] {rc!(Term::Singleton)}
			/ universe()
			/ name:identifier() {Term::identifier(name)}
			/ [Token::Pipe] _ inner:term() _ [Token::Pipe] {Term::univalence(inner)}
			/ [Token::ParenL] _ binder:identifier() _ [Token::Colon] _ domain:path() _ [Token::Arrow] _ codomain:term() _ [Token::ParenR]
				{Term::pi(Some(binder), domain, codomain)}
			/ [Token::ParenL] _ tuple:tuple() _ [Token::ParenR] {tuple}
			/ [Token::SquareL] _ product:product() _ [Token::SquareR] {product}

		rule prefix() -> Rc<Term>
			= [Token::Keyword(Keyword::Refl)] _ argument:atom() {Term::refl(argument)}
			/ pos:position!() [Token::Project] _ argument:atom() {parser.project(pos, argument)}
			/ atom()

		// Calls: `f(a, b)` is `f(a)(b)`.
		#[cache]
		rule spine() -> Rc<Term>
			= head:prefix() calls:(_ [Token::ParenL] _ arguments:(term() ++ (_ [Token::Comma] _)) _ [Token::ParenR] {arguments})* {
				calls.into_iter().flatten().fold(head, Term::call)
			}

		#[cache]
		rule path() -> Rc<Term>
			= left:spine() _ [Token::Equal] _ [Token::SquareL] _ ty:term() _ [Token::SquareR] _ right:spine() {Term::path(left, ty, right)}
			/ spine()

		#[cache]
		rule term() -> Rc<Term>
			= [Token::Backslash] _ binder:identifier() _ [Token::Colon] _ domain:term() _ [Token::Period] _ body:term()
				{Term::abstraction(binder, domain, body)}
			/ domain:path() _ [Token::Arrow] _ codomain:term() {Term::function(domain, codomain)}
			/ path()

		rule statement() -> Statement
			= init:position!() kind:(
				  name:symbol() _ [Token::ColonEqual] _ value:term() {StatementKind::Define { name, value }}
				/ term:term() _ [Token::Colon] _ ty:term() {StatementKind::Check { term, ty }}
			) _ [Token::Period] fini:position!() {Statement { range: (init, fini), kind }}

		pub rule program() -> ParsedProgram
			= _ statements:(statement:statement() _ {statement})* {ParsedProgram { statements }}

		pub rule lone_term() -> Rc<Term>
			= _ term:term() _ {term}
  }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::op::lex::lex;

	fn term(source: &str, interner: &mut Rodeo) -> Rc<Term> { parse_term(&lex(source).unwrap(), interner).unwrap() }

	fn name(interner: &mut Rodeo, s: &str) -> Name { interner.get_or_intern(s).into() }

	fn zero() -> Rc<Term> { rc!(Term::Zero) }

	#[test]
	fn test_arrows_associate_to_the_right() {
		let mut interner = Rodeo::new();
		let expected = Term::function(zero(), Term::function(zero(), zero()));
		assert_eq!(term("0 -> 0 -> 0", &mut interner), expected);
		let expected = Term::function(Term::function(zero(), zero()), zero());
		assert_eq!(term("(0 -> 0) -> 0", &mut interner), expected);
	}

	#[test]
	fn test_abstraction_and_dependent_arrow() {
		let mut interner = Rodeo::new();
		let parsed = term(r"\x: (a: U0 -> a). x", &mut interner);
		let (x, a) = (name(&mut interner, "x"), name(&mut interner, "a"));
		let domain = Term::pi(Some(a), Term::universe(0), Term::identifier(a));
		assert_eq!(parsed, Term::abstraction(x, domain, Term::identifier(x)));
	}

	#[test]
	fn test_calls_are_curried() {
		let mut interner = Rodeo::new();
		let parsed = term("f(a, b)(c)", &mut interner);
		let [f, a, b, c] = ["f", "a", "b", "c"].map(|s| Term::identifier(name(&mut interner, s)));
		assert_eq!(parsed, Term::call(Term::call(Term::call(f, a), b), c));
	}

	#[test]
	fn test_projection_words() {
		let mut interner = Rodeo::new();
		let parsed = term("pr12(p)", &mut interner);
		let p = Term::identifier(name(&mut interner, "p"));
		assert_eq!(parsed, Term::projection(Field::Fiber, Term::projection(Field::Base, p)));
	}

	#[test]
	fn test_tuples_and_products_nest_to_the_right() {
		let mut interner = Rodeo::new();
		let parsed = term("(x := 0, x, *)", &mut interner);
		let x = name(&mut interner, "x");
		let expected = Term::tuple(Some(x), zero(), Term::tuple(None, Term::identifier(x), rc!(Term::Singleton)));
		assert_eq!(parsed, expected);

		let parsed = term("[x: U0, x, 1]", &mut interner);
		let expected = Term::sigma(Some(x), Term::universe(0), Term::sigma(None, Term::identifier(x), rc!(Term::One)));
		assert_eq!(parsed, expected);
	}

	#[test]
	fn test_paths_refl_and_univalence() {
		let mut interner = Rodeo::new();
		let parsed = term("|refl(0)| =[U1] |p|", &mut interner);
		let p = Term::identifier(name(&mut interner, "p"));
		let expected = Term::path(Term::univalence(Term::refl(zero())), Term::universe(1), Term::univalence(p));
		assert_eq!(parsed, expected);
	}

	#[test]
	fn test_statements() {
		let source = lex("a := *. % comment\n\\x: 0 -> 0. x : (0 -> 0) -> 0 -> 0.").unwrap();
		let (program, _) = parse(&source).unwrap();
		assert_eq!(program.statements.len(), 2);
		assert!(matches!(program.statements[0].kind, StatementKind::Define { .. }));
		assert!(matches!(program.statements[1].kind, StatementKind::Check { .. }));
		assert_eq!(program.statements[0].range.0, 0);
	}

	#[test]
	fn test_rejects_other_numbers() {
		let source = lex("2 : U0.").unwrap();
		assert!(parse(&source).is_err());
	}

	#[test]
	fn test_missing_period() {
		let source = lex("* : 1").unwrap();
		let error = parse(&source).unwrap_err();
		assert_eq!(error.location, source.tokens.len());
	}
}
