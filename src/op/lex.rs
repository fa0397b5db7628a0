use std::str::Chars;

use crate::ir::tokenized::{Keyword, LexError, LexErrorKind, Token, TokenizedSource};

struct Scanner<'s> {
	len: usize,
	chars: Chars<'s>,
}

impl<'s> Scanner<'s> {
	pub fn new(source: &'s str) -> Self { Self { len: source.len(), chars: source.chars() } }

	pub fn position(&self) -> usize { self.len - self.chars.as_str().len() }

	pub fn previous_position(&self) -> usize { self.position() - 1 }

	pub fn next(&mut self) -> Option<(char, usize)> {
		let position = self.position();
		Some((self.chars.next()?, position))
	}

	pub fn pop(&mut self) -> Option<char> { self.chars.next() }

	pub fn peek(&mut self) -> Option<char> { self.chars.clone().next() }
}

fn keyword_or_identifier(string: &str) -> Token {
	use Token::*;
	match string {
		"refl" => Keyword(self::Keyword::Refl),
		_ if is_word_with_suffix(string, "U", |c| c.is_ascii_digit()) => Universe,
		_ if is_word_with_suffix(string, "pr", |c| matches!(c, '1' | '2')) => Project,
		_ => Identifier,
	}
}

// Whether `string` is `prefix` followed by at least one character satisfying `suffix`.
fn is_word_with_suffix(string: &str, prefix: &str, suffix: impl Fn(char) -> bool) -> bool {
	string.strip_prefix(prefix).is_some_and(|rest| !rest.is_empty() && rest.chars().all(suffix))
}

/// Splits a source string into tokens, recording the byte range of each.
pub fn lex(source: &str) -> Result<TokenizedSource, LexError> {
	use LexErrorKind::*;
	use Token::*;
	let mut scanner = Scanner::new(source);
	let mut tokens = Vec::new();
	let mut ranges = Vec::new();
	while let Some((initial, start)) = scanner.next() {
		let token = match initial {
			' ' | '\n' | '\t' | '\r' => {
				while let Some(' ' | '\n' | '\t' | '\r') = scanner.peek() {
					scanner.pop();
				}
				Whitespace
			}
			'%' => {
				while let Some(c) = scanner.peek() {
					scanner.pop();
					if c == '\n' {
						break;
					}
				}
				Whitespace
			}
			'a'..='z' | 'A'..='Z' => {
				while let Some('a'..='z' | 'A'..='Z' | '0'..='9' | '_') = scanner.peek() {
					scanner.pop();
				}
				keyword_or_identifier(&source[start..scanner.position()])
			}
			'0'..='9' => {
				while let Some('0'..='9') = scanner.peek() {
					scanner.pop();
				}
				Number
			}
			'*' => Ast,
			'\\' => Backslash,
			':' =>
				if let Some('=') = scanner.peek() {
					scanner.pop();
					ColonEqual
				} else {
					Colon
				},
			'.' => Period,
			',' => Comma,
			'=' => Equal,
			'|' => Pipe,
			'(' => ParenL,
			')' => ParenR,
			'[' => SquareL,
			']' => SquareR,
			'-' => {
				const EXPECTED: [char; 1] = ['>'];
				match scanner.pop() {
					Some('>') => Arrow,
					Some(_) => return Err(LexError(scanner.previous_position(), UnexpectedCharacter(&EXPECTED))),
					None => return Err(LexError(scanner.position(), UnexpectedEnd(&EXPECTED))),
				}
			}
			_ => return Err(LexError(start, UnrecognizedLexemePrefix)),
		};
		tokens.push(token);
		ranges.push((start, scanner.position()));
	}

	debug_assert!(tokens.len() == ranges.len());
	Ok(TokenizedSource { source, tokens: tokens.into_boxed_slice(), ranges: ranges.into_boxed_slice() })
}
