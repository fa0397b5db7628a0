use lasso::Resolver;
use peg::error::ParseError;

use crate::{
	ir::{
		term::Term,
		tokenized::{LexError, LexErrorKind, TokenizedSource},
	},
	op::{check::TypeError, unparse::pretty_print},
};

pub fn report_tokenization_error(source: &str, lex_error: LexError) {
	report_line_error(source, (lex_error.0, lex_error.0 + 1), &format_lex_error(source, lex_error))
}

pub fn report_parse_error(source: &TokenizedSource, error: ParseError<usize>) {
	report_line_error(
		source.source,
		source.ranges.get(error.location).copied().unwrap_or((source.source.len(), source.source.len() + 1)),
		&format!("parse error: expected one of: {:?}", error.expected.tokens().collect::<Vec<_>>()),
	);
}

/// Reports a rejected statement spanning the tokens in `range`.
pub fn report_type_error(
	source: &TokenizedSource,
	interner: &impl Resolver,
	range: (usize, usize),
	error: &TypeError,
) {
	let end = source.source.len();
	let start = source.ranges.get(range.0).map_or(end, |token| token.0);
	let stop = range.1.checked_sub(1).and_then(|last| source.ranges.get(last)).map_or(end, |token| token.1);
	report_line_error(source.source, (start, stop.max(start + 1)), &display_error(error, interner));
}

fn report_line_error(source: &str, range: (usize, usize), error_string: &str) {
	print!("{}", format_line_error(source, range, error_string))
}

fn format_line_error(source: &str, range: (usize, usize), error_string: &str) -> String {
	const TAB_WIDTH: usize = 3;
	const TAB_REPLACEMENT: &str = "   ";
	debug_assert_eq!(TAB_REPLACEMENT.len(), TAB_WIDTH);

	let mut lines = source.split_inclusive('\n');
	let mut line_number: usize = 0;
	let mut bytes_left = range.0;
	let (line, bytes_left, width) = loop {
		if let Some(line) = lines.next() {
			line_number += 1;
			if line.len() <= bytes_left {
				bytes_left -= line.len();
			} else {
				break (line, bytes_left, range.1 - range.0);
			}
		} else {
			// Past the end of the source, so point just after the last line.
			let last = source.split('\n').last().unwrap_or_default();
			line_number = source.split('\n').count();
			break (last, last.len(), 1);
		}
	};

	let visual_line = line.replace('\t', TAB_REPLACEMENT).trim_end().to_owned();
	let visual_offset: usize =
		unicode_width::UnicodeWidthStr::width(line[0..bytes_left].replace('\t', TAB_REPLACEMENT).as_str());
	// A statement may continue onto later lines; only this one is underlined.
	let width = width.min(line.trim_end().len().saturating_sub(bytes_left)).max(1);

	let displayed_line_number = line_number.to_string();
	let dummy_line_number = " ".repeat(displayed_line_number.len());
	// Columns count bytes from one, like lines.
	format!(
		"[{}:{}] error: {error_string}\n{} |\n{} | {}\n{} | {}{}\n",
		line_number,
		bytes_left + 1,
		dummy_line_number,
		displayed_line_number,
		visual_line,
		dummy_line_number,
		" ".repeat(visual_offset),
		"^".repeat(width)
	)
}

fn format_lex_error(source: &str, LexError(location, kind): LexError) -> String {
	fn char_list_string(chars: &[char]) -> String {
		chars.iter().map(|c| format!("`{c}`")).collect::<Vec<_>>().join(", ")
	}

	let found = source[location..].chars().next().map(|c| c.escape_default().to_string()).unwrap_or_default();
	match kind {
		LexErrorKind::UnrecognizedLexemePrefix => format!("lex error: unrecognized lexeme prefix `{found}`"),
		LexErrorKind::UnexpectedCharacter(expected) =>
			format!("lex error: expected one of {}; found `{found}`", char_list_string(expected)),
		LexErrorKind::UnexpectedEnd(expected) =>
			format!("lex error: expected one of {}; found end of input", char_list_string(expected)),
	}
}

/// Describes a type error, printing the terms it carries.
pub fn display_error(error: &TypeError, interner: &impl Resolver) -> String {
	match error {
		TypeError::MalformedType(_) | TypeError::LevelOverflow(_) => format!("type error: {error}"),
		TypeError::NotInScope(name) =>
			format!("type error: `{}` is not in scope", pretty_print(&Term::Identifier(*name), interner)),
		TypeError::NotAType(term) => format!("type error: `{}` {error}", pretty_print(term, interner)),
		TypeError::Mismatch { expected, found } => format!(
			"type error: {error}\nexpected: {}\nfound: {}",
			pretty_print(expected, interner),
			pretty_print(found, interner)
		),
		TypeError::NotCallable(ty) | TypeError::NotProjectable(ty) | TypeError::NotUnivalent(ty) =>
			format!("type error: {error}, but found a term of type `{}`", pretty_print(ty, interner)),
	}
}
