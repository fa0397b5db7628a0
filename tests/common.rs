use std::{
	ffi::OsStr,
	fs,
	path::{Path, PathBuf},
};

use lasso::Rodeo;
use univalent::{
	op::{lex::lex, parse::parse_with},
	report::report_type_error,
	session::{Session, Summary},
};

pub const EXTENSION: &str = "hott";

/// Checks every statement of `source` in a fresh session, reporting rejections.
pub fn check_source(source: &str) -> (Summary, Session) {
	let mut interner = Rodeo::new();
	let tokenized_source = lex(source).expect(source);
	let program = parse_with(&tokenized_source, &mut interner).expect(source);
	let mut session = Session::new();
	let summary = session.run_program(&program, false, |statement, result| {
		if let Err(error) = result {
			report_type_error(&tokenized_source, &interner, statement.range, error);
		}
	});
	(summary, session)
}

pub fn check_file(path: PathBuf) -> Summary {
	let path_str = path.as_os_str().to_str().unwrap().to_owned();
	let source = fs::read_to_string(path).expect(&path_str);
	println!("{path_str}");
	check_source(&source).0
}

pub fn programs(directory: impl AsRef<Path>) -> Vec<PathBuf> {
	let paths: Vec<_> = fs::read_dir(directory)
		.unwrap()
		.flatten()
		.map(|x| x.path())
		.filter(|x| x.extension() == Some(OsStr::new(EXTENSION)))
		.collect();
	assert!(!paths.is_empty());
	paths
}
