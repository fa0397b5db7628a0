use std::{io, process::ExitCode};

use bpaf::{construct, long, short, Parser};
use lasso::Rodeo;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use univalent::{
	ir::term::Term,
	op::{lex::lex, parse::parse_with, unparse::pretty_print},
	report::{report_parse_error, report_tokenization_error, report_type_error},
	session::{Outcome, Session, Summary},
};

/// Checks every statement in `source`, printing a line for each.
pub fn run(source: &str, session: &mut Session, interner: &mut Rodeo, fail_fast: bool) -> Summary {
	const REJECTED: Summary = Summary { accepted: 0, rejected: 1 };

	let tokenized_source = match lex(source) {
		Ok(x) => x,
		Err(e) => {
			report_tokenization_error(source, e);
			return REJECTED;
		}
	};

	let program = match parse_with(&tokenized_source, interner) {
		Ok(x) => x,
		Err(e) => {
			report_parse_error(&tokenized_source, e);
			return REJECTED;
		}
	};

	let interner = &*interner;
	session.run_program(&program, fail_fast, |statement, result| match result {
		Ok(Outcome::Checked) => println!("ok"),
		Ok(Outcome::Defined { name, ty }) =>
			println!("{} : {}", pretty_print(&Term::Identifier(*name), interner), pretty_print(ty, interner)),
		Err(error) => report_type_error(&tokenized_source, interner, statement.range, error),
	})
}

// Each line is checked as it arrives, against everything defined on earlier lines.
fn run_interactive(session: &mut Session, interner: &mut Rodeo, fail_fast: bool) -> Summary {
	let mut summary = Summary::default();
	for line in io::stdin().lines() {
		let line = match line {
			Ok(line) => line,
			Err(error) => {
				warn!(%error, "stopped reading standard input");
				break;
			}
		};
		let line_summary = run(&line, session, interner, fail_fast);
		summary += line_summary;
		if fail_fast && !line_summary.is_success() {
			break;
		}
	}
	summary
}

enum InputOption {
	Direct(String),
	FilePath(String),
}

struct Options {
	input: Option<InputOption>,
	fail_fast: bool,
	verbose: bool,
}

fn main() -> ExitCode {
	let direct =
		short('c').argument::<String>("\"statements\"").help("Read input from argument").map(InputOption::Direct);
	let file = short('f').argument::<String>("PATH").help("Read input from file").map(InputOption::FilePath);
	let input = construct!([direct, file]).optional();
	let fail_fast = long("fail-fast").help("Stop at the first rejected statement").switch();
	let verbose = short('v').long("verbose").help("Log every statement and checker fallback").switch();
	let options: Options = construct!(Options { input, fail_fast, verbose }).to_options().run();

	let default_level = if options.verbose { "debug" } else { "warn" };
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
		.with_writer(io::stderr)
		.with_target(false)
		.init();

	let mut session = Session::new();
	let mut interner = Rodeo::new();
	let summary = match options.input {
		Some(InputOption::Direct(source)) => run(&source, &mut session, &mut interner, options.fail_fast),
		Some(InputOption::FilePath(file_path)) => match std::fs::read_to_string(&file_path) {
			Ok(source) => run(&source, &mut session, &mut interner, options.fail_fast),
			Err(error) => {
				eprintln!("error: could not read {file_path}: {error}");
				return ExitCode::FAILURE;
			}
		},
		None => run_interactive(&mut session, &mut interner, options.fail_fast),
	};

	if summary.is_success() {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	}
}
