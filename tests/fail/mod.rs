use crate::common::{check_file, check_source, programs};

/// Ensures every failing program parses, but has a statement the checker rejects.
#[test]
fn run_fail_tests() {
	for path in programs("tests/fail/programs") {
		let path_str = path.as_os_str().to_str().unwrap().to_owned();
		let summary = check_file(path);
		assert!(!summary.is_success(), "{path_str}");
	}
}

#[test]
fn failed_definitions_are_not_committed() {
	let (summary, session) = check_source("a := 0(*). a : U0. b := 0. b : U0.");
	assert_eq!((summary.accepted, summary.rejected), (2, 2));
	assert_eq!(session.context().len(), 1);
}
