use crate::common::{check_file, programs};

/// Ensures every statement of every demo is accepted.
#[test]
fn run_demos() {
	for path in programs("demos") {
		let path_str = path.as_os_str().to_str().unwrap().to_owned();
		let summary = check_file(path);
		assert!(summary.is_success(), "{path_str}: {summary:?}");
		assert!(summary.accepted > 0, "{path_str}");
	}
}
