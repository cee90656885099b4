//! Manifest-revision comparison.

use std::cmp::Ordering;

/// Compare a manifest-declared version against the recorded installed one.
///
/// Both strings are dot-separated numeric components, optionally prefixed
/// with a marker such as `v`. Components are compared pairwise as numbers
/// built from their ASCII digits; the first strict inequality decides.
/// Comparison stops at the shorter string, so `1.0` and `1.0.0` compare
/// equal. An empty installed version always reads as out of date, forcing
/// the initial install.
///
/// This is lexical-positional comparison, not semver: components are not
/// zero-padded and pre-release markers carry no ordering of their own.
pub fn is_newer(current: &str, installed: &str) -> bool {
    if installed.is_empty() {
        return true;
    }

    let current = strip_marker(current);
    let installed = strip_marker(installed);

    for (c, i) in current.split('.').zip(installed.split('.')) {
        match compare_components(c, i) {
            Ordering::Greater => return true,
            Ordering::Less => return false,
            Ordering::Equal => {}
        }
    }

    false
}

fn strip_marker(version: &str) -> &str {
    version.trim_start_matches(|c: char| !c.is_ascii_digit())
}

/// Compare the digit runs of two components numerically.
///
/// The digits are compared as strings (longer run of significant digits
/// wins, then lexical order) so a recorded commit hash, whose digit run
/// exceeds any machine integer, still orders correctly against a release
/// number. A component with no digits counts as zero.
fn compare_components(a: &str, b: &str) -> Ordering {
    let a = digits_of(a);
    let b = digits_of(b);
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn digits_of(component: &str) -> String {
    component.chars().filter(char::is_ascii_digit).collect()
}
