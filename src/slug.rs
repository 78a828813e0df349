//! Company code derivation: display name -> lowercase, hyphenated slug.

use regex::Regex;
use std::sync::OnceLock;

fn separator_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[^a-z0-9]+").expect("static slug pattern"))
}

/// Lowercase `name`, collapse every run of non-alphanumeric ASCII into one `-`, trim leading/trailing `-`.
/// e.g. "Apple" -> "apple", "AT&T  Inc." -> "at-t-inc"
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    separator_runs()
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}
