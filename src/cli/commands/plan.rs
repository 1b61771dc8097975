//! Plan command: show what a batch would produce.

use crate::cli::BatchArgs;
use crate::cli::io::write_output;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use linkfile_batch::Plan;
use linkfile_config::Config;
use std::fmt::Write;

pub fn run_plan(config: &Config, batch: &BatchArgs, json: bool) -> Result<()> {
    let plan = batch.session(config)?.plan();
    let text = match json {
        true => serde_json::to_string_pretty(&plan).or_raise(|| ErrorKind::Plan)? + "\n",
        false => summarize(&plan),
    };
    write_output(None, text.as_bytes())
}

/// Counts, then the URLs that would be written, then each rejected line with its reason.
pub fn summarize(plan: &Plan) -> String {
    let mut out = format!(
        "{} lines: {} valid, {} invalid, {} duplicates removed\n",
        plan.lines.len(),
        plan.valid.len(),
        plan.invalid.len(),
        plan.removed_count,
    );
    for item in &plan.deduped {
        let _ = writeln!(out, "{}", item.effective_url);
    }
    for item in &plan.invalid {
        let _ = writeln!(out, "invalid: {} ({})", item.raw, item.reason);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkfile_batch::{BatchOptions, build_plan};
    use linkfile_url::{DedupeMode, PrivacyMode};

    #[test]
    fn test_summarize() {
        let options = BatchOptions { dedupe_mode: DedupeMode::Loose, ..Default::default() };
        let plan = build_plan("example.com\nhttp://example.com/\nnot a url\n", &options, PrivacyMode::Full);
        let summary = summarize(&plan);
        let mut lines = summary.lines();
        assert_eq!(lines.next(), Some("3 lines: 2 valid, 1 invalid, 1 duplicates removed"));
        assert_eq!(lines.next(), Some("https://example.com/"));
        assert!(lines.next().is_some_and(|line| line.starts_with("invalid: not a url (")));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_summarize_empty() {
        let plan = build_plan("", &BatchOptions::default(), PrivacyMode::Full);
        assert_eq!(summarize(&plan), "0 lines: 0 valid, 0 invalid, 0 duplicates removed\n");
    }
}
