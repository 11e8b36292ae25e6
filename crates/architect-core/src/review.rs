use serde::{Deserialize, Serialize};
use std::fmt;

use crate::prompt::PromptPair;

pub const DEFAULT_MAX_DIFF_CHARS: usize = 12_000;

const TRUNCATION_MARKER: &str = "\n... [diff truncated]\n";

/// What a review is attached to on GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewTarget {
    PullRequest(u64),
    Commit(String),
}

impl fmt::Display for ReviewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewTarget::PullRequest(n) => write!(f, "PR #{n}"),
            ReviewTarget::Commit(sha) => {
                let short: String = sha.chars().take(7).collect();
                write!(f, "commit {short}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    Approve,
    Comment,
    RequestChanges,
}

impl ReviewVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewVerdict::Approve => "approve",
            ReviewVerdict::Comment => "comment",
            ReviewVerdict::RequestChanges => "request_changes",
        }
    }
}

/// Cut `diff` to at most `max_chars`, ending on a whole line, and append a
/// marker when anything was dropped.
pub fn truncate_diff(diff: &str, max_chars: usize) -> String {
    if diff.chars().count() <= max_chars {
        return diff.to_string();
    }
    let cut = diff
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(diff.len());
    let head = &diff[..cut];
    let head = match head.rfind('\n') {
        Some(nl) => &head[..=nl],
        None => head,
    };
    format!("{}{}", head.trim_end_matches('\n'), TRUNCATION_MARKER)
}

const RUBRIC: &str = "You review changes to a Next.js + Supabase SaaS built with the Lovable \
builder. Review the diff for: 1) correctness and regressions, 2) security (auth checks, \
row-level security, leaked secrets), 3) project conventions (shadcn components, Supabase \
client usage), 4) missing tests. Be concise: a short bullet list of findings with file \
names, most severe first. Say so plainly when nothing needs fixing. End with one line \
`VERDICT: approve`, `VERDICT: comment` or `VERDICT: request_changes`.";

pub fn review_messages(target: &ReviewTarget, title: &str, diff: &str, max_chars: usize) -> PromptPair {
    let heading = match title.lines().next().map(str::trim) {
        Some(t) if !t.is_empty() => format!("Review {target}: {t}"),
        _ => format!("Review {target}"),
    };
    PromptPair {
        system: RUBRIC.to_string(),
        user: format!("{heading}\n\n```diff\n{}\n```", truncate_diff(diff, max_chars)),
    }
}

/// Read the `VERDICT:` line of a review, if the model wrote one.
pub fn parse_verdict(review: &str) -> Option<ReviewVerdict> {
    review.lines().rev().find_map(|line| {
        let rest = line.trim().trim_matches('`').strip_prefix("VERDICT:")?;
        match rest.trim().trim_matches('`').to_lowercase().as_str() {
            "approve" => Some(ReviewVerdict::Approve),
            "comment" => Some(ReviewVerdict::Comment),
            "request_changes" => Some(ReviewVerdict::RequestChanges),
            _ => None,
        }
    })
}

/// Markdown body posted back to GitHub.
pub fn format_comment(target: &ReviewTarget, review: &str) -> String {
    format!("### Architect review of {target}\n\n{}\n", review.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_diff_is_untouched() {
        let diff = "+a\n-b\n";
        assert_eq!(truncate_diff(diff, 100), diff);
    }

    #[test]
    fn long_diff_cut_on_line_boundary() {
        let diff = "+aaaa\n+bbbb\n+cccc\n";
        let out = truncate_diff(diff, 9);
        assert_eq!(out, format!("+aaaa{TRUNCATION_MARKER}"));
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        let diff = "ção".repeat(10);
        let out = truncate_diff(&diff, 5);
        assert!(out.starts_with("çãoçã"));
        assert!(out.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn messages_embed_target_and_first_title_line() {
        let pair = review_messages(
            &ReviewTarget::PullRequest(42),
            "Add cart\n\nlong body",
            "+x\n",
            DEFAULT_MAX_DIFF_CHARS,
        );
        assert!(pair.system.contains("VERDICT"));
        assert!(pair.user.starts_with("Review PR #42: Add cart\n"));
        assert!(pair.user.contains("```diff\n+x\n"));
    }

    #[test]
    fn blank_title_is_omitted() {
        let pair = review_messages(&ReviewTarget::PullRequest(7), "", "+x\n", 100);
        assert!(pair.user.starts_with("Review PR #7\n\n"));
    }

    #[test]
    fn commit_target_is_abbreviated() {
        let t = ReviewTarget::Commit("abcdef0123456".into());
        assert_eq!(t.to_string(), "commit abcdef0");
    }

    #[test]
    fn verdict_parsed_from_last_line() {
        let review = "- missing RLS on orders\n\nVERDICT: request_changes";
        assert_eq!(parse_verdict(review), Some(ReviewVerdict::RequestChanges));
        assert_eq!(parse_verdict("`VERDICT: approve`"), Some(ReviewVerdict::Approve));
        assert_eq!(parse_verdict("looks fine"), None);
    }

    #[test]
    fn comment_has_heading() {
        let body = format_comment(&ReviewTarget::PullRequest(3), "  ok  ");
        assert_eq!(body, "### Architect review of PR #3\n\nok\n");
    }
}
