//! LLM review of a pull request or commit, posted back as a GitHub comment.

use std::sync::Arc;

use architect_core::config::Config;
use architect_core::review::{self as rubric, ReviewTarget, ReviewVerdict};
use llm_client::{Completion, LlmClient};

use crate::github::GitHubClient;

#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub target: ReviewTarget,
    pub verdict: Option<ReviewVerdict>,
    pub body: String,
    pub comment_url: Option<String>,
}

/// Fetch the diff, ask the model, post the comment.
///
/// An empty `title` is looked up for pull requests.
pub async fn review(
    github: &GitHubClient,
    llm: &LlmClient,
    config: &Config,
    target: ReviewTarget,
    title: &str,
) -> anyhow::Result<ReviewOutcome> {
    let title = match (&target, title.trim()) {
        (ReviewTarget::PullRequest(n), "") => github.pull_request_title(*n).await?,
        (_, t) => t.to_string(),
    };
    let diff = github.diff(&target).await?;
    if diff.trim().is_empty() {
        anyhow::bail!("{target} has an empty diff");
    }

    let pair = rubric::review_messages(&target, &title, &diff, config.review.max_diff_chars);
    let answer = llm
        .complete(&Completion {
            model: config.llm.model.clone(),
            system: pair.system,
            user: pair.user,
            max_tokens: config.review.max_tokens,
            temperature: config.llm.temperature,
        })
        .await?;

    let body = rubric::format_comment(&target, &answer);
    let comment_url = github.post_comment(&target, &body).await?;
    let verdict = rubric::parse_verdict(&answer);
    tracing::info!(
        subject = %target,
        verdict = verdict.map(ReviewVerdict::as_str).unwrap_or("none"),
        "review posted"
    );
    Ok(ReviewOutcome {
        target,
        verdict,
        body,
        comment_url,
    })
}

/// Run [`review`] in the background. Failures are logged only.
pub fn spawn_review(
    github: GitHubClient,
    llm: LlmClient,
    config: Arc<Config>,
    target: ReviewTarget,
    title: String,
) {
    tokio::spawn(async move {
        if let Err(e) = review(&github, &llm, &config, target.clone(), &title).await {
            tracing::warn!(subject = %target, error = %e, "review failed");
        }
    });
}
