use crate::output::print_json;
use anyhow::Context;
use architect_core::review::ReviewTarget;
use architect_server::{reviewer, AppState};
use clap::Subcommand;
use std::path::Path;

use super::Secrets;

#[derive(Subcommand)]
pub enum ReviewSubcommand {
    /// Review a pull request by number
    Pr { number: u64 },
    /// Review a single commit
    Commit { sha: String },
}

pub fn run(root: &Path, subcmd: ReviewSubcommand, secrets: Secrets, json: bool) -> anyhow::Result<()> {
    let target = match subcmd {
        ReviewSubcommand::Pr { number } => ReviewTarget::PullRequest(number),
        ReviewSubcommand::Commit { sha } => ReviewTarget::Commit(sha),
    };
    let state = AppState::new(root.to_path_buf(), super::load_config(root)?, secrets.into());
    anyhow::ensure!(
        state.llm.has_key(),
        "OPENAI_API_KEY is not set (or pass --openai-api-key)"
    );

    let outcome = super::runtime()?
        .block_on(reviewer::review(
            &state.github,
            &state.llm,
            &state.config,
            target.clone(),
            "",
        ))
        .with_context(|| format!("review of {target} failed"))?;

    let verdict = outcome.verdict.map(|v| v.as_str()).unwrap_or("none");
    if json {
        return print_json(&serde_json::json!({
            "target": outcome.target.to_string(),
            "verdict": verdict,
            "comment_url": outcome.comment_url,
            "body": outcome.body,
        }));
    }
    println!("{}", outcome.body);
    match &outcome.comment_url {
        Some(url) => println!("Posted ({verdict}): {url}"),
        None => println!("Posted ({verdict})"),
    }
    Ok(())
}
