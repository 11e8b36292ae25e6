use crate::output::print_json;
use architect_core::prompt::{PromptMode, PromptRequest};
use architect_server::{generator, AppState};
use std::path::Path;

use super::Secrets;

pub struct PromptArgs {
    pub feature: String,
    pub phase: String,
    pub context: Option<String>,
    pub mode: PromptMode,
}

pub fn run(root: &Path, args: PromptArgs, secrets: Secrets, json: bool) -> anyhow::Result<()> {
    let state = AppState::new(root.to_path_buf(), super::load_config(root)?, secrets.into());
    anyhow::ensure!(
        state.llm.has_key(),
        "OPENAI_API_KEY is not set (or pass --openai-api-key)"
    );

    let req = PromptRequest {
        feature: args.feature,
        phase: args.phase,
        context: args.context.filter(|c| !c.trim().is_empty()),
        mode: args.mode,
    };
    let response = super::runtime()?
        .block_on(generator::generate(&state, req))
        .map_err(|e| e.0)?;

    if json {
        return print_json(&response);
    }
    println!("{}", response.prompt);
    if let Some(bp) = response.blueprint.as_ref().filter(|bp| bp.is_fallback()) {
        tracing::warn!(raw = ?bp.raw, "model did not return a usable blueprint");
    }
    eprintln!("\ncost: {}", response.cost);
    Ok(())
}
