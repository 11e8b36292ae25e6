//! Builder-prompt generation: inventory context in, LLM answer out, phase log
//! updated.

use architect_core::phase;
use architect_core::prompt::{self, PromptRequest, PromptResponse};
use architect_core::store::DocumentStore;
use architect_core::types::PhaseItemStatus;
use llm_client::Completion;

use crate::error::AppError;
use crate::state::AppState;

pub async fn generate(app: &AppState, req: PromptRequest) -> Result<PromptResponse, AppError> {
    if req.feature.trim().is_empty() {
        return Err(AppError::bad_request("feature must not be empty"));
    }

    let inventory = app.read(|s| Ok(s.load()?.inventory)).await?;
    let pair = prompt::build_messages(&req, &inventory);
    let llm = &app.config.llm;
    let answer = app
        .llm
        .complete(&Completion {
            model: llm.model.clone(),
            system: pair.system,
            user: pair.user,
            max_tokens: llm.max_tokens,
            temperature: llm.temperature,
        })
        .await?;
    let response = prompt::finish(req.mode, &answer);

    let phase_key = req.phase.clone();
    let item_name = prompt::phase_item_name(&req.feature);
    let recorded = app
        .write(move |s| {
            let mut doc = s.load()?;
            if !doc.phases.contains_key(&phase_key) {
                return Ok(false);
            }
            phase::record_item(&mut doc.phases, &phase_key, item_name, PhaseItemStatus::Generated)?;
            s.save(&doc)?;
            Ok(true)
        })
        .await?;

    tracing::info!(
        phase = %req.phase,
        mode = %req.mode,
        recorded,
        "prompt generated"
    );
    Ok(response)
}
