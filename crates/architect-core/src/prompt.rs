//! Builder-prompt generation: message construction and blueprint parsing.
//!
//! The HTTP call lives in `llm-client`; everything here is deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ArchitectError;
use crate::inventory::Inventory;

pub const PROMPT_COST: &str = "1 credit";

/// Characters of the feature kept when it is logged as a phase item, and of
/// the last commit message quoted in the context line.
const SNIPPET_CHARS: usize = 50;

// ---------------------------------------------------------------------------
// PromptMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    /// One-paragraph command, pasted as-is into the builder.
    #[default]
    Command,
    /// Structured JSON plan rendered back into a command.
    Blueprint,
}

impl PromptMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PromptMode::Command => "command",
            PromptMode::Blueprint => "blueprint",
        }
    }
}

impl fmt::Display for PromptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PromptMode {
    type Err = ArchitectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "command" => Ok(PromptMode::Command),
            "blueprint" => Ok(PromptMode::Blueprint),
            _ => Err(ArchitectError::InvalidMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PromptRequest {
    pub feature: String,
    pub phase: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub mode: PromptMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Name under which a generated prompt is logged in its phase.
pub fn phase_item_name(feature: &str) -> String {
    truncate_chars(feature.trim(), SNIPPET_CHARS)
}

/// One-line summary of the repository, empty until an inventory with pages
/// has been synced.
pub fn context_line(inventory: &Inventory) -> String {
    if inventory.pages.is_empty() {
        return String::new();
    }
    let last = inventory
        .last_commit
        .as_ref()
        .map(|c| truncate_chars(&c.message, SNIPPET_CHARS))
        .unwrap_or_default();
    format!(
        "Project has {} pages. Last commit: {}",
        inventory.pages.len(),
        last
    )
}

fn style_contract(phase: &str) -> String {
    format!(
        "You write commands for the Lovable app builder. Rules: \
         1) At most 80 words. \
         2) Format: \"Create [feature]. Components: [shadcn]. Data: [supabase]. DO NOT: [rules].\" \
         3) Focus on phase {phase}. \
         4) No explanations."
    )
}

const BLUEPRINT_CONTRACT: &str = "Answer with a single JSON object and nothing else: \
    {\"route\": string, \"components\": [string], \"data\": [string], \
    \"exclusions\": [string], \"acceptance\": [string]}.";

pub fn build_messages(req: &PromptRequest, inventory: &Inventory) -> PromptPair {
    let mut system = style_contract(&req.phase);
    if req.mode == PromptMode::Blueprint {
        system.push(' ');
        system.push_str(BLUEPRINT_CONTRACT);
    }

    let extra = req
        .context
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("none");
    let user = format!(
        "{}\nFeature: {}\nPhase: {}\nExtra: {}",
        context_line(inventory),
        req.feature.trim(),
        req.phase,
        extra
    );

    PromptPair { system, user }
}

// ---------------------------------------------------------------------------
// Blueprint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub acceptance: Vec<String>,
    /// Raw model output kept when it could not be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Blueprint {
    pub fn fallback(raw: &str) -> Self {
        Self {
            raw: Some(raw.trim().to_string()),
            ..Self::default()
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.raw.is_some()
    }

    /// Render as a builder command in the style-contract format.
    pub fn to_command(&self) -> String {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }
        let mut out = format!("Create {}.", self.route);
        if !self.components.is_empty() {
            out.push_str(&format!(" Components: {}.", self.components.join(", ")));
        }
        if !self.data.is_empty() {
            out.push_str(&format!(" Data: {}.", self.data.join(", ")));
        }
        if !self.exclusions.is_empty() {
            out.push_str(&format!(" DO NOT: {}.", self.exclusions.join("; ")));
        }
        if !self.acceptance.is_empty() {
            out.push_str(&format!(" Done when: {}.", self.acceptance.join("; ")));
        }
        out
    }
}

fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse the model's blueprint answer, tolerating code fences and prose
/// around the object. Anything unparseable becomes a fallback blueprint.
pub fn parse_blueprint(raw: &str) -> Blueprint {
    let parsed = extract_json_object(raw)
        .and_then(|json| serde_json::from_str::<Blueprint>(json).ok())
        .filter(|bp| !bp.route.trim().is_empty());
    match parsed {
        Some(bp) => Blueprint { raw: None, ..bp },
        None => {
            tracing::debug!("blueprint answer was not valid JSON; keeping raw text");
            Blueprint::fallback(raw)
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptResponse {
    pub prompt: String,
    pub cost: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprint: Option<Blueprint>,
}

/// Shape the model's answer for the caller according to `mode`.
pub fn finish(mode: PromptMode, answer: &str) -> PromptResponse {
    match mode {
        PromptMode::Command => PromptResponse {
            prompt: answer.trim().to_string(),
            cost: PROMPT_COST.to_string(),
            blueprint: None,
        },
        PromptMode::Blueprint => {
            let bp = parse_blueprint(answer);
            PromptResponse {
                prompt: bp.to_command(),
                cost: PROMPT_COST.to_string(),
                blueprint: Some(bp),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{classify, CommitSummary};
    use chrono::Utc;

    fn request(mode: PromptMode) -> PromptRequest {
        PromptRequest {
            feature: "  Reseller order history  ".into(),
            phase: "3.1".into(),
            context: None,
            mode,
        }
    }

    #[test]
    fn context_line_empty_without_pages() {
        assert_eq!(context_line(&Inventory::default()), "");
    }

    #[test]
    fn context_line_quotes_truncated_commit() {
        let commit = CommitSummary::new(&"x".repeat(80), "ana", "2025-01-01", "abcdef123");
        let inv = classify(["src/app/page.tsx"], None, Some(commit), Utc::now());
        let line = context_line(&inv);
        assert_eq!(line, format!("Project has 1 pages. Last commit: {}", "x".repeat(50)));
    }

    #[test]
    fn messages_embed_phase_and_defaults() {
        let pair = build_messages(&request(PromptMode::Command), &Inventory::default());
        assert!(pair.system.contains("phase 3.1"));
        assert!(pair.system.contains("80 words"));
        assert!(!pair.system.contains("JSON"));
        assert_eq!(
            pair.user,
            "\nFeature: Reseller order history\nPhase: 3.1\nExtra: none"
        );
    }

    #[test]
    fn blueprint_mode_asks_for_json() {
        let mut req = request(PromptMode::Blueprint);
        req.context = Some("reuse OrderTable".into());
        let pair = build_messages(&req, &Inventory::default());
        assert!(pair.system.contains("\"acceptance\""));
        assert!(pair.user.ends_with("Extra: reuse OrderTable"));
    }

    #[test]
    fn parse_blueprint_inside_code_fence() {
        let raw = "```json\n{\"route\": \"/orders\", \"components\": [\"Table\", \"Badge\"], \
                   \"data\": [\"orders\"], \"exclusions\": [\"no auth changes\"]}\n```";
        let bp = parse_blueprint(raw);
        assert!(!bp.is_fallback());
        assert_eq!(bp.route, "/orders");
        assert_eq!(bp.components, vec!["Table", "Badge"]);
        assert!(bp.acceptance.is_empty());
        assert_eq!(
            bp.to_command(),
            "Create /orders. Components: Table, Badge. Data: orders. DO NOT: no auth changes."
        );
    }

    #[test]
    fn malformed_blueprint_falls_back_to_raw_text() {
        let bp = parse_blueprint("Create the orders page with a table.");
        assert!(bp.is_fallback());
        assert_eq!(bp.to_command(), "Create the orders page with a table.");

        let bp = parse_blueprint("{\"route\": 42}");
        assert!(bp.is_fallback());
    }

    #[test]
    fn finish_command_mode_trims() {
        let resp = finish(PromptMode::Command, "  Create orders page.\n");
        assert_eq!(resp.prompt, "Create orders page.");
        assert_eq!(resp.cost, PROMPT_COST);
        assert!(resp.blueprint.is_none());
    }

    #[test]
    fn phase_item_name_is_first_fifty_chars() {
        let long = "é".repeat(60);
        assert_eq!(phase_item_name(&long).chars().count(), 50);
    }
}
