use super::{parse_arguments, Tool, ToolError, ToolRegistry};
use crate::checkin::{summarize_last, CheckinEntry, CheckinLog};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

/// Tools the wellness companion can call
pub fn create_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register_tool(Tool {
        name: "add_checkin".to_string(),
        description: "Persist a daily wellness check-in. Parameters are free-text strings gathered during the conversation.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "mood": {
                    "type": "string",
                    "description": "How the user says they feel today."
                },
                "energy": {
                    "type": "string",
                    "description": "The user's energy level."
                },
                "stress": {
                    "type": "string",
                    "description": "Anything currently stressing the user."
                },
                "objectives": {
                    "type": "string",
                    "description": "One to three objectives for today, comma-separated."
                }
            },
            "required": ["mood", "energy", "stress", "objectives"]
        }),
    });

    registry.register_tool(Tool {
        name: "get_last_checkin".to_string(),
        description: "Return a brief summary of the previous check-in, or an empty string if none exists.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {},
            "required": []
        }),
    });

    registry
}

#[derive(Debug, Deserialize)]
struct CheckinArgs {
    mood: String,
    energy: String,
    stress: String,
    objectives: String,
}

/// Record a check-in. `last_entry` moves to the new entry even when the log
/// cannot be written.
pub async fn add_checkin(
    log: &CheckinLog,
    last_entry: &mut Option<CheckinEntry>,
    arguments: Value,
    cancel_token: CancellationToken,
) -> Result<String, ToolError> {
    if cancel_token.is_cancelled() {
        return Err(ToolError::Cancelled);
    }

    let args: CheckinArgs = parse_arguments(arguments)?;
    let entry = CheckinEntry::new(&args.mood, &args.energy, &args.stress, &args.objectives);
    *last_entry = Some(entry.clone());

    log.append(entry)
        .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

    Ok("Check-in saved successfully.".to_string())
}

pub async fn get_last_checkin(
    last_entry: Option<&CheckinEntry>,
    cancel_token: CancellationToken,
) -> Result<String, ToolError> {
    if cancel_token.is_cancelled() {
        return Err(ToolError::Cancelled);
    }

    Ok(summarize_last(last_entry))
}
