//! The two agent personas and the tool calls they answer.

use crate::checkin::{CheckinEntry, CheckinLog};
use crate::llm::tools::{barista, wellness, ToolError, ToolRegistry};
use crate::llm::SystemPrompts;
use crate::order::OrderStateAccumulator;
use async_trait::async_trait;
use serde_json::Value;
use strum::{Display, EnumString};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AgentKind {
    Barista,
    Wellness,
}

/// A persona the voice framework talks to: instructions for the LLM, a tool
/// schema, and the handlers behind it.
#[async_trait]
pub trait Assistant: Send {
    fn kind(&self) -> AgentKind;

    fn instructions(&self) -> &str;

    fn tools(&self) -> &ToolRegistry;

    /// Run a tool call and return the text handed back to the LLM.
    async fn call_tool(
        &mut self,
        name: &str,
        arguments: Value,
        cancel_token: CancellationToken,
    ) -> Result<String, ToolError>;
}

pub struct BaristaAssistant {
    order: OrderStateAccumulator,
    tools: ToolRegistry,
}

impl BaristaAssistant {
    pub fn new(order: OrderStateAccumulator) -> Self {
        Self {
            order,
            tools: barista::create_registry(),
        }
    }

    pub fn order(&self) -> &OrderStateAccumulator {
        &self.order
    }
}

#[async_trait]
impl Assistant for BaristaAssistant {
    fn kind(&self) -> AgentKind {
        AgentKind::Barista
    }

    fn instructions(&self) -> &str {
        SystemPrompts::barista()
    }

    fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    async fn call_tool(
        &mut self,
        name: &str,
        arguments: Value,
        cancel_token: CancellationToken,
    ) -> Result<String, ToolError> {
        match name {
            "update_order" => barista::update_order(&mut self.order, arguments, cancel_token).await,
            "finalize_order" => barista::finalize_order(&self.order, cancel_token).await,
            _ => Err(ToolError::NotFound(format!("Tool '{}' not found", name))),
        }
    }
}

pub struct WellnessAssistant {
    log: CheckinLog,
    last_entry: Option<CheckinEntry>,
    tools: ToolRegistry,
}

impl WellnessAssistant {
    /// Reads the log once so the previous check-in can be referenced.
    pub fn new(log: CheckinLog) -> Self {
        let last_entry = log.last();
        if let Some(entry) = &last_entry {
            log::info!(
                "Previous check-in found from {}",
                entry.timestamp.as_deref().unwrap_or("an unknown date")
            );
        }

        Self {
            log,
            last_entry,
            tools: wellness::create_registry(),
        }
    }

    pub fn last_entry(&self) -> Option<&CheckinEntry> {
        self.last_entry.as_ref()
    }
}

#[async_trait]
impl Assistant for WellnessAssistant {
    fn kind(&self) -> AgentKind {
        AgentKind::Wellness
    }

    fn instructions(&self) -> &str {
        SystemPrompts::wellness()
    }

    fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    async fn call_tool(
        &mut self,
        name: &str,
        arguments: Value,
        cancel_token: CancellationToken,
    ) -> Result<String, ToolError> {
        match name {
            "add_checkin" => {
                wellness::add_checkin(&self.log, &mut self.last_entry, arguments, cancel_token)
                    .await
            }
            "get_last_checkin" => {
                wellness::get_last_checkin(self.last_entry.as_ref(), cancel_token).await
            }
            _ => Err(ToolError::NotFound(format!("Tool '{}' not found", name))),
        }
    }
}
