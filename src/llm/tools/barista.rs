use super::{parse_arguments, Tool, ToolError, ToolRegistry};
use crate::order::{OrderSlot, OrderStateAccumulator, OrderUpdate};
use serde_json::{json, Map, Value};
use strum::IntoEnumIterator;
use tokio_util::sync::CancellationToken;

fn slot_description(slot: OrderSlot) -> &'static str {
    match slot {
        OrderSlot::DrinkType => "The type of coffee/drink.",
        OrderSlot::Size => "The size of the drink.",
        OrderSlot::Milk => "The type of milk.",
        OrderSlot::Extras => {
            "Any extra additions (e.g., \"Vanilla Syrup\"). If multiple, call this tool multiple times or pass a comma-separated string."
        }
        OrderSlot::Name => "The customer's name.",
    }
}

/// Tools the barista can call
pub fn create_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    let properties: Map<String, Value> = OrderSlot::iter()
        .map(|slot| {
            (
                slot.to_string(),
                json!({
                    "type": ["string", "null"],
                    "description": slot_description(slot)
                }),
            )
        })
        .collect();

    registry.register_tool(Tool {
        name: "update_order".to_string(),
        description: "Update the order details. Use this tool when the user provides information about their order.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": properties,
            "required": []
        }),
    });

    registry.register_tool(Tool {
        name: "finalize_order".to_string(),
        description: "Finalize and save the order after the user confirms it.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {},
            "required": []
        }),
    });

    registry
}

/// Merge whatever the customer just said into the order
pub async fn update_order(
    order: &mut OrderStateAccumulator,
    arguments: Value,
    cancel_token: CancellationToken,
) -> Result<String, ToolError> {
    if cancel_token.is_cancelled() {
        return Err(ToolError::Cancelled);
    }

    let update: OrderUpdate = parse_arguments(arguments)?;
    Ok(order.update(update))
}

/// Persist the confirmed order
pub async fn finalize_order(
    order: &OrderStateAccumulator,
    cancel_token: CancellationToken,
) -> Result<String, ToolError> {
    if cancel_token.is_cancelled() {
        return Err(ToolError::Cancelled);
    }

    if !order.state().is_complete() {
        log::warn!(
            "Finalizing order with unset slots: {:?}",
            order.state().missing_slots()
        );
    }

    order
        .finalize()
        .map_err(|e| ToolError::ExecutionFailed(e.to_string()))
}
