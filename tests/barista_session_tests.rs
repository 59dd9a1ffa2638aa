use serde_json::{json, Value};
use voice_ai_agents::{
    assistant::{Assistant, BaristaAssistant},
    order::{OrderState, OrderStateAccumulator},
    protocol::decode_call,
    session::{Session, WorkerContext},
    store,
};

fn state_from_reply(reply: &str) -> Value {
    let raw = reply
        .strip_prefix("Order updated. Current state: ")
        .expect("update reply should carry the state");
    serde_json::from_str(raw).unwrap()
}

#[tokio::test]
async fn test_full_order_conversation() {
    let dir = tempfile::tempdir().unwrap();
    let order_path = dir.path().join("order.json");
    let worker = WorkerContext::default();
    let assistant = BaristaAssistant::new(OrderStateAccumulator::new(&order_path));
    let mut session = Session::new(&worker, "codebrew-1", assistant);

    let frames = [
        r#"{"id": 1, "name": "update_order", "arguments": {"drinkType": "Latte", "size": "Medium"}}"#,
        r#"{"id": 2, "name": "update_order", "arguments": {"extras": "Vanilla Syrup, Extra Shot"}}"#,
        r#"{"id": 3, "name": "update_order", "arguments": {"milk": "Oat", "extras": "Extra Shot, Oat Milk", "name": "Priya"}}"#,
        r#"{"id": 4, "name": "update_order", "arguments": {"size": "Large"}}"#,
    ];

    let mut last = None;
    for frame in frames {
        let reply = session.handle_tool_call(decode_call(frame).unwrap()).await;
        assert!(reply.ok, "{:?}", reply.error);
        last = reply.result;
    }

    assert_eq!(
        state_from_reply(&last.unwrap()),
        json!({
            "drinkType": "Latte",
            "size": "Large",
            "milk": "Oat",
            "extras": ["Vanilla Syrup", "Extra Shot", "Oat Milk"],
            "name": "Priya"
        })
    );

    let reply = session
        .handle_tool_call(decode_call(r#"{"id": 5, "name": "finalize_order"}"#).unwrap())
        .await;
    assert_eq!(reply.id, Some(json!(5)));
    assert_eq!(
        reply.result.as_deref(),
        Some("Order finalized and saved to order.json.")
    );

    let saved: OrderState = store::read_json(&order_path).unwrap();
    assert_eq!(&saved, session.assistant().order().state());

    let usage = session.shutdown();
    assert_eq!(usage.tool_calls, 5);
    assert_eq!(usage.failures, 0);
}

#[tokio::test]
async fn test_finalize_overwrites_previous_order() {
    let dir = tempfile::tempdir().unwrap();
    let order_path = dir.path().join("order.json");

    let mut first = BaristaAssistant::new(OrderStateAccumulator::new(&order_path));
    first
        .call_tool(
            "update_order",
            json!({"drinkType": "Mocha", "extras": "Whipped Cream"}),
            Default::default(),
        )
        .await
        .unwrap();
    first
        .call_tool("finalize_order", json!({}), Default::default())
        .await
        .unwrap();

    let mut second = BaristaAssistant::new(OrderStateAccumulator::new(&order_path));
    second
        .call_tool("update_order", json!({"drinkType": "Espresso"}), Default::default())
        .await
        .unwrap();
    second
        .call_tool("finalize_order", json!({}), Default::default())
        .await
        .unwrap();

    let saved: OrderState = store::read_json(&order_path).unwrap();
    assert_eq!(saved.drink_type.as_deref(), Some("Espresso"));
    assert!(saved.extras.is_empty());
}

#[tokio::test]
async fn test_finalize_failure_reaches_the_llm() {
    let dir = tempfile::tempdir().unwrap();
    let worker = WorkerContext::default();
    let assistant =
        BaristaAssistant::new(OrderStateAccumulator::new(dir.path().join("gone/order.json")));
    let mut session = Session::new(&worker, "codebrew-2", assistant);

    let reply = session
        .handle_tool_call(decode_call(r#"{"name": "finalize_order"}"#).unwrap())
        .await;
    assert!(!reply.ok);
    assert!(reply.error.unwrap().contains("Tool execution failed"));
    assert_eq!(session.shutdown().failures, 1);
}
