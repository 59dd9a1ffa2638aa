use serde_json::json;
use tokio_util::sync::CancellationToken;
use voice_ai_agents::{
    assistant::{Assistant, WellnessAssistant},
    checkin::CheckinLog,
    protocol::decode_call,
    session::{Session, WorkerContext},
};

#[tokio::test]
async fn test_add_checkin_persists() {
    let dir = tempfile::tempdir().unwrap();
    let log = CheckinLog::new(dir.path().join("wellness_log.json"));
    let mut assistant = WellnessAssistant::new(log.clone());

    let result = assistant
        .call_tool(
            "add_checkin",
            json!({"mood": "happy", "energy": "high", "stress": "none", "objectives": "write report, walk"}),
            CancellationToken::new(),
        )
        .await
        .unwrap();
    assert!(result.to_lowercase().contains("saved"));

    let entries = log.read().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].mood, "happy");
    assert_eq!(entries[0].energy, "high");
    assert_eq!(entries[0].stress, "none");
    assert_eq!(entries[0].objectives, vec!["write report", "walk"]);
}

#[tokio::test]
async fn test_last_checkin_survives_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("wellness_log.json");
    let worker = WorkerContext::default();

    let mut first = Session::new(&worker, "wellness-1", WellnessAssistant::new(CheckinLog::new(&log_path)));
    let reply = first
        .handle_tool_call(
            decode_call(r#"{"name": "get_last_checkin"}"#).unwrap(),
        )
        .await;
    assert_eq!(reply.result.as_deref(), Some(""));

    let reply = first
        .handle_tool_call(
            decode_call(
                r#"{"name": "add_checkin", "arguments": {"mood": "tired", "energy": "low", "stress": "work", "objectives": "rest"}}"#,
            )
            .unwrap(),
        )
        .await;
    assert!(reply.ok);
    first.shutdown();

    let log = CheckinLog::new(&log_path);
    let entries = log.read().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].objectives, vec!["rest"]);

    let mut second = Session::new(&worker, "wellness-2", WellnessAssistant::new(CheckinLog::new(&log_path)));
    let reply = second
        .handle_tool_call(decode_call(r#"{"name": "get_last_checkin"}"#).unwrap())
        .await;
    let summary = reply.result.unwrap();
    assert!(summary.contains("tired"));
    assert!(summary.contains("low"));
}

#[tokio::test]
async fn test_two_checkins_in_call_order() {
    let dir = tempfile::tempdir().unwrap();
    let log = CheckinLog::new(dir.path().join("wellness_log.json"));
    let mut assistant = WellnessAssistant::new(log.clone());

    for mood in ["restless", "hopeful"] {
        assistant
            .call_tool(
                "add_checkin",
                json!({"mood": mood, "energy": "medium", "stress": "none", "objectives": "walk"}),
                CancellationToken::new(),
            )
            .await
            .unwrap();
    }

    let moods: Vec<String> = log.read().unwrap().into_iter().map(|e| e.mood).collect();
    assert_eq!(moods, vec!["restless", "hopeful"]);
    assert_eq!(assistant.last_entry().unwrap().mood, "hopeful");

    let raw = std::fs::read_to_string(log.path()).unwrap();
    let stamps: Vec<&str> = raw
        .lines()
        .filter(|l| l.trim_start().starts_with("\"timestamp\""))
        .collect();
    assert_eq!(stamps.len(), 2);
    assert!(stamps.iter().all(|l| l.trim_end().ends_with("Z\",")));
}

#[tokio::test]
async fn test_corrupt_log_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("wellness_log.json");
    std::fs::write(&log_path, "this is not json").unwrap();

    let mut assistant = WellnessAssistant::new(CheckinLog::new(&log_path));
    assert!(assistant.last_entry().is_none());

    assistant
        .call_tool(
            "add_checkin",
            json!({"mood": "ok", "energy": "ok", "stress": "ok", "objectives": "ok"}),
            CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(CheckinLog::new(&log_path).read().unwrap().len(), 1);
}
