//! JSON-lines framing for driving tool calls from outside the process.
//!
//! One request per line:
//! `{"id": 1, "name": "update_order", "arguments": {"size": "Large"}}`
//!
//! One reply per request, echoing `id`:
//! `{"id": 1, "ok": true, "result": "Order updated. ..."}`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed tool call: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Empty frame")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: Option<Value>,
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolReply {
    pub fn success(id: Option<Value>, result: String) -> Self {
        Self {
            id,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, error: impl ToString) -> Self {
        Self {
            id,
            ok: false,
            result: None,
            error: Some(error.to_string()),
        }
    }
}

pub fn decode_call(line: &str) -> Result<ToolCall, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(line)?)
}

/// Encode a reply as a single line, without the trailing newline.
pub fn encode_reply(reply: &ToolReply) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(reply)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_call_without_arguments() {
        let call = decode_call(r#"{"name": "finalize_order"}"#).unwrap();
        assert_eq!(call.name, "finalize_order");
        assert_eq!(call.id, None);
        assert!(call.arguments.is_null());
    }

    #[test]
    fn test_decode_call_with_id() {
        let call =
            decode_call(r#"{"id": 7, "name": "update_order", "arguments": {"size": "Small"}}"#)
                .unwrap();
        assert_eq!(call.id, Some(json!(7)));
        assert_eq!(call.arguments["size"], "Small");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_call("   "), Err(ProtocolError::Empty)));
        assert!(matches!(
            decode_call(r#"{"arguments": {}}"#),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn test_encode_reply() {
        let ok = encode_reply(&ToolReply::success(Some(json!("a")), "done".into())).unwrap();
        assert_eq!(ok, r#"{"id":"a","ok":true,"result":"done"}"#);

        let err = encode_reply(&ToolReply::failure(None, "boom")).unwrap();
        assert_eq!(err, r#"{"ok":false,"error":"boom"}"#);
    }
}
