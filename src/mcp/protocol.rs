//! JSON-RPC 2.0 framing for the workshop MCP server.
//!
//! Every stdin line is one message. A message with an `id` is a request and
//! gets exactly one reply (a [`JsonRpcResponse`] or a [`JsonRpcError`]); a
//! message without one is a notification and is never answered.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value of the `jsonrpc` member in every message.
const JSONRPC_VERSION: &str = "2.0";

/// The MCP protocol version offered when the client asks for one we do not know.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Protocol versions this server can speak, oldest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2024-11-05", "2025-03-26", "2025-06-18"];

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "workshop-mcp";

/// Picks the protocol version to answer an `initialize` request with.
///
/// The client's version is echoed back when supported; otherwise the server
/// proposes [`MCP_PROTOCOL_VERSION`] and the client decides whether to continue.
#[must_use]
pub fn negotiate_protocol_version(requested: &str) -> &'static str {
    SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .copied()
        .find(|v| *v == requested)
        .unwrap_or(MCP_PROTOCOL_VERSION)
}

/// Identifier pairing a reply with its request. MCP forbids `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// `"id": 7`
    Number(i64),
    /// `"id": "call-7"`
    String(String),
}

/// A request from the client, e.g. `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Echoed in the reply.
    pub id: RequestId,
    /// `initialize`, `tools/list`, `tools/call`, `ping`, ...
    pub method: String,
    /// Method arguments, if any.
    #[serde(default)]
    pub params: Option<Value>,
}

/// A fire-and-forget message from the client, e.g. `notifications/initialized`.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcNotification {
    /// Notification name.
    pub method: String,
    /// Notification payload, if any.
    #[serde(default)]
    pub params: Option<Value>,
}

/// A successful reply.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    /// Always `"2.0"`.
    pub jsonrpc: &'static str,
    /// Id of the request being answered.
    pub id: RequestId,
    /// Method-specific payload.
    pub result: Value,
}

impl JsonRpcResponse {
    /// Wraps `result` as the reply to request `id`.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Value has a destructor
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

/// Error codes this server sends, from the JSON-RPC 2.0 reserved range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The line was not JSON.
    ParseError,
    /// JSON, but not a JSON-RPC message; also used for lifecycle violations.
    InvalidRequest,
    /// The server does not implement the method.
    MethodNotFound,
    /// `params` did not have the expected shape.
    InvalidParams,
    /// Something failed on our side.
    InternalError,
}

impl ErrorCode {
    /// The wire value.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }
}

/// The `error` member of an error reply.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorObject {
    /// See [`ErrorCode::code`].
    pub code: i32,
    /// Human-readable explanation.
    pub message: String,
}

/// An error reply.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    /// Always `"2.0"`.
    pub jsonrpc: &'static str,
    /// Id of the failed request; absent when the request could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    /// What went wrong.
    pub error: ErrorObject,
}

impl JsonRpcError {
    /// Builds an error reply.
    #[must_use]
    pub fn new(id: Option<RequestId>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            error: ErrorObject {
                code: code.code(),
                message: message.into(),
            },
        }
    }

    /// The line could not be decoded as JSON.
    #[must_use]
    pub fn parse_error() -> Self {
        Self::new(None, ErrorCode::ParseError, "Parse error")
    }

    /// The line was JSON but not a JSON-RPC 2.0 message.
    #[must_use]
    pub fn invalid_request(id: Option<RequestId>) -> Self {
        Self::new(id, ErrorCode::InvalidRequest, "Invalid Request")
    }

    /// `method` is not served here.
    #[must_use]
    pub fn method_not_found(id: RequestId, method: &str) -> Self {
        Self::new(
            Some(id),
            ErrorCode::MethodNotFound,
            format!("Method not found: {method}"),
        )
    }

    /// The request's `params` were missing or malformed.
    #[must_use]
    pub fn invalid_params(id: RequestId, message: impl Into<String>) -> Self {
        Self::new(Some(id), ErrorCode::InvalidParams, message)
    }

    /// A request other than `initialize` or `ping` arrived before the handshake finished.
    #[must_use]
    pub fn not_initialised(id: RequestId) -> Self {
        Self::new(Some(id), ErrorCode::InvalidRequest, "Server not initialised")
    }

    /// A second `initialize` arrived.
    #[must_use]
    pub fn already_initialised(id: RequestId) -> Self {
        Self::new(
            Some(id),
            ErrorCode::InvalidRequest,
            "Server already initialised",
        )
    }

    /// The server failed to produce a reply.
    #[must_use]
    pub fn internal_error(id: RequestId, message: impl Into<String>) -> Self {
        Self::new(Some(id), ErrorCode::InternalError, message)
    }
}

/// One decoded input line.
#[derive(Debug, Clone)]
pub enum IncomingMessage {
    /// Has an `id`; must be answered.
    Request(JsonRpcRequest),
    /// No `id`; must not be answered.
    Notification(JsonRpcNotification),
}

impl IncomingMessage {
    /// The method name, for logging.
    #[must_use]
    pub fn method(&self) -> &str {
        match self {
            Self::Request(req) => &req.method,
            Self::Notification(notif) => &notif.method,
        }
    }
}

/// Decodes one input line.
///
/// # Errors
///
/// - Parse error if the line is not JSON.
/// - Invalid request if it is not an object with `"jsonrpc": "2.0"` and a
///   non-empty `method`, or if its `id` is neither a string nor an integer.
pub fn parse_message(line: &str) -> Result<IncomingMessage, JsonRpcError> {
    let value: Value = serde_json::from_str(line).map_err(|_| JsonRpcError::parse_error())?;

    let Some(fields) = value.as_object() else {
        return Err(JsonRpcError::invalid_request(None));
    };
    if fields.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return Err(JsonRpcError::invalid_request(None));
    }

    if !fields.contains_key("id") {
        let notification: JsonRpcNotification =
            serde_json::from_value(value).map_err(|_| JsonRpcError::invalid_request(None))?;
        return Ok(IncomingMessage::Notification(notification));
    }

    let request: JsonRpcRequest =
        serde_json::from_value(value).map_err(|_| JsonRpcError::invalid_request(None))?;
    if request.method.is_empty() {
        return Err(JsonRpcError::invalid_request(Some(request.id)));
    }

    Ok(IncomingMessage::Request(request))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(line: &str) -> JsonRpcRequest {
        match parse_message(line).unwrap() {
            IncomingMessage::Request(req) => req,
            IncomingMessage::Notification(n) => panic!("{} parsed as a notification", n.method),
        }
    }

    fn error_code(line: &str) -> i32 {
        parse_message(line).unwrap_err().error.code
    }

    #[test]
    fn set_playground_call_keeps_arguments() {
        let req = request(
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call",
                "params":{"name":"set_playground","arguments":{"exerciseNumber":2,"type":"solution"}}}"#,
        );

        assert_eq!(req.id, RequestId::Number(4));
        assert_eq!(req.method, "tools/call");
        let params = req.params.unwrap();
        assert_eq!(params["name"], "set_playground");
        assert_eq!(params["arguments"]["exerciseNumber"], 2);
        assert_eq!(params["arguments"]["type"], "solution");
    }

    #[test]
    fn update_progress_call_with_string_id() {
        let req = request(
            r#"{"jsonrpc":"2.0","id":"progress-1","method":"tools/call",
                "params":{"name":"update_progress","arguments":{"epicLessonSlug":"form-validation"}}}"#,
        );
        assert_eq!(req.id, RequestId::String("progress-1".to_string()));
    }

    #[test]
    fn initialized_is_a_notification() {
        let msg = parse_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .unwrap();
        assert!(matches!(msg, IncomingMessage::Notification(_)));
        assert_eq!(msg.method(), "notifications/initialized");
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(error_code("{\"jsonrpc\": "), ErrorCode::ParseError.code());
        assert_eq!(error_code("[1, 2]"), ErrorCode::InvalidRequest.code());
        assert_eq!(
            error_code(r#"{"id":1,"method":"ping"}"#),
            ErrorCode::InvalidRequest.code()
        );
        assert_eq!(
            error_code(r#"{"jsonrpc":"1.0","id":1,"method":"ping"}"#),
            ErrorCode::InvalidRequest.code()
        );
        assert_eq!(
            error_code(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#),
            ErrorCode::InvalidRequest.code()
        );
    }

    #[test]
    fn empty_method_keeps_the_request_id() {
        let err = parse_message(r#"{"jsonrpc":"2.0","id":9,"method":""}"#).unwrap_err();
        assert_eq!(err.id, Some(RequestId::Number(9)));
        assert_eq!(err.error.code, ErrorCode::InvalidRequest.code());
    }

    #[test]
    fn tool_result_reply_shape() {
        let reply = JsonRpcResponse::success(
            RequestId::String("call-1".to_string()),
            json!({ "content": [{ "type": "text", "text": "Playground set to 01.01.problem." }] }),
        );
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": "call-1",
                "result": { "content": [{ "type": "text", "text": "Playground set to 01.01.problem." }] }
            })
        );
    }

    #[test]
    fn error_reply_omits_unknown_id() {
        let value = serde_json::to_value(JsonRpcError::parse_error()).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["error"]["code"], -32700);

        let value =
            serde_json::to_value(JsonRpcError::method_not_found(RequestId::Number(3), "resources/list"))
                .unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["error"]["message"], "Method not found: resources/list");
    }

    #[test]
    fn lifecycle_errors_use_invalid_request() {
        let early = JsonRpcError::not_initialised(RequestId::Number(1));
        let twice = JsonRpcError::already_initialised(RequestId::Number(2));
        assert_eq!(early.error.code, -32600);
        assert_eq!(twice.error.code, -32600);
        assert!(twice.error.message.contains("already"));
    }

    #[test]
    fn negotiate_known_and_unknown_versions() {
        assert_eq!(negotiate_protocol_version("2025-03-26"), "2025-03-26");
        assert_eq!(negotiate_protocol_version("1999-01-01"), MCP_PROTOCOL_VERSION);
    }
}
