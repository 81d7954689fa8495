//! Protocol module - JSON message types for the gesture feed
//!
//! Line-delimited JSON over TCP. Every message has `type`, `seq` (sequence
//! number, strictly increasing per connection) and `ts` (sender timestamp in
//! milliseconds).

use serde::{Deserialize, Serialize};

use crate::types::Command;

/// Protocol version spoken by this server; clients must share the major version
pub const PROTOCOL_VERSION: &str = "1.0.0";

// ============== Detector -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HelloType {
    #[default]
    #[serde(rename = "hello")]
    Hello,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GestureType {
    #[default]
    #[serde(rename = "gesture")]
    Gesture,
}

/// Detector hello (first message on a connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HelloType,
    pub seq: u64,
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

/// One classified camera frame
///
/// `gesture` is the wire name of a command; anything unrecognized reads as
/// `none`. `hands` is how many hands the detector saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: GestureType,
    pub seq: u64,
    pub ts: u64,
    pub gesture: String,
    #[serde(default)]
    pub hands: u8,
}

impl GestureMessage {
    pub fn command(&self) -> Command {
        Command::parse(&self.gesture)
    }
}

// ============== Game -> Detector Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "handshake_required")]
    HandshakeRequired,
    #[serde(rename = "protocol_mismatch")]
    ProtocolMismatch,
    #[serde(rename = "invalid_message")]
    InvalidMessage,
    #[serde(rename = "out_of_order")]
    OutOfOrder,
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

// ============== Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Gesture(GestureMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Parse one line from a detector
///
/// Unknown `type` values are not a hard error; they come back as
/// [`ParsedMessage::Unknown`] so the server can answer with the sender's seq.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "gesture")]
        Gesture(GestureMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Gesture(m)) => Ok(ParsedMessage::Gesture(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct TypeOnly<'a> {
                #[serde(rename = "type")]
                msg_type: Option<&'a str>,
                seq: Option<u64>,
            }
            let head = serde_json::from_str::<TypeOnly>(json)?;
            match head.msg_type {
                Some("hello") | Some("gesture") => Err(e),
                _ => Ok(ParsedMessage::Unknown(UnknownMessage {
                    seq: head.seq.unwrap_or(0),
                })),
            }
        }
    }
}

/// Best-effort `seq` extraction for replies to lines that failed to parse
pub fn extract_seq(json: &str) -> u64 {
    #[derive(Deserialize)]
    struct SeqOnly {
        seq: Option<u64>,
    }
    serde_json::from_str::<SeqOnly>(json)
        .ok()
        .and_then(|s| s.seq)
        .unwrap_or(0)
}

/// Same major version as [`PROTOCOL_VERSION`]
pub fn is_compatible(version: &str) -> bool {
    let major = |v: &str| v.split('.').next().map(str::to_owned);
    major(version).is_some() && major(version) == major(PROTOCOL_VERSION)
}

// ============== Utility Functions ==============

pub fn create_hello(seq: u64, client_name: &str, protocol_version: &str) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        ts: current_timestamp_ms(),
        client: ClientInfo {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        protocol_version: protocol_version.to_string(),
    }
}

pub fn create_gesture(seq: u64, gesture: Command, hands: u8) -> GestureMessage {
    GestureMessage {
        msg_type: GestureType::Gesture,
        seq,
        ts: current_timestamp_ms(),
        gesture: gesture.as_str().to_string(),
        hands,
    }
}

pub fn create_welcome(seq: u64, protocol_version: &str) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: current_timestamp_ms(),
        protocol_version: protocol_version.to_string(),
    }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
