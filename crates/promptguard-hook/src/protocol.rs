// protocol.rs - Wire shapes for the UserPromptSubmit hook.
//
// Request (stdin):  { "prompt": "...", ...other fields ignored }
// Reply (stdout):   { "hookSpecificOutput": { "hookEventName": "UserPromptSubmit",
//                                             "additionalContext": "..." } }

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HookError;

/// The event name this hook answers for.
pub const HOOK_EVENT_NAME: &str = "UserPromptSubmit";

/// The request the host sends on stdin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookInput {
    /// The submitted prompt. Empty when the field is absent.
    pub prompt: String,
}

impl HookInput {
    /// Parse a raw request.
    ///
    /// The request must be a JSON object. A missing `prompt` is treated as
    /// an empty prompt; a `prompt` of any other type (including `null`) is
    /// rejected. Unpaired UTF-16 surrogate escapes (`\ud800`) become U+FFFD
    /// instead of failing the whole request.
    pub fn parse(raw: &str) -> Result<Self, HookError> {
        let value: Value = serde_json::from_str(&replace_lone_surrogates(raw))?;
        let object = value.as_object().ok_or(HookError::NotAnObject {
            found: json_type(&value),
        })?;

        let prompt = match object.get("prompt") {
            None => String::new(),
            Some(Value::String(prompt)) => prompt.clone(),
            Some(other) => {
                return Err(HookError::InvalidPrompt {
                    found: json_type(other),
                })
            }
        };

        Ok(Self { prompt })
    }
}

/// Rewrite `\uXXXX` escapes that name an unpaired surrogate as `\ufffd`.
/// Well-formed pairs and every other escape are left alone.
fn replace_lone_surrogates(raw: &str) -> Cow<'_, str> {
    if !raw.contains("\\u") {
        return Cow::Borrowed(raw);
    }

    let bytes = raw.as_bytes();
    let mut out = String::new();
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        match unicode_escape(bytes, i) {
            Some(0xD800..=0xDBFF)
                if matches!(unicode_escape(bytes, i + 6), Some(0xDC00..=0xDFFF)) =>
            {
                i += 12
            }
            Some(0xD800..=0xDFFF) => {
                out.push_str(&raw[copied..i]);
                out.push_str("\\ufffd");
                i += 6;
                copied = i;
            }
            Some(_) => i += 6,
            // Any other escape: skip the backslash and the escaped character.
            None => i += 2,
        }
    }

    if copied == 0 {
        return Cow::Borrowed(raw);
    }
    out.push_str(&raw[copied..]);
    Cow::Owned(out)
}

/// The code unit of a `\uXXXX` escape starting at `at`, if there is one.
fn unicode_escape(bytes: &[u8], at: usize) -> Option<u16> {
    let escape = bytes.get(at..at + 6)?;
    if escape[0] != b'\\' || escape[1] != b'u' || !escape[2..].iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let hex = std::str::from_utf8(&escape[2..]).ok()?;
    u16::from_str_radix(hex, 16).ok()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The reply written to stdout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_specific_output: HookSpecificOutput,
}

/// Event-specific part of the reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    /// Text the host adds to the model's context.
    pub additional_context: String,
}

impl HookOutput {
    /// Wrap advisory text in the `UserPromptSubmit` envelope.
    pub fn with_context(additional_context: impl Into<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: HOOK_EVENT_NAME.to_string(),
                additional_context: additional_context.into(),
            },
        }
    }

    pub fn additional_context(&self) -> &str {
        &self.hook_specific_output.additional_context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_prompt() {
        let input = HookInput::parse(r#"{"prompt": "please commit this"}"#).unwrap();
        assert_eq!(input.prompt, "please commit this");
    }

    #[test]
    fn parse_defaults_missing_prompt_to_empty() {
        let input = HookInput::parse(r#"{"session_id": "abc"}"#).unwrap();
        assert_eq!(input, HookInput::default());
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let raw = r#"{
            "session_id": "abc123",
            "transcript_path": "/tmp/t.jsonl",
            "cwd": "/work",
            "hook_event_name": "UserPromptSubmit",
            "prompt": "fix the login function"
        }"#;
        assert_eq!(HookInput::parse(raw).unwrap().prompt, "fix the login function");
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(matches!(
            HookInput::parse("{not json"),
            Err(HookError::Parse(_))
        ));
        assert!(matches!(HookInput::parse(""), Err(HookError::Parse(_))));
    }

    #[test]
    fn parse_rejects_non_object() {
        match HookInput::parse(r#"["prompt"]"#) {
            Err(HookError::NotAnObject { found }) => assert_eq!(found, "an array"),
            other => panic!("expected NotAnObject, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_non_string_prompt() {
        match HookInput::parse(r#"{"prompt": null}"#) {
            Err(HookError::InvalidPrompt { found }) => assert_eq!(found, "null"),
            other => panic!("expected InvalidPrompt, got {:?}", other),
        }
        assert!(matches!(
            HookInput::parse(r#"{"prompt": 42}"#),
            Err(HookError::InvalidPrompt { .. })
        ));
    }

    #[test]
    fn parse_replaces_lone_surrogates() {
        let input = HookInput::parse(r#"{"prompt": "\ud800 please commit"}"#).unwrap();
        assert_eq!(input.prompt, "\u{fffd} please commit");

        let input = HookInput::parse(r#"{"prompt": "broken \udc00\ud83d end"}"#).unwrap();
        assert_eq!(input.prompt, "broken \u{fffd}\u{fffd} end");
    }

    #[test]
    fn parse_keeps_surrogate_pairs_and_escaped_backslashes() {
        let input = HookInput::parse(r#"{"prompt": "smile \ud83d\ude00"}"#).unwrap();
        assert_eq!(input.prompt, "smile 😀");

        // `\\ud800` is a literal backslash followed by text, not an escape.
        let input = HookInput::parse(r#"{"prompt": "path \\ud800"}"#).unwrap();
        assert_eq!(input.prompt, "path \\ud800");
    }

    #[test]
    fn output_uses_camel_case_envelope() {
        let output = HookOutput::with_context("hello");
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(
            json,
            r#"{"hookSpecificOutput":{"hookEventName":"UserPromptSubmit","additionalContext":"hello"}}"#
        );
    }
}
