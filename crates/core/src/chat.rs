//! Chat proxy input handling: validation, sanitisation and prompt templating.
//!
//! The chat endpoint forwards exactly one templated prompt per request to the
//! hosted model, so everything here is about shaping that single string.

use serde::Serialize;

use crate::error::CoreError;

/// Longest accepted message, counted in characters of the raw input.
pub const MAX_MESSAGE_CHARS: usize = 1000;

pub const MSG_REQUIRED: &str = "Message is required and must be a string";
pub const MSG_TOO_LONG: &str = "Message too long (max 1000 characters)";

/// Characters stripped from user input before templating.
const STRIPPED_CHARS: [char; 5] = ['<', '>', '"', '\'', '&'];

const SYSTEM_PREAMBLE: &str = "You are an AI assistant for OpsConsole AI, a console for MSPs and IT teams. \
Help with IT troubleshooting, system monitoring, and technical support. \
Keep responses concise and helpful.";

/// Check a raw JSON `message` value.
///
/// Anything other than a non-empty string is rejected with [`MSG_REQUIRED`].
/// A string that is empty after trimming counts as missing.
pub fn validate_message(value: Option<&serde_json::Value>) -> Result<&str, CoreError> {
    let message = match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.as_str(),
        _ => return Err(CoreError::Validation(MSG_REQUIRED.into())),
    };

    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(CoreError::Validation(MSG_TOO_LONG.into()));
    }

    Ok(message)
}

/// Trim the message and drop HTML-significant characters.
pub fn sanitize_message(message: &str) -> String {
    message
        .trim()
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect()
}

/// Wrap an already-sanitised message in the assistant prompt.
pub fn build_prompt(sanitized: &str) -> String {
    format!("{SYSTEM_PREAMBLE}\n\nUser: {sanitized}")
}

/// A canned prompt offered on the assistant page.
#[derive(Debug, Clone, Serialize)]
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        title: "Diagnose Network Issues",
        description: "Get help troubleshooting connectivity problems",
        prompt: "Help me diagnose network connectivity issues in our office",
    },
    QuickAction {
        title: "Security Best Practices",
        description: "Learn about security recommendations",
        prompt: "What are the current security best practices for our IT infrastructure?",
    },
    QuickAction {
        title: "Performance Optimization",
        description: "Optimize system performance",
        prompt: "How can I optimize the performance of our servers?",
    },
    QuickAction {
        title: "Troubleshooting Guide",
        description: "Step-by-step problem resolution",
        prompt: "Walk me through troubleshooting a slow computer issue",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn err_msg(result: Result<&str, CoreError>) -> String {
        match result {
            Err(CoreError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_or_non_string_message_is_rejected() {
        assert_eq!(err_msg(validate_message(None)), MSG_REQUIRED);
        assert_eq!(err_msg(validate_message(Some(&json!(42)))), MSG_REQUIRED);
        assert_eq!(err_msg(validate_message(Some(&json!("")))), MSG_REQUIRED);
        assert_eq!(err_msg(validate_message(Some(&json!(null)))), MSG_REQUIRED);
    }

    #[test]
    fn limit_is_inclusive_and_counts_chars() {
        let at_limit = json!("é".repeat(MAX_MESSAGE_CHARS));
        assert!(validate_message(Some(&at_limit)).is_ok());

        let over = json!("a".repeat(MAX_MESSAGE_CHARS + 1));
        assert_eq!(err_msg(validate_message(Some(&over))), MSG_TOO_LONG);
    }

    #[test]
    fn sanitize_trims_and_strips_markup_chars() {
        assert_eq!(
            sanitize_message("  <script>alert('x') & \"y\"</script>  "),
            "scriptalert(x)  y/script"
        );
    }

    #[test]
    fn prompt_ends_with_user_line() {
        let prompt = build_prompt("printer offline");
        assert!(prompt.starts_with("You are an AI assistant for OpsConsole AI"));
        assert!(prompt.ends_with("\n\nUser: printer offline"));
    }

    #[test]
    fn quick_actions_have_prompts() {
        assert_eq!(QUICK_ACTIONS.len(), 4);
        assert!(QUICK_ACTIONS.iter().all(|a| !a.prompt.is_empty()));
    }
}
