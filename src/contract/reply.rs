// SPDX-License-Identifier: MIT

//! The single result type every tool invocation yields.

use crate::contract::error::LookupError;

/// Machine-readable classification of a reply.
///
/// `text` and `ok` carry the full contract; `kind` additionally lets the
/// orchestrator tell a permanently-unconfigured tool apart from a retryable
/// upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// A real answer, including "no data found" phrased negatively
    Answer,
    /// No tool registered under the requested name
    UnknownTool,
    /// The input was rejected before any network call
    InvalidInput,
    /// The capability is missing a required credential
    NotConfigured,
    /// The upstream service failed or returned an unusable payload
    Upstream,
}

/// Outcome of one tool invocation. Always text the orchestrator can relay;
/// `ok` is false only when the caller must change its request.
#[derive(Debug, Clone)]
pub struct ToolReply {
    pub text: String,
    pub ok: bool,
    pub kind: ReplyKind,
}

impl ToolReply {
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ok: true,
            kind: ReplyKind::Answer,
        }
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self {
            text: format!("tool not found: {name}"),
            ok: false,
            kind: ReplyKind::UnknownTool,
        }
    }

    /// Collapse a typed failure into a user-presentable reply. This is the
    /// only place error values become text.
    pub fn from_error(err: LookupError) -> Self {
        match err {
            LookupError::InvalidInput(message) => Self {
                text: message,
                ok: false,
                kind: ReplyKind::InvalidInput,
            },
            LookupError::NotConfigured { capability } => Self {
                text: format!(
                    "The {capability} service is not configured on this deployment, \
                     so I can't look that up right now."
                ),
                ok: true,
                kind: ReplyKind::NotConfigured,
            },
            LookupError::Upstream { service, message } => Self {
                text: format!("Sorry, the {service} service had a problem: {message}"),
                ok: true,
                kind: ReplyKind::Upstream,
            },
            LookupError::Http(e) => Self {
                text: format!("Sorry, I ran into a network problem while looking that up: {e}"),
                ok: true,
                kind: ReplyKind::Upstream,
            },
            LookupError::Json(_) => Self {
                text: "Sorry, I received a response I couldn't understand. Please try again later."
                    .to_string(),
                ok: true,
                kind: ReplyKind::Upstream,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_is_ok() {
        let reply = ToolReply::answer("It is 03:15 PM");
        assert!(reply.ok);
        assert_eq!(reply.kind, ReplyKind::Answer);
    }

    #[test]
    fn unknown_tool_is_not_ok() {
        let reply = ToolReply::unknown_tool("teleport");
        assert!(!reply.ok);
        assert_eq!(reply.kind, ReplyKind::UnknownTool);
        assert!(reply.text.contains("teleport"));
    }

    #[test]
    fn invalid_input_is_not_ok_and_keeps_instruction() {
        let reply = ToolReply::from_error(LookupError::invalid_input("missing field 'pnr'"));
        assert!(!reply.ok);
        assert_eq!(reply.text, "missing field 'pnr'");
    }

    #[test]
    fn upstream_failure_is_ok_with_apology() {
        let reply = ToolReply::from_error(LookupError::upstream("flight", "timeout"));
        assert!(reply.ok);
        assert_eq!(reply.kind, ReplyKind::Upstream);
        assert!(!reply.text.is_empty());
    }

    #[test]
    fn not_configured_is_ok_and_names_capability_only() {
        let reply = ToolReply::from_error(LookupError::not_configured("weather"));
        assert!(reply.ok);
        assert_eq!(reply.kind, ReplyKind::NotConfigured);
        assert!(reply.text.contains("weather"));
    }
}
