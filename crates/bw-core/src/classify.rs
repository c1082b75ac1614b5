//! Log line classification
//!
//! fail2ban reports a ban with a line containing the token `Ban`. The
//! classifier is a plain substring match: case-sensitive, unanchored, and
//! indifferent to the rest of the line. It does not parse timestamps, jail
//! names or addresses; unrelated lines containing the token are accepted
//! as alerts.

/// Substring that marks a line as an alert.
pub const ALERT_TOKEN: &str = "Ban";

/// One classified log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// Raw line content, line ending stripped
    pub text: String,
    /// Whether the line matched the alert predicate
    pub alert: bool,
}

impl LogEvent {
    /// Diagnostic alert, used to surface a session failure inline in the
    /// log view.
    pub fn diagnostic(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            text: format!("[!] ERROR: {message}"),
            alert: true,
        }
    }
}

/// True if `line` contains the alert token
pub fn is_alert(line: &str) -> bool {
    line.contains(ALERT_TOKEN)
}

/// Classify a raw line into a log event
pub fn classify(text: String) -> LogEvent {
    let alert = is_alert(&text);
    LogEvent { text, alert }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ban_line_is_alert() {
        assert!(is_alert("2024-01-01 Ban 10.0.0.5"));
    }

    #[test]
    fn test_found_line_is_normal() {
        assert!(!is_alert("2024-01-01 Found 10.0.0.5"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!is_alert("2024-01-01 ban 10.0.0.5"));
        assert!(!is_alert("2024-01-01 BAN 10.0.0.5"));
    }

    #[test]
    fn test_match_is_unanchored() {
        assert!(is_alert("Ban at line start"));
        assert!(is_alert("trailing Ban"));
        assert!(is_alert("already Banned"));
    }

    #[test]
    fn test_empty_line_is_normal() {
        assert!(!is_alert(""));
    }

    #[test]
    fn test_classify_keeps_text_verbatim() {
        let event = classify("  Ban 1.2.3.4  ".to_string());
        assert_eq!(event.text, "  Ban 1.2.3.4  ");
        assert!(event.alert);
    }

    #[test]
    fn test_diagnostic_is_alert() {
        let event = LogEvent::diagnostic("connection refused");
        assert_eq!(event.text, "[!] ERROR: connection refused");
        assert!(event.alert);
    }
}
