//! Line forwarding
//!
//! Bridges the remote byte stream to the sink: split into lines, classify
//! each one, deliver in arrival order.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use bw_core::{classify, EventSink};

use crate::session::SessionError;

/// Read `reader` to EOF, classifying every line and appending it to `sink`.
///
/// Delivery order is the read order. Line endings (`\n` or `\r\n`) are
/// stripped; nothing else is trimmed. A read failure ends the stream with
/// `StreamRead`; EOF ends it cleanly.
pub async fn forward_lines<R>(reader: R, sink: &dyn EventSink) -> Result<(), SessionError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(SessionError::StreamRead)?
    {
        sink.append(classify(line)).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bw_core::{LogEvent, MemorySink};

    #[tokio::test]
    async fn test_lines_are_classified_in_order() {
        let sink = MemorySink::new();
        let input: &[u8] = b"start\nBan 1.2.3.4\nok\n";

        forward_lines(input, &sink).await.unwrap();

        let events = sink.events().await;
        assert_eq!(
            events,
            vec![
                LogEvent {
                    text: "start".to_string(),
                    alert: false
                },
                LogEvent {
                    text: "Ban 1.2.3.4".to_string(),
                    alert: true
                },
                LogEvent {
                    text: "ok".to_string(),
                    alert: false
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_crlf_endings_are_normalized() {
        let sink = MemorySink::new();
        let input: &[u8] = b"Found 10.0.0.5\r\nBan 10.0.0.5\r\n";

        forward_lines(input, &sink).await.unwrap();

        let events = sink.events().await;
        assert_eq!(events[0].text, "Found 10.0.0.5");
        assert_eq!(events[1].text, "Ban 10.0.0.5");
        assert!(events[1].alert);
    }

    #[tokio::test]
    async fn test_unterminated_last_line_is_delivered() {
        let sink = MemorySink::new();
        let input: &[u8] = b"one\ntwo";

        forward_lines(input, &sink).await.unwrap();

        let events = sink.events().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].text, "two");
    }

    #[tokio::test]
    async fn test_interior_whitespace_is_kept() {
        let sink = MemorySink::new();
        let input: &[u8] = b"  indented Ban line  \n";

        forward_lines(input, &sink).await.unwrap();

        let events = sink.events().await;
        assert_eq!(events[0].text, "  indented Ban line  ");
    }

    #[tokio::test]
    async fn test_empty_stream_delivers_nothing() {
        let sink = MemorySink::new();
        forward_lines(&b""[..], &sink).await.unwrap();
        assert!(sink.events().await.is_empty());
    }
}
