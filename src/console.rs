//! Terminal surface: stdin lines become console events, output fragments
//! go to stdout.
//!
//! A line typed on stdin stands in for filling the command field and
//! pressing send, so each line yields [`BridgeEvent::InputChanged`]
//! followed by [`BridgeEvent::SendRequested`].

use std::io::BufRead;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::domain::BridgeEvent;
use crate::error::BridgeError;

/// Events produced by one typed line.
#[must_use]
pub fn line_events(line: String) -> [BridgeEvent; 2] {
    [BridgeEvent::InputChanged(line), BridgeEvent::SendRequested]
}

/// Reads `reader` line by line and forwards the events to `tx`.
///
/// Blocking; run it on a dedicated thread. Stops at end of input or when
/// the receiver is dropped. Returns the number of lines forwarded.
/// Invalid UTF-8 is replaced rather than rejected, so one bad line never
/// ends forwarding.
///
/// # Errors
///
/// Returns [`BridgeError::Io`] if reading fails.
pub fn forward_lines<R: BufRead>(
    mut reader: R,
    tx: &mpsc::Sender<BridgeEvent>,
) -> Result<usize, BridgeError> {
    let mut forwarded = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(forwarded);
        }
        for event in line_events(decode_line(&buf)) {
            if tx.blocking_send(event).is_err() {
                return Ok(forwarded);
            }
        }
        forwarded += 1;
    }
}

/// Strips a trailing `\n` or `\r\n` and decodes the rest lossily.
fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

/// Spawns a thread feeding stdin lines into `tx`.
///
/// Runs on a plain thread so a pending read never holds up runtime
/// shutdown.
///
/// # Errors
///
/// Returns [`BridgeError::Io`] if the thread cannot be spawned.
pub fn spawn_stdin_reader(tx: mpsc::Sender<BridgeEvent>) -> Result<(), BridgeError> {
    std::thread::Builder::new()
        .name("console-stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            match forward_lines(stdin.lock(), &tx) {
                Ok(lines) => tracing::debug!(lines, "stdin closed"),
                Err(err) => tracing::warn!(code = err.error_code(), error = %err, "stdin read failed"),
            }
        })?;
    Ok(())
}

/// Writes a fragment to the display and flushes it.
///
/// # Errors
///
/// Returns [`BridgeError::Io`] if the write or flush fails.
pub async fn render<W>(out: &mut W, fragment: &str) -> Result<(), BridgeError>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(fragment.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn drain(rx: &mut mpsc::Receiver<BridgeEvent>) -> Vec<BridgeEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn each_line_types_then_sends() {
        let (tx, mut rx) = mpsc::channel(16);
        let Ok(n) = forward_lines(Cursor::new("ls -la\npwd\r\n"), &tx) else {
            panic!("read failed");
        };
        assert_eq!(n, 2);
        assert_eq!(
            drain(&mut rx),
            vec![
                BridgeEvent::InputChanged("ls -la".into()),
                BridgeEvent::SendRequested,
                BridgeEvent::InputChanged("pwd".into()),
                BridgeEvent::SendRequested,
            ]
        );
    }

    #[test]
    fn blank_line_sends_empty_command() {
        let (tx, mut rx) = mpsc::channel(4);
        let Ok(n) = forward_lines(Cursor::new("\n"), &tx) else {
            panic!("read failed");
        };
        assert_eq!(n, 1);
        assert_eq!(
            drain(&mut rx),
            vec![BridgeEvent::InputChanged(String::new()), BridgeEvent::SendRequested]
        );
    }

    #[test]
    fn invalid_utf8_line_does_not_stop_forwarding() {
        let (tx, mut rx) = mpsc::channel(16);
        let Ok(n) = forward_lines(Cursor::new(&b"ls\n\xffbad\npwd\n"[..]), &tx) else {
            panic!("read failed");
        };
        assert_eq!(n, 3);
        assert_eq!(
            drain(&mut rx),
            vec![
                BridgeEvent::InputChanged("ls".into()),
                BridgeEvent::SendRequested,
                BridgeEvent::InputChanged("\u{fffd}bad".into()),
                BridgeEvent::SendRequested,
                BridgeEvent::InputChanged("pwd".into()),
                BridgeEvent::SendRequested,
            ]
        );
    }

    #[test]
    fn last_line_without_newline_is_forwarded() {
        let (tx, mut rx) = mpsc::channel(4);
        let Ok(n) = forward_lines(Cursor::new("uptime"), &tx) else {
            panic!("read failed");
        };
        assert_eq!(n, 1);
        assert_eq!(
            drain(&mut rx),
            vec![BridgeEvent::InputChanged("uptime".into()), BridgeEvent::SendRequested]
        );
    }

    #[test]
    fn stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(4);
        drop(rx);
        let Ok(n) = forward_lines(Cursor::new("a\nb\n"), &tx) else {
            panic!("read failed");
        };
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn render_writes_fragment_verbatim() {
        let mut out = tokio_test::io::Builder::new().write(b"hello\n").build();
        let result = render(&mut out, "hello\n").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn render_surfaces_write_errors() {
        let mut out = tokio_test::io::Builder::new()
            .write_error(std::io::Error::other("broken pipe"))
            .build();
        let Err(err) = render(&mut out, "x").await else {
            panic!("expected write error");
        };
        assert_eq!(err.error_code(), 3001);
    }
}
