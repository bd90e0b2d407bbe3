//! Event-stream framing.
//!
//! The stream body is a sequence of lines. Lines starting with `data: ` carry
//! one payload each; every other line is ignored. The payload `[DONE]`
//! completes the stream.

use std::io::BufRead;

use crate::error::ClientError;

const DATA_PREFIX: &str = "data: ";
const DONE_MARKER: &str = "[DONE]";

/// One decoded stream frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Payload text of a `data:` frame, trimmed.
    Message(String),
    /// The `[DONE]` marker.
    Done,
}

/// Decode a single line into a stream event.
///
/// Returns `None` for lines that are not `data:` frames.
#[must_use]
pub fn parse_frame(line: &str) -> Option<StreamEvent> {
    let payload = line.strip_prefix(DATA_PREFIX)?.trim();
    if payload == DONE_MARKER {
        Some(StreamEvent::Done)
    } else {
        Some(StreamEvent::Message(payload.to_owned()))
    }
}

/// Iterator over the frames of a stream body.
///
/// Yields messages until [`StreamEvent::Done`] or the first read error, and
/// fuses afterwards. A body that ends without `[DONE]` simply ends the
/// iteration. Invalid UTF-8 in a line is replaced rather than treated as an
/// error.
pub struct EventStream<R> {
    reader: R,
    line: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> EventStream<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for EventStream<R> {
    type Item = Result<StreamEvent, ClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => {
                    tracing::debug!("Stream ended without completion marker");
                    self.finished = true;
                }
                Ok(_) => match parse_frame(&String::from_utf8_lossy(&self.line)) {
                    Some(StreamEvent::Done) => {
                        tracing::debug!("Stream completed");
                        self.finished = true;
                        return Some(Ok(StreamEvent::Done));
                    }
                    Some(event) => return Some(Ok(event)),
                    None => {}
                },
                Err(e) => {
                    tracing::warn!("Stream read failed: {}", e);
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}

impl<R: BufRead> std::iter::FusedIterator for EventStream<R> {}
