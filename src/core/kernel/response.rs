use serde_json::Value;
use tracing::warn;

/// Observable state of a [`ResponseContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    Idle,
    Accumulating,
    Complete,
    ParseError,
    TransportError,
}

#[derive(Debug)]
enum Inner {
    Idle,
    Accumulating,
    /// Parsed value plus the byte offset where it ended in the raw buffer.
    Complete(Value, usize),
    ParseError(String),
    TransportError(String),
}

/// Final classification of one response. Exactly one variant explains the
/// call's outcome.
#[derive(Debug)]
pub enum ResponseOutcome {
    Complete(Value),
    ParseError { message: String, raw: Vec<u8> },
    TransportError { message: String },
}

/// Incremental JSON accumulator fed by the transport's streaming body.
///
/// Chunks land in a raw byte buffer (kept for diagnostics) and the parse is
/// re-attempted as bytes arrive. serde_json's EOF classification separates
/// "value not finished yet" from a genuine syntax error, so the result is
/// invariant under how the transport happens to split the body into chunks.
///
/// ```text
/// idle -> accumulating -> { complete, parse_error, transport_error }
/// ```
///
/// Terminal states stick until [`reset`](Self::reset).
#[derive(Debug)]
pub struct ResponseContext {
    raw: Vec<u8>,
    inner: Inner,
    http_status: Option<u16>,
}

impl Default for ResponseContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseContext {
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            inner: Inner::Idle,
            http_status: None,
        }
    }

    pub fn state(&self) -> ResponseState {
        match self.inner {
            Inner::Idle => ResponseState::Idle,
            Inner::Accumulating => ResponseState::Accumulating,
            Inner::Complete(..) => ResponseState::Complete,
            Inner::ParseError(_) => ResponseState::ParseError,
            Inner::TransportError(_) => ResponseState::TransportError,
        }
    }

    /// Raw bytes received so far, available in every state.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn set_http_status(&mut self, status: u16) {
        self.http_status = Some(status);
    }

    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    /// Feed one chunk from the transport.
    pub fn push_chunk(&mut self, chunk: &[u8]) {
        match &self.inner {
            Inner::Complete(_, value_end) => {
                // A well-formed response ends at the value. Anything past it
                // is a protocol violation; keep it in the raw buffer but do
                // not let it disturb the parsed result.
                let trailing = self.raw.len() - value_end + chunk.len();
                warn!(
                    trailing_bytes = trailing,
                    "ignoring bytes after complete JSON value"
                );
                self.raw.extend_from_slice(chunk);
                return;
            }
            Inner::ParseError(_) | Inner::TransportError(_) => {
                self.raw.extend_from_slice(chunk);
                return;
            }
            Inner::Idle | Inner::Accumulating => {}
        }

        self.inner = Inner::Accumulating;
        self.raw.extend_from_slice(chunk);
        self.advance_parse();
    }

    fn advance_parse(&mut self) {
        let mut stream = serde_json::Deserializer::from_slice(&self.raw).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value)) => {
                let value_end = stream.byte_offset();
                let trailing = &self.raw[value_end..];
                if trailing.iter().any(|b| !b.is_ascii_whitespace()) {
                    warn!(
                        trailing_bytes = trailing.len(),
                        "ignoring bytes after complete JSON value"
                    );
                }
                self.inner = Inner::Complete(value, value_end);
            }
            Some(Err(e)) if e.is_eof() => {
                // Value not finished yet; wait for more bytes.
            }
            Some(Err(e)) => {
                self.inner = Inner::ParseError(e.to_string());
            }
            None => {
                // Whitespace only so far.
            }
        }
    }

    /// Mark the end of the byte stream. A buffer that never formed a value
    /// (including an empty body) becomes a parse error here.
    pub fn finish(&mut self) {
        if matches!(self.inner, Inner::Idle | Inner::Accumulating) {
            self.inner = Inner::ParseError(if self.raw.is_empty() {
                "empty response body".to_string()
            } else {
                "truncated JSON response".to_string()
            });
        }
    }

    /// Record a transport-level failure (connection error, timeout).
    pub fn fail_transport(&mut self, message: impl Into<String>) {
        self.inner = Inner::TransportError(message.into());
    }

    /// Consume the context into its final classification. `None` while not
    /// yet terminal.
    pub fn into_outcome(self) -> Option<ResponseOutcome> {
        match self.inner {
            Inner::Idle | Inner::Accumulating => None,
            Inner::Complete(value, _) => Some(ResponseOutcome::Complete(value)),
            Inner::ParseError(message) => Some(ResponseOutcome::ParseError {
                message,
                raw: self.raw,
            }),
            Inner::TransportError(message) => Some(ResponseOutcome::TransportError { message }),
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match &self.inner {
            Inner::Complete(value, _) => Some(value),
            _ => None,
        }
    }

    /// Return to `idle` for reuse on a pooled handle.
    pub fn reset(&mut self) {
        self.raw.clear();
        self.inner = Inner::Idle;
        self.http_status = None;
    }
}
