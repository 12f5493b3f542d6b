// Line framing for the stdio transport

use bytes::BytesMut;
use tokio_util::codec::{Decoder, LinesCodec, LinesCodecError};

/// Longest request line accepted before the line is discarded (16 MiB).
pub const MAX_LINE_LENGTH: usize = 16 * 1024 * 1024;

/// One frame read from the request stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestLine {
    Line(String),
    /// A line that could not be framed as text; the reason goes into a
    /// JSON-RPC parse error.
    Malformed(&'static str),
}

/// Newline-delimited request codec.
///
/// Wraps `LinesCodec` so that a bad line (invalid UTF-8, or longer than the
/// configured maximum) becomes a `Malformed` frame instead of a decoder error.
/// `FramedRead` ends the stream after the first decoder error, so only real
/// I/O failures are surfaced as errors.
#[derive(Debug, Clone)]
pub struct RequestCodec {
    inner: LinesCodec,
}

impl RequestCodec {
    pub fn new() -> Self {
        Self::with_max_length(MAX_LINE_LENGTH)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_length),
        }
    }

    fn recover(
        result: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<RequestLine>, LinesCodecError> {
        match result {
            Ok(line) => Ok(line.map(RequestLine::Line)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(RequestLine::Malformed(
                "request line exceeds maximum length",
            ))),
            Err(LinesCodecError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                Ok(Some(RequestLine::Malformed("request line is not valid UTF-8")))
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for RequestCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for RequestCodec {
    type Item = RequestLine;
    type Error = LinesCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Self::recover(self.inner.decode(src))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Self::recover(self.inner.decode_eof(src))
    }
}
