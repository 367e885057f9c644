//! Framing for one bridge connection: a JSON request line out, an
//! envelope line back.
//!
//! Response lines are classified straight into [`Envelope<Value>`] with
//! [`Envelope::from_value`], so a JSON line without a recognised `status`
//! still decodes (as [`ApiError::Unknown`](crate::api::ApiError::Unknown)).
//! Only lines that are not JSON at all, or exceed the size cap, are errors.

use bytes::BytesMut;
use serde::Serialize;
use serde_json::Value;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};

use crate::api::Envelope;
use crate::{AppError, Result};

/// Default cap on a single response line: 1 MiB.
pub const MAX_RESPONSE_BYTES: usize = 1_048_576;

/// Outbound request line.
#[derive(Debug, Serialize)]
pub struct BridgeRequest<'a> {
    /// Backend command name.
    pub command: &'a str,
    /// Command arguments.
    pub args: &'a Value,
    /// Shared-secret authentication token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<&'a str>,
}

/// Encodes [`BridgeRequest`]s and decodes response envelopes.
#[derive(Debug)]
pub struct BridgeCodec {
    lines: LinesCodec,
    max_response_bytes: usize,
}

impl BridgeCodec {
    /// Codec capped at [`MAX_RESPONSE_BYTES`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_response_bytes(MAX_RESPONSE_BYTES)
    }

    /// Codec rejecting response lines longer than `max` bytes.
    #[must_use]
    pub fn with_max_response_bytes(max: usize) -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(max),
            max_response_bytes: max,
        }
    }

    fn frame_error(&self, err: LinesCodecError) -> AppError {
        match err {
            LinesCodecError::MaxLineLengthExceeded => AppError::Ipc(format!(
                "response line exceeds {} bytes",
                self.max_response_bytes
            )),
            LinesCodecError::Io(io_err) => AppError::from(io_err),
        }
    }

    /// Pull lines until a non-blank one is parsed or the buffer runs dry.
    fn next_envelope(
        &mut self,
        src: &mut BytesMut,
        eof: bool,
    ) -> Result<Option<Envelope<Value>>> {
        loop {
            let line = if eof {
                self.lines.decode_eof(src)
            } else {
                self.lines.decode(src)
            }
            .map_err(|err| self.frame_error(err))?;

            match line {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => return parse_envelope(&line).map(Some),
                None => return Ok(None),
            }
        }
    }
}

impl Default for BridgeCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for BridgeCodec {
    type Item = Envelope<Value>;
    type Error = AppError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        self.next_envelope(src, false)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        self.next_envelope(src, true)
    }
}

impl Encoder<&BridgeRequest<'_>> for BridgeCodec {
    type Error = AppError;

    fn encode(&mut self, request: &BridgeRequest<'_>, dst: &mut BytesMut) -> Result<()> {
        let line = serde_json::to_string(request)?;
        self.lines
            .encode(line, dst)
            .map_err(|err| self.frame_error(err))
    }
}

fn parse_envelope(line: &str) -> Result<Envelope<Value>> {
    serde_json::from_str(line.trim())
        .map(Envelope::from_value)
        .map_err(|err| AppError::Ipc(format!("malformed response: {err}")))
}
