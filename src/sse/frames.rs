//! Incremental frame splitting.
//!
//! Network chunks arrive at arbitrary byte boundaries. [`FrameDecoder`]
//! accumulates them and hands out only complete frames; the trailing
//! partial frame stays buffered until its delimiter arrives, and is dropped
//! if the stream ends first.

use std::collections::VecDeque;

use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};
use tracing::debug;

/// Separator between frames: one blank line.
pub const FRAME_DELIMITER: &str = "\n\n";

/// Stateful splitter from raw chunks to complete frames.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Decoded text not yet terminated by a delimiter
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence
    pending_bytes: Vec<u8>,
}

impl FrameDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw chunk, returning every frame it completes in arrival order.
    ///
    /// Multi-byte characters split across chunks are held back until the
    /// rest of the sequence arrives. Invalid UTF-8 becomes U+FFFD.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending_bytes.extend_from_slice(chunk);
        self.decode_pending();
        self.drain_frames()
    }

    /// Feed an already-decoded text chunk.
    pub fn push_str(&mut self, chunk: &str) -> Vec<String> {
        self.push(chunk.as_bytes())
    }

    /// Text buffered after the last complete frame.
    pub fn remainder(&self) -> &str {
        &self.buffer
    }

    /// End of stream. Anything still buffered is an unterminated frame and
    /// is discarded.
    pub fn finish(self) {
        let dropped = self.buffer.len() + self.pending_bytes.len();
        if dropped > 0 {
            debug!(bytes = dropped, "discarding unterminated frame at end of stream");
        }
    }

    fn decode_pending(&mut self) {
        loop {
            let (valid, invalid) = match std::str::from_utf8(&self.pending_bytes) {
                Ok(_) => (self.pending_bytes.len(), None),
                Err(err) => (err.valid_up_to(), Some(err.error_len())),
            };

            self.buffer
                .push_str(&String::from_utf8_lossy(&self.pending_bytes[..valid]));

            match invalid {
                None => {
                    self.pending_bytes.clear();
                    return;
                }
                // Incomplete sequence at the end: wait for the next chunk
                Some(None) => {
                    self.pending_bytes.drain(..valid);
                    return;
                }
                Some(Some(len)) => {
                    self.buffer.push(char::REPLACEMENT_CHARACTER);
                    self.pending_bytes.drain(..valid + len);
                }
            }
        }
    }

    fn drain_frames(&mut self) -> Vec<String> {
        if self.buffer.contains("\r\n") {
            self.buffer = self.buffer.replace("\r\n", "\n");
        }

        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.find(FRAME_DELIMITER) {
            let frame = self.buffer[..pos].to_string();
            self.buffer.drain(..pos + FRAME_DELIMITER.len());
            frames.push(frame);
        }
        frames
    }
}

/// Turn a stream of byte chunks into a stream of complete frames.
///
/// The first chunk error is forwarded and ends the stream.
pub fn frames<S, E>(chunks: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    stream::unfold(
        Some((chunks, FrameDecoder::new(), VecDeque::<String>::new())),
        |state| async move {
            let (mut chunks, mut decoder, mut ready) = match state {
                Some(state) => state,
                None => return None,
            };
            loop {
                if let Some(frame) = ready.pop_front() {
                    return Some((Ok(frame), Some((chunks, decoder, ready))));
                }

                match chunks.next().await {
                    Some(Ok(chunk)) => ready.extend(decoder.push(&chunk)),
                    Some(Err(err)) => return Some((Err(err), None)),
                    None => {
                        decoder.finish();
                        return None;
                    }
                }
            }
        },
    )
}
