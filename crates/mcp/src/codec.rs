// Newline-delimited framing for incoming JSON-RPC messages

use bytes::{Buf, BytesMut};
use std::cmp;
use tokio_util::codec::Decoder;

/// Longest accepted message line, in bytes
pub const MAX_MESSAGE_LENGTH: usize = 8 * 1024 * 1024;

/// One line of input.
///
/// Bad lines are frames rather than decode errors so the read loop can
/// answer them and keep going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Message(String),
    InvalidUtf8,
    TooLong,
}

/// Splits input on `\n`, dropping a trailing `\r`.
///
/// Lines longer than the limit are discarded up to the next newline and
/// reported once as [`Frame::TooLong`].
#[derive(Debug, Clone)]
pub struct MessageCodec {
    max_length: usize,
    next_index: usize,
    is_discarding: bool,
}

impl MessageCodec {
    pub fn new() -> Self {
        Self::with_max_length(MAX_MESSAGE_LENGTH)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
            is_discarding: false,
        }
    }
}

impl Default for MessageCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn to_frame(line: &[u8]) -> Frame {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    match std::str::from_utf8(line) {
        Ok(line) => Frame::Message(line.to_string()),
        Err(_) => Frame::InvalidUtf8,
    }
}

impl Decoder for MessageCodec {
    type Item = Frame;
    type Error = std::io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, std::io::Error> {
        loop {
            let read_to = cmp::min(self.max_length.saturating_add(1), buf.len());
            let newline_offset = buf[self.next_index..read_to]
                .iter()
                .position(|b| *b == b'\n');

            match (self.is_discarding, newline_offset) {
                (true, Some(offset)) => {
                    buf.advance(offset + self.next_index + 1);
                    self.is_discarding = false;
                    self.next_index = 0;
                    return Ok(Some(Frame::TooLong));
                }
                (true, None) => {
                    buf.advance(read_to);
                    self.next_index = 0;
                    if buf.is_empty() {
                        return Ok(None);
                    }
                }
                (false, Some(offset)) => {
                    let newline_index = offset + self.next_index;
                    self.next_index = 0;
                    let line = buf.split_to(newline_index + 1);
                    return Ok(Some(to_frame(&line[..line.len() - 1])));
                }
                (false, None) if buf.len() > self.max_length => {
                    self.is_discarding = true;
                }
                (false, None) => {
                    self.next_index = read_to;
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, std::io::Error> {
        if let Some(frame) = self.decode(buf)? {
            return Ok(Some(frame));
        }

        self.next_index = 0;
        if self.is_discarding {
            self.is_discarding = false;
            buf.clear();
            return Ok(Some(Frame::TooLong));
        }
        if buf.is_empty() {
            return Ok(None);
        }

        let line = buf.split_to(buf.len());
        Ok(Some(to_frame(&line)))
    }
}
