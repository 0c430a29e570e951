//! A buffered byte-level character stream with line and column tracking.

use std::io::{ErrorKind, Read};

use bytes::{Buf, Bytes, BytesMut};
use tracing::warn;

use crate::error::Position;

const INPUT_BUFFER_SIZE: usize = 1024;

/// A character stream over any reader.
///
/// Characters are single bytes. `None` signals the end of the input.
pub struct InputStream<R: Read> {
    reader: R,
    buffer: Bytes,
    /// Number of newlines consumed so far.
    line: usize,
    /// Number of characters consumed on the current line.
    column: usize,
    exhausted: bool,
}

impl<R: Read> InputStream<R> {
    pub fn new(reader: R) -> InputStream<R> {
        InputStream {
            reader,
            buffer: Bytes::new(),
            line: 0,
            column: 0,
            exhausted: false,
        }
    }

    fn fill(&mut self) {
        while self.buffer.is_empty() && !self.exhausted {
            let mut chunk = BytesMut::zeroed(INPUT_BUFFER_SIZE);
            match self.reader.read(&mut chunk) {
                Ok(0) => self.exhausted = true,
                Ok(n) => {
                    chunk.truncate(n);
                    self.buffer = chunk.freeze();
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!("Treating read failure as end of input: {}", e);
                    self.exhausted = true;
                }
            }
        }
    }

    /// Get the next character without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Option<u8> {
        self.fill();
        self.buffer.first().copied()
    }

    /// Consume the next character.
    #[inline]
    pub fn read(&mut self) -> Option<u8> {
        self.fill();
        if self.buffer.is_empty() {
            return None;
        }

        let c = self.buffer.get_u8();
        if c == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume everything up to and including the next newline.
    pub fn skip_line(&mut self) {
        while let Some(c) = self.read() {
            if c == b'\n' {
                break;
            }
        }
    }

    pub fn is_at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    /// The 1-based line of the next character.
    #[inline]
    pub fn line(&self) -> usize {
        self.line + 1
    }

    /// The 1-based column of the next character.
    #[inline]
    pub fn column(&self) -> usize {
        self.column + 1
    }

    /// The position of the next character.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line(), self.column())
    }
}
