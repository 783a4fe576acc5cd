//! ASCII header tokenizer for netpbm rasters
//!
//! Tokens are separated by whitespace; `#` starts a comment that runs to
//! the end of the line. Reading a token consumes exactly one terminating
//! whitespace byte, so after the last header token the reader sits on the
//! first byte of binary data.

use std::io::{self, BufRead};

use crate::index::errors::{IndexError, IndexResult};

/// Longest header token accepted before the header is treated as garbage
const MAX_TOKEN_LEN: usize = 20;

pub(crate) struct HeaderTokenizer<R: BufRead> {
    reader: R,
}

impl<R: BufRead> HeaderTokenizer<R> {
    pub(crate) fn new(reader: R) -> Self {
        HeaderTokenizer { reader }
    }

    /// Reads the next token, or `None` at end of stream
    pub(crate) fn next_token(&mut self) -> IndexResult<Option<String>> {
        let first = loop {
            match self.next_byte()? {
                None => return Ok(None),
                Some(b'#') => self.skip_comment()?,
                Some(b) if b.is_ascii_whitespace() => continue,
                Some(b) => break b,
            }
        };

        let mut token = vec![first];
        while let Some(b) = self.next_byte()? {
            if b.is_ascii_whitespace() {
                break;
            }
            if token.len() >= MAX_TOKEN_LEN {
                return Err(IndexError::GenericError(format!(
                    "Raster header token exceeds {} bytes",
                    MAX_TOKEN_LEN
                )));
            }
            token.push(b);
        }

        Ok(Some(String::from_utf8_lossy(&token).into_owned()))
    }

    /// Gives back the reader, positioned after the last token read
    pub(crate) fn into_inner(self) -> R {
        self.reader
    }

    fn skip_comment(&mut self) -> IndexResult<()> {
        while let Some(b) = self.next_byte()? {
            if b == b'\n' || b == b'\r' {
                break;
            }
        }
        Ok(())
    }

    fn next_byte(&mut self) -> IndexResult<Option<u8>> {
        let byte = loop {
            match self.reader.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(IndexError::IoError(e)),
            }
        };
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }
}
