//! Character sources consumed by scanners.
//!
//! A [`Stream`] hands out one `char` at a time and accepts back the last
//! character it produced, which is all the lookahead scanners need.

use crate::error::{ErrorKind, Result, ScanError};

/// A source of input characters.
pub trait Stream {
    /// Reads the next character, failing with [`ErrorKind::EndOfStream`]
    /// once the input is exhausted.
    fn read_char(&mut self) -> Result<char>;

    /// Returns `ch`, the character most recently read, to the stream.
    fn putback(&mut self, ch: char) -> Result<()>;
}

impl<S: Stream + ?Sized> Stream for &mut S {
    #[inline]
    fn read_char(&mut self) -> Result<char> {
        (**self).read_char()
    }

    #[inline]
    fn putback(&mut self, ch: char) -> Result<()> {
        (**self).putback(ch)
    }
}

/// A [`Stream`] over a borrowed UTF-8 byte slice.
///
/// ```rust
/// use fmtscan::{SliceStream, Stream};
///
/// let mut s = SliceStream::new("hé");
/// assert_eq!(s.read_char().unwrap(), 'h');
/// assert_eq!(s.read_char().unwrap(), 'é');
/// assert!(s.read_char().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SliceStream<'src> {
    bytes: &'src [u8],
    pos: usize,
    chars_read: usize,
}

impl<'src> SliceStream<'src> {
    pub fn new(src: &'src str) -> Self {
        Self::from_bytes(src.as_bytes())
    }

    /// Wraps raw bytes; invalid UTF-8 is reported lazily as
    /// [`ErrorKind::InvalidEncoding`] when reached.
    pub fn from_bytes(bytes: &'src [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            chars_read: 0,
        }
    }

    /// Unread input.
    #[must_use]
    pub fn rest(&self) -> &'src [u8] {
        &self.bytes[self.pos..]
    }

    /// Net number of characters consumed so far.
    #[must_use]
    pub fn chars_read(&self) -> usize {
        self.chars_read
    }
}

impl Stream for SliceStream<'_> {
    fn read_char(&mut self) -> Result<char> {
        let rest = self.rest();
        if rest.is_empty() {
            return Err(ScanError::new(ErrorKind::EndOfStream, "no more input"));
        }
        match bstr::decode_utf8(rest) {
            (Some(ch), len) => {
                self.pos += len;
                self.chars_read += 1;
                Ok(ch)
            }
            (None, _) => Err(ScanError::new(
                ErrorKind::InvalidEncoding,
                "invalid UTF-8 sequence in input",
            )),
        }
    }

    fn putback(&mut self, ch: char) -> Result<()> {
        let len = ch.len_utf8();
        let Some(start) = self.pos.checked_sub(len) else {
            return Err(ScanError::new(
                ErrorKind::InvalidOperation,
                "putback past the start of the stream",
            ));
        };
        let mut buf = [0u8; 4];
        if &self.bytes[start..self.pos] != ch.encode_utf8(&mut buf).as_bytes() {
            return Err(ScanError::new(
                ErrorKind::InvalidOperation,
                "putback of a character that was not read",
            ));
        }
        self.pos = start;
        self.chars_read -= 1;
        Ok(())
    }
}
