use std::convert::Infallible;

/// An object that provides bytes to the tokenizer.
///
/// See [`crate::Tokenizer::new`] for more information.
pub trait Reader {
    /// The error returned by this reader.
    ///
    /// When a reader fails, the tokenizer yields the error and stops. The
    /// [`crate::Validator`] treats that the same way as the end of input.
    type Error: std::error::Error;

    /// Return a new byte from the input stream.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Attempt to read an entire string at once, either case-insensitively or not.
    ///
    /// `case_sensitive=false` means that bytes of the input stream should be compared while
    /// ignoring ASCII-casing.
    ///
    /// If the next bytes equal to `s`, this function consumes them from the input stream and
    /// returns `true`. If not, it does nothing and returns `false`.
    fn try_read_string(&mut self, s: &[u8], case_sensitive: bool) -> Result<bool, Self::Error>;

    /// Read an arbitrary amount of bytes up until and including the next byte that matches an
    /// array entry in `needle`.
    ///
    /// Return either:
    ///
    /// 1. A chunk of consumed bytes that does not contain any bytes from `needle`. The chunk can
    ///    be arbitrarily large or small.
    /// 2. If the next byte is included in `needle`, a slice with just that byte and nothing else.
    ///
    /// `None` signals the end of input.
    ///
    /// The default implementation simply reads one byte, ignoring the needle entirely. Readers
    /// that hold their input in memory should override it.
    ///
    /// # Example
    ///
    /// Here is how [`StringReader`] behaves:
    ///
    /// ```rust
    /// use htmlcheck::{Reader, Readable};
    ///
    /// let mut reader = "hello world".to_reader();
    /// let mut chunks = Vec::new();
    /// let mut char_buf = [0; 4];
    /// while let Some(xs) = reader.read_until(&[b' ', b'r'], &mut char_buf).unwrap() {
    ///     chunks.push(std::str::from_utf8(xs).unwrap().to_owned());
    /// }
    ///
    /// assert_eq!(chunks, &["hello", " ", "wo", "r", "ld"]);
    /// ```
    fn read_until<'b>(
        &'b mut self,
        needle: &[u8],
        char_buf: &'b mut [u8; 4],
    ) -> Result<Option<&'b [u8]>, Self::Error> {
        let _needle = needle;

        match self.read_byte()? {
            Some(x) => {
                char_buf[0] = x;
                Ok(Some(&char_buf[..1]))
            }
            None => Ok(None),
        }
    }
}

/// An object that can be converted into a [`crate::Reader`].
///
/// For example, any string can be converted into a `StringReader`, such that
/// `Tokenizer::new("mystring")` and `Tokenizer::new(&String::from("foo"))` work.
pub trait Readable<'a> {
    /// The reader type to which this type should be converted.
    type Reader: Reader + 'a;

    /// Convert self to some sort of reader.
    fn to_reader(self) -> Self::Reader;
}

impl<'a, R: 'a + Reader> Readable<'a> for R {
    type Reader = Self;

    fn to_reader(self) -> Self::Reader {
        self
    }
}

/// Reads HTML from an in-memory buffer. Never fails.
///
/// ```rust
/// use htmlcheck::{Token, Tokenizer};
///
/// let html = "<title   >hello world</title>";
/// let tokens: Vec<_> = Tokenizer::new(html).infallible().collect();
///
/// assert!(matches!(&tokens[0], Token::StartTag(tag) if tag.name == b"title"));
/// assert!(matches!(&tokens[1], Token::String(s) if s.value == b"hello world"));
/// assert!(matches!(&tokens[2], Token::EndTag(tag) if tag.name == b"title"));
/// ```
#[derive(Debug)]
pub struct StringReader<'a> {
    input: &'a [u8],
}

impl<'a> StringReader<'a> {
    fn new(input: &'a [u8]) -> Self {
        StringReader { input }
    }
}

impl<'a> Reader for StringReader<'a> {
    type Error = Infallible;

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        match self.input.split_first() {
            Some((&rv, rest)) => {
                self.input = rest;
                Ok(Some(rv))
            }
            None => Ok(None),
        }
    }

    fn read_until<'b>(
        &'b mut self,
        needle: &[u8],
        _: &'b mut [u8; 4],
    ) -> Result<Option<&'b [u8]>, Self::Error> {
        if self.input.is_empty() {
            return Ok(None);
        }

        let split_at = match fast_find(needle, self.input) {
            Some(0) => 1,
            Some(needle_pos) => needle_pos,
            None => self.input.len(),
        };
        let (rv, new_input) = self.input.split_at(split_at);
        self.input = new_input;
        Ok(Some(rv))
    }

    fn try_read_string(&mut self, s1: &[u8], case_sensitive: bool) -> Result<bool, Self::Error> {
        if let Some(s2) = self.input.get(..s1.len()) {
            if s1 == s2 || (!case_sensitive && s1.eq_ignore_ascii_case(s2)) {
                self.input = &self.input[s1.len()..];
                return Ok(true);
            }
        }

        Ok(false)
    }
}

impl<'a> Readable<'a> for &'a str {
    type Reader = StringReader<'a>;

    fn to_reader(self) -> Self::Reader {
        StringReader::new(self.as_bytes())
    }
}

impl<'a> Readable<'a> for &'a String {
    type Reader = StringReader<'a>;

    fn to_reader(self) -> Self::Reader {
        StringReader::new(self.as_bytes())
    }
}

impl<'a> Readable<'a> for &'a Vec<u8> {
    type Reader = StringReader<'a>;

    fn to_reader(self) -> Self::Reader {
        StringReader::new(self.as_slice())
    }
}

impl<'a> Readable<'a> for &'a [u8] {
    type Reader = StringReader<'a>;

    fn to_reader(self) -> Self::Reader {
        StringReader::new(self)
    }
}

#[inline]
fn fast_find(needle: &[u8], haystack: &[u8]) -> Option<usize> {
    #[cfg(feature = "memchr")]
    match *needle {
        [a] => return memchr::memchr(a, haystack),
        [a, b] => return memchr::memchr2(a, b, haystack),
        [a, b, c] => return memchr::memchr3(a, b, c, haystack),
        _ => (),
    }

    haystack.iter().position(|b| needle.contains(b))
}
