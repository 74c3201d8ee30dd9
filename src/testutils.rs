//! Module of helper functions for integration tests.
//!
//! Those tests should only test public API surface in general, with some exceptions as provided by
//! this module.
use crate::Reader;
use std::cell::Cell;

thread_local! {
    /// Buffer of all debugging output logged internally by htmlcheck.
    pub static OUTPUT: Cell<String> = Cell::default();
}

/// Simple debug logger for tests.
///
/// The test harness used by `tests/fixtures.rs` cannot capture stdout, see [libtest-mimic
/// issue #9](https://github.com/LukasKalbertodt/libtest-mimic/issues/9) -- this is much more
/// performant than println anyway though.
///
/// Calls are compiled out of release builds by the internal `trace_log!` macro.
pub fn trace_log(msg: &str) {
    OUTPUT.with(|cell| {
        let mut buf = cell.take();
        buf.push_str(msg);
        buf.push('\n');

        if buf.len() > 20 * 1024 * 1024 {
            buf.clear();
            buf.push_str("[truncated output]\n");
        }

        cell.set(buf);
    });
}

/// Take everything logged so far on this thread, leaving the buffer empty.
pub fn take_output() -> String {
    OUTPUT.with(Cell::take)
}

/// A kind of reader that implements `read_until` very poorly. Only useful in tests, to make sure
/// the tokenizer does not depend on chunk boundaries.
#[derive(Debug)]
pub struct SlowReader<R: Reader>(pub R);

impl<R: Reader> Reader for SlowReader<R> {
    type Error = R::Error;

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        self.0.read_byte()
    }

    fn try_read_string(&mut self, s: &[u8], case_sensitive: bool) -> Result<bool, Self::Error> {
        self.0.try_read_string(s, case_sensitive)
    }
}

/// A reader that fails with an I/O error after yielding `limit` bytes of `input`.
#[derive(Debug)]
pub struct FailingReader<'a> {
    /// Bytes still to be returned.
    pub input: &'a [u8],
    /// How many bytes may be read before failing.
    pub limit: usize,
}

impl Reader for FailingReader<'_> {
    type Error = std::io::Error;

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if self.limit == 0 {
            return Err(std::io::Error::other("reader failed"));
        }
        self.limit -= 1;
        match self.input.split_first() {
            Some((&x, rest)) => {
                self.input = rest;
                Ok(Some(x))
            }
            None => Ok(None),
        }
    }

    fn try_read_string(&mut self, s: &[u8], case_sensitive: bool) -> Result<bool, Self::Error> {
        if s.len() > self.limit {
            return Err(std::io::Error::other("reader failed"));
        }
        match self.input.get(..s.len()) {
            Some(s2) if s == s2 || (!case_sensitive && s.eq_ignore_ascii_case(s2)) => {
                self.input = &self.input[s.len()..];
                self.limit -= s.len();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
