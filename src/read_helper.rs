use crate::Reader;

/// Wraps a [`Reader`] to allow reconsuming bytes and to track the byte offset of the input.
#[derive(Debug)]
pub(crate) struct ReadHelper<R: Reader> {
    reader: R,
    to_reconsume: Stack2<Option<u8>>,
    position: usize,
}

impl<R: Reader> ReadHelper<R> {
    pub(crate) fn new(reader: R) -> Self {
        ReadHelper {
            reader,
            to_reconsume: Default::default(),
            position: 0,
        }
    }

    /// Byte offset of the next byte to be read.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub(crate) fn read_byte(&mut self) -> Result<Option<u8>, R::Error> {
        let c = match self.to_reconsume.pop() {
            Some(c) => c,
            None => self.reader.read_byte()?,
        };

        if c.is_some() {
            self.position += 1;
        }

        Ok(c)
    }

    #[inline]
    pub(crate) fn try_read_string(
        &mut self,
        mut s: &[u8],
        case_sensitive: bool,
    ) -> Result<bool, R::Error> {
        debug_assert!(!s.is_empty());

        let to_reconsume_bak = self.to_reconsume;
        let mut consumed_from_stack = 0;
        while !s.is_empty() {
            let Some(c) = self.to_reconsume.pop() else {
                break;
            };
            if let (Some(x), Some(&x2)) = (c, s.first()) {
                if x == x2 || (!case_sensitive && x.eq_ignore_ascii_case(&x2)) {
                    s = &s[1..];
                    consumed_from_stack += 1;
                    continue;
                }
            }

            self.to_reconsume = to_reconsume_bak;
            return Ok(false);
        }

        if s.is_empty() || self.reader.try_read_string(s, case_sensitive)? {
            self.position += consumed_from_stack + s.len();
            Ok(true)
        } else {
            self.to_reconsume = to_reconsume_bak;
            Ok(false)
        }
    }

    /// Read a chunk of bytes, see [`Reader::read_until`]. The callback receives the chunk together
    /// with the byte offset it starts at.
    #[inline]
    pub(crate) fn read_until<V>(
        &mut self,
        needle: &[u8],
        read_cb: impl FnOnce(Option<&[u8]>, usize) -> V,
    ) -> Result<V, R::Error> {
        let start = self.position;
        match self.to_reconsume.pop() {
            Some(Some(x)) => {
                self.position += 1;
                Ok(read_cb(Some(&[x]), start))
            }
            Some(None) => Ok(read_cb(None, start)),
            None => {
                let mut char_buf = [0; 4];
                let xs = self.reader.read_until(needle, &mut char_buf)?;
                if let Some(xs) = xs {
                    self.position += xs.len();
                }
                Ok(read_cb(xs, start))
            }
        }
    }

    #[inline]
    pub(crate) fn unread_byte(&mut self, c: Option<u8>) {
        if c.is_some() {
            self.position -= 1;
        }
        self.to_reconsume.push(c);
    }
}

// this is a stack that can hold 0 to 2 Ts
#[derive(Debug, Default, Clone, Copy)]
struct Stack2<T: Copy>(Option<(T, Option<T>)>);

impl<T: Copy> Stack2<T> {
    #[inline]
    fn push(&mut self, c: T) {
        self.0 = match self.0 {
            None => Some((c, None)),
            Some((c1, None)) => Some((c1, Some(c))),
            Some((_c1, Some(_c2))) => panic!("stack full!"),
        }
    }

    #[inline]
    fn pop(&mut self) -> Option<T> {
        let (new_self, rv) = match self.0 {
            Some((c1, Some(c2))) => (Some((c1, None)), Some(c2)),
            Some((c1, None)) => (None, Some(c1)),
            None => (None, None),
        };
        self.0 = new_self;
        rv
    }
}
