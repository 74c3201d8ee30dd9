use std::borrow::{Borrow, Cow};
use std::fmt::{Debug, Formatter};
use std::ops::{Deref, DerefMut};

/// A wrapper around a bytestring.
///
/// Tag names, attribute names and text are kept as raw bytes, since the input does not have to be
/// valid UTF-8. This newtype mostly exists to provide a nicer `Debug` impl.
#[derive(Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HtmlString(pub Vec<u8>);

impl HtmlString {
    /// Decode the bytestring as UTF-8, replacing invalid sequences with `U+FFFD`.
    #[must_use]
    pub fn as_lossy_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Like [`HtmlString::as_lossy_str`], but always allocates.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        self.as_lossy_str().into_owned()
    }
}

impl Deref for HtmlString {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for HtmlString {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Debug for HtmlString {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "b\"")?;
        for &byte in &self.0 {
            for ch in std::ascii::escape_default(byte) {
                write!(f, "{}", ch as char)?;
            }
        }

        write!(f, "\"")
    }
}

impl Borrow<[u8]> for HtmlString {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for HtmlString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for HtmlString {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.0 == *other
    }
}

impl PartialEq<&[u8]> for HtmlString {
    fn eq(&self, other: &&[u8]) -> bool {
        self.0 == *other
    }
}

impl PartialEq<&str> for HtmlString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl From<Vec<u8>> for HtmlString {
    fn from(vec: Vec<u8>) -> HtmlString {
        HtmlString(vec)
    }
}

impl From<&[u8]> for HtmlString {
    fn from(bytes: &[u8]) -> HtmlString {
        HtmlString(bytes.to_vec())
    }
}

impl From<&str> for HtmlString {
    fn from(s: &str) -> HtmlString {
        HtmlString(s.as_bytes().to_vec())
    }
}

impl From<HtmlString> for Vec<u8> {
    fn from(other: HtmlString) -> Vec<u8> {
        other.0
    }
}

#[test]
fn test_eq_html_str_and_byte_literal() {
    assert!(HtmlString(b"hello world".to_vec()) == b"hello world");
}

#[test]
fn test_eq_html_str_and_str() {
    assert!(HtmlString::from("hello world") == "hello world");
}

#[test]
fn test_debug_escapes_bytes() {
    let s = HtmlString(b"a\"\xff".to_vec());
    assert_eq!(format!("{:?}", s), r#"b"a\"\xff""#);
}

#[test]
fn test_lossy_decoding() {
    let s = HtmlString(b"caf\xc3\xa9 \xff".to_vec());
    assert_eq!(s.as_lossy_str(), "caf\u{e9} \u{fffd}");
}
