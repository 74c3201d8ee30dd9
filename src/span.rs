/// Position/ boundary `start..end` in the input.
///
/// Both bounds are byte offsets into the original input, which is what the
/// [`Tokenizer`](crate::Tokenizer) tracks and what [`resolve_positions`](crate::resolve_positions)
/// expects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// Start position (inclusive) of the span.
    pub start: usize,
    /// End position (exclusive) of the span.
    pub end: usize,
}

impl Span {
    /// Construct a span from its bounds.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// An empty span at a given position.
    #[must_use]
    pub fn empty_at(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    /// A span starting at `start` that covers `len` bytes.
    #[must_use]
    pub fn with_len(start: usize, len: usize) -> Self {
        Span {
            start,
            end: start.saturating_add(len),
        }
    }

    /// Number of bytes covered by this span.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no input at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// A value together with its [`Span`].
///
/// This type implements [`Deref`](std::ops::Deref) and [`DerefMut`](std::ops::DerefMut),
/// allowing you to access the inner value directly without using `.value`:
///
/// ```
/// # use htmlcheck::Spanned;
/// let spanned: Spanned<String> = "hello".to_string().into();
/// assert_eq!(spanned.len(), 5);  // calls String::len() via Deref
/// assert_eq!(&*spanned, "hello"); // dereference to get &String
/// ```
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> From<T> for Spanned<T> {
    fn from(value: T) -> Self {
        Self {
            value,
            span: Span::default(),
        }
    }
}

impl<T> std::ops::Deref for Spanned<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T> std::ops::DerefMut for Spanned<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.value
    }
}
