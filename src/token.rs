use crate::{HtmlString, Span, Spanned};

/// A HTML start tag, such as `<p>` or `<a href=foo>`.
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct StartTag {
    /// Whether this tag is self-closing. If it is self-closing, no following [`EndTag`] should be
    /// expected.
    pub self_closing: bool,

    /// The start tag's name, such as `"p"` or `"a"`. ASCII-lowercased by the tokenizer.
    pub name: HtmlString,

    /// Where the name sits in the input, for `<p>` that is the `p`.
    pub name_span: Span,

    /// The attributes in the order they were written. Unlike most HTML tokenizers this keeps
    /// duplicated attributes, so that they can be reported.
    pub attributes: Vec<Attribute>,

    /// The source code span of the whole tag, from `<` to `>`.
    pub span: Span,
}

impl StartTag {
    /// Look up the first attribute with a given name.
    #[must_use]
    pub fn attribute(&self, name: &[u8]) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| *attr.name == name)
    }
}

/// One attribute of a [`StartTag`].
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct Attribute {
    /// The attribute name, ASCII-lowercased by the tokenizer.
    pub name: HtmlString,
    /// Where the name sits in the input.
    pub name_span: Span,
    /// The raw attribute value without quotes. Empty for attributes written without a value.
    pub value: HtmlString,
    /// Where the value sits in the input. Empty if there was no value.
    pub value_span: Span,
}

/// A HTML end/close tag, such as `</p>` or `</a>`.
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct EndTag {
    /// The ending tag's name, such as `"p"` or `"a"`.
    pub name: HtmlString,

    /// Where the name sits in the input.
    pub name_span: Span,

    /// The source code span of the whole tag.
    pub span: Span,
}

/// A doctype. Some examples:
///
/// * `<!DOCTYPE html>`
/// * `<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN">`
///
/// Only the name is kept, identifiers are skipped.
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct Doctype {
    /// The doctype's name. For HTML documents this is "html".
    pub name: HtmlString,

    /// The source code span of the doctype.
    pub span: Span,
}

/// The token type used by the [`crate::Tokenizer`] and consumed by the [`crate::Validator`].
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Token {
    /// A start tag. `<p/>` is a start tag with [`StartTag::self_closing`] set.
    StartTag(StartTag),
    /// An end tag.
    EndTag(EndTag),
    /// A literal string between tags.
    String(Spanned<HtmlString>),
    /// A comment, or something the tokenizer treats as one (`<?xml ...>`, `<![CDATA[...]]>`).
    Comment(Spanned<HtmlString>),
    /// A doctype.
    Doctype(Doctype),
}

impl Token {
    /// The source code span of this token.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Token::StartTag(tag) => tag.span,
            Token::EndTag(tag) => tag.span,
            Token::String(s) | Token::Comment(s) => s.span,
            Token::Doctype(doctype) => doctype.span,
        }
    }
}
