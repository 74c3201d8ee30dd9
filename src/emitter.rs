use std::collections::VecDeque;
use std::mem::take;

use crate::utils::{trace_log, with_lowercase_str, State, RAW_TEXT_ELEMENTS};
use crate::{Attribute, Doctype, EndTag, HtmlString, Span, Spanned, StartTag, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurrentTag {
    Start,
    End,
}

/// Assembles [`Token`]s from the calls the state machine makes while reading input.
///
/// Every method that starts a token takes the byte offset of the `<` that opened it, and every
/// method that finishes one takes the offset right after its last byte.
#[derive(Debug, Default)]
pub(crate) struct TokenEmitter {
    emitted_tokens: VecDeque<Token>,

    current_characters: Vec<u8>,
    current_characters_start: usize,

    current_tag_type: Option<CurrentTag>,
    current_tag_name: Vec<u8>,
    current_tag_self_closing: bool,
    current_tag_start: usize,
    current_attributes: Vec<Attribute>,
    current_attribute: Option<Attribute>,
    last_start_tag: Vec<u8>,

    current_comment: Vec<u8>,
    current_comment_start: usize,

    doctype_name: Vec<u8>,
    doctype_start: usize,
}

impl TokenEmitter {
    pub(crate) fn pop_token(&mut self) -> Option<Token> {
        self.emitted_tokens.pop_front()
    }

    pub(crate) fn emit_eof(&mut self) {
        self.flush_current_characters();
    }

    pub(crate) fn emit_string(&mut self, s: &[u8], pos: usize) {
        if self.current_characters.is_empty() {
            self.current_characters_start = pos;
        }
        self.current_characters.extend(s);
    }

    pub(crate) fn flush_current_characters(&mut self) {
        if self.current_characters.is_empty() {
            return;
        }

        let value = HtmlString(take(&mut self.current_characters));
        let span = Span::with_len(self.current_characters_start, value.len());
        self.emitted_tokens
            .push_back(Token::String(Spanned { value, span }));
    }

    pub(crate) fn init_start_tag(&mut self, lt_pos: usize) {
        self.init_tag(CurrentTag::Start, lt_pos);
    }

    pub(crate) fn init_end_tag(&mut self, lt_pos: usize) {
        self.init_tag(CurrentTag::End, lt_pos);
    }

    fn init_tag(&mut self, tag_type: CurrentTag, lt_pos: usize) {
        self.flush_current_characters();
        self.current_tag_type = Some(tag_type);
        self.current_tag_name.clear();
        self.current_tag_self_closing = false;
        self.current_tag_start = lt_pos;
        self.current_attributes.clear();
        self.current_attribute = None;
    }

    pub(crate) fn push_tag_name(&mut self, s: &[u8]) {
        with_lowercase_str(s, |s| self.current_tag_name.extend(s));
    }

    pub(crate) fn set_self_closing(&mut self) {
        if self.current_tag_type == Some(CurrentTag::Start) {
            self.current_tag_self_closing = true;
        }
    }

    pub(crate) fn init_attribute(&mut self, pos: usize) {
        self.flush_attribute();
        self.current_attribute = Some(Attribute {
            name_span: Span::empty_at(pos),
            ..Attribute::default()
        });
    }

    pub(crate) fn push_attribute_name(&mut self, s: &[u8]) {
        if let Some(attr) = &mut self.current_attribute {
            with_lowercase_str(s, |s| attr.name.extend(s));
            attr.name_span.end += s.len();
        }
    }

    pub(crate) fn push_attribute_value(&mut self, s: &[u8], pos: usize) {
        if let Some(attr) = &mut self.current_attribute {
            if attr.value.is_empty() {
                attr.value_span = Span::empty_at(pos);
            }
            attr.value.extend(s);
            attr.value_span.end = pos + s.len();
        }
    }

    fn flush_attribute(&mut self) {
        // end tags may carry attributes, they are read but not kept
        if let Some(attr) = self.current_attribute.take() {
            if self.current_tag_type == Some(CurrentTag::Start) {
                self.current_attributes.push(attr);
            }
        }
    }

    /// Finish the current tag. Returns the state the tokenizer has to continue in if the tag
    /// opened a raw text element.
    pub(crate) fn emit_current_tag(&mut self, end: usize) -> Option<State> {
        self.flush_attribute();
        let span = Span::new(self.current_tag_start, end);
        let name = HtmlString(take(&mut self.current_tag_name));
        match self.current_tag_type.take() {
            Some(CurrentTag::Start) => {
                let name_span = Span::with_len(self.current_tag_start + 1, name.len());
                let self_closing = self.current_tag_self_closing;
                let next_state = if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_slice()) {
                    self.last_start_tag.clone_from(&name);
                    Some(State::RawText)
                } else {
                    None
                };
                trace_log!("emit start tag {:?}, self_closing={}", name, self_closing);
                self.emitted_tokens.push_back(Token::StartTag(StartTag {
                    self_closing,
                    name,
                    name_span,
                    attributes: take(&mut self.current_attributes),
                    span,
                }));
                next_state
            }
            Some(CurrentTag::End) => {
                let name_span = Span::with_len(self.current_tag_start + 2, name.len());
                trace_log!("emit end tag {:?}", name);
                self.last_start_tag.clear();
                self.current_attributes.clear();
                self.emitted_tokens.push_back(Token::EndTag(EndTag {
                    name,
                    name_span,
                    span,
                }));
                None
            }
            None => None,
        }
    }

    /// Whether an end tag named `name` closes the raw text element we are in.
    pub(crate) fn is_appropriate_end_tag(&self, name: &[u8]) -> bool {
        !self.last_start_tag.is_empty() && self.last_start_tag.eq_ignore_ascii_case(name)
    }

    pub(crate) fn init_comment(&mut self, lt_pos: usize) {
        self.flush_current_characters();
        self.current_comment.clear();
        self.current_comment_start = lt_pos;
    }

    pub(crate) fn push_comment(&mut self, s: &[u8]) {
        self.current_comment.extend(s);
    }

    pub(crate) fn emit_current_comment(&mut self, end: usize) {
        let value = HtmlString(take(&mut self.current_comment));
        self.emitted_tokens.push_back(Token::Comment(Spanned {
            value,
            span: Span::new(self.current_comment_start, end),
        }));
    }

    pub(crate) fn init_doctype(&mut self, lt_pos: usize) {
        self.flush_current_characters();
        self.doctype_name.clear();
        self.doctype_start = lt_pos;
    }

    pub(crate) fn push_doctype_name(&mut self, s: &[u8]) {
        with_lowercase_str(s, |s| self.doctype_name.extend(s));
    }

    pub(crate) fn emit_current_doctype(&mut self, end: usize) {
        self.emitted_tokens.push_back(Token::Doctype(Doctype {
            name: HtmlString(take(&mut self.doctype_name)),
            span: Span::new(self.doctype_start, end),
        }));
    }
}
