use std::convert::Infallible;

use crate::emitter::TokenEmitter;
use crate::machine;
use crate::read_helper::ReadHelper;
use crate::utils::{trace_log, ControlToken, State};
use crate::{Readable, Reader, Token};

/// A HTML tokenizer. See crate-level docs for basic usage.
///
/// This is the token source the [`crate::Validator`] drives. It yields start tags, end tags, text,
/// comments and doctypes, each with the byte [`crate::Span`] it was read from. Malformed markup
/// never produces an error, it is read the way browsers read it. Only a failing [`Reader`] makes
/// the iterator yield `Err`, after which it ends.
#[derive(Debug)]
pub struct Tokenizer<R: Reader> {
    eof: bool,
    pub(crate) emitter: TokenEmitter,
    pub(crate) reader: ReadHelper<R>,
    pub(crate) state: State,
    /// Offset of the `<` that opened the tag or comment being read.
    pub(crate) tag_open_pos: usize,
    /// Raw name of a candidate end tag inside a raw text element.
    pub(crate) temporary_buffer: Vec<u8>,
}

impl<R: Reader> Tokenizer<R> {
    /// Create a new tokenizer from some input.
    ///
    /// `input` can be `&String`, `&str`, `&[u8]` or `&Vec<u8>` at the moment, as those are the
    /// types for which [`crate::Readable`] is implemented, but you can implement that trait on
    /// your own types.
    pub fn new<'a, S: Readable<'a, Reader = R>>(input: S) -> Self {
        Tokenizer {
            eof: false,
            emitter: TokenEmitter::default(),
            reader: ReadHelper::new(input.to_reader()),
            state: State::Data,
            tag_open_pos: 0,
            temporary_buffer: Vec::new(),
        }
    }

    pub(crate) fn switch_to(&mut self, state: State) {
        trace_log!("switch_to: {:?} -> {:?}", self.state, state);
        self.state = state;
    }
}

impl<R: Reader> Iterator for Tokenizer<R> {
    type Item = Result<Token, R::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.emitter.pop_token() {
                break Some(Ok(token));
            } else if !self.eof {
                match machine::consume(self) {
                    Ok(ControlToken::Continue) => (),
                    Ok(ControlToken::Eof) => {
                        self.eof = true;
                        self.emitter.emit_eof();
                    }
                    Err(e) => {
                        self.eof = true;
                        break Some(Err(e));
                    }
                }
            } else {
                break None;
            }
        }
    }
}

/// A kind of tokenizer that directly yields tokens when used as an iterator, so `Token` instead of
/// `Result<Token, _>`.
///
/// This is the return value of [`Tokenizer::infallible`].
#[derive(Debug)]
pub struct InfallibleTokenizer<R: Reader<Error = Infallible>>(Tokenizer<R>);

impl<R: Reader<Error = Infallible>> Tokenizer<R> {
    /// Statically assert that this iterator is infallible.
    ///
    /// Call this to get rid of error handling when parsing HTML from strings.
    pub fn infallible(self) -> InfallibleTokenizer<R> {
        InfallibleTokenizer(self)
    }
}

impl<R: Reader<Error = Infallible>> Iterator for InfallibleTokenizer<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        match self.0.next()? {
            Ok(token) => Some(token),
            Err(e) => match e {},
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testutils::{FailingReader, SlowReader};
    use crate::{Attribute, Doctype, EndTag, HtmlString, Span, Spanned, StartTag};

    fn tokenize(input: &str) -> Vec<Token> {
        let tokens: Vec<_> = Tokenizer::new(input).infallible().collect();
        let slow_tokens: Vec<_> = Tokenizer::new(SlowReader(input.to_reader()))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(tokens, slow_tokens, "chunking must not change the tokens");
        tokens
    }

    fn text(value: &str, start: usize) -> Token {
        Token::String(Spanned {
            value: value.into(),
            span: Span::with_len(start, value.len()),
        })
    }

    #[test]
    fn start_and_end_tags() {
        assert_eq!(
            tokenize("<b>hi</b>"),
            vec![
                Token::StartTag(StartTag {
                    self_closing: false,
                    name: "b".into(),
                    name_span: Span::new(1, 2),
                    attributes: vec![],
                    span: Span::new(0, 3),
                }),
                text("hi", 3),
                Token::EndTag(EndTag {
                    name: "b".into(),
                    name_span: Span::new(7, 8),
                    span: Span::new(5, 9),
                }),
            ]
        );
    }

    #[test]
    fn attributes_keep_order_duplicates_and_spans() {
        let tokens = tokenize(r#"<A HREF='x' href="yz" Checked data-v=1>"#);
        let Token::StartTag(tag) = &tokens[0] else {
            panic!("expected start tag, got {:?}", tokens);
        };
        assert_eq!(tag.name, "a");
        assert_eq!(
            tag.attributes,
            vec![
                Attribute {
                    name: "href".into(),
                    name_span: Span::new(3, 7),
                    value: "x".into(),
                    value_span: Span::new(9, 10),
                },
                Attribute {
                    name: "href".into(),
                    name_span: Span::new(12, 16),
                    value: "yz".into(),
                    value_span: Span::new(18, 20),
                },
                Attribute {
                    name: "checked".into(),
                    name_span: Span::new(22, 29),
                    value: HtmlString::default(),
                    value_span: Span::default(),
                },
                Attribute {
                    name: "data-v".into(),
                    name_span: Span::new(30, 36),
                    value: "1".into(),
                    value_span: Span::new(37, 38),
                },
            ]
        );
        assert_eq!(tag.span, Span::new(0, 39));
    }

    #[test]
    fn self_closing_syntax() {
        let tokens = tokenize("<br/><img src=x />");
        assert!(matches!(&tokens[0], Token::StartTag(tag) if tag.self_closing && tag.name == "br"));
        assert!(matches!(&tokens[1], Token::StartTag(tag) if tag.self_closing && tag.name == "img"));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn comments_and_doctype() {
        assert_eq!(
            tokenize("<!DOCTYPE html><!-- a --- b --><!---->x<?php ?>"),
            vec![
                Token::Doctype(Doctype {
                    name: "html".into(),
                    span: Span::new(0, 15),
                }),
                Token::Comment(Spanned {
                    value: " a --- b ".into(),
                    span: Span::new(15, 31),
                }),
                Token::Comment(Spanned {
                    value: "".into(),
                    span: Span::new(31, 38),
                }),
                text("x", 38),
                Token::Comment(Spanned {
                    value: "?php ?".into(),
                    span: Span::new(39, 47),
                }),
            ]
        );
    }

    #[test]
    fn raw_text_elements_hide_markup() {
        let tokens = tokenize("<style>a < b { } </b></STYLE><b>");
        assert_eq!(tokens.len(), 4, "{:?}", tokens);
        assert_eq!(tokens[1], text("a < b { } </b>", 7));
        assert!(matches!(&tokens[2], Token::EndTag(tag) if tag.name == "style"));
        assert!(matches!(&tokens[3], Token::StartTag(tag) if tag.name == "b"));
    }

    #[test]
    fn stray_angle_brackets_are_text() {
        assert_eq!(tokenize("a < b"), vec![text("a < b", 0)]);
        assert_eq!(tokenize("</>"), vec![]);
        assert_eq!(tokenize("a</>b"), vec![text("a", 0), text("b", 4)]);
    }

    #[test]
    fn unfinished_tag_at_eof_is_dropped() {
        assert_eq!(tokenize("hi<b class='x"), vec![text("hi", 0)]);
    }

    #[test]
    fn reader_errors_end_the_stream() {
        let mut tokenizer = Tokenizer::new(FailingReader {
            input: b"<b></b>",
            limit: 4,
        });
        assert!(matches!(tokenizer.next(), Some(Ok(Token::StartTag(_)))));
        assert!(matches!(tokenizer.next(), Some(Err(_))));
        assert!(tokenizer.next().is_none());
    }
}
