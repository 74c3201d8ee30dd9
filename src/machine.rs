use crate::utils::{whitespace_pat, ControlToken, State};
use crate::{Reader, Tokenizer};

// Note: This is not implemented as a method on Tokenizer because the closures passed to
// `read_until` need to borrow the emitter and the reader at the same time.
#[inline]
pub(crate) fn consume<R: Reader>(slf: &mut Tokenizer<R>) -> Result<ControlToken, R::Error> {
    macro_rules! switch_to {
        ($state:expr) => {{
            slf.switch_to($state);
            cont!()
        }};
    }

    macro_rules! reconsume_in {
        ($c:expr, $state:expr) => {{
            let new_state = $state;
            let c = $c;
            slf.reader.unread_byte(c);
            slf.switch_to(new_state);
            cont!()
        }};
    }

    macro_rules! cont {
        () => {{
            return Ok(ControlToken::Continue);
        }};
    }

    macro_rules! eof {
        () => {{
            return Ok(ControlToken::Eof);
        }};
    }

    macro_rules! read_byte {
        () => {
            slf.reader.read_byte()?
        };
    }

    // offset of the byte that was read last
    macro_rules! last_pos {
        () => {
            slf.reader.position() - 1
        };
    }

    macro_rules! emit_current_tag {
        () => {{
            let end = slf.reader.position();
            let next_state = slf.emitter.emit_current_tag(end).unwrap_or(State::Data);
            switch_to!(next_state)
        }};
    }

    match slf.state {
        State::Data => slf.reader.read_until(b"<", |xs, pos| match xs {
            Some(b"<") => {
                slf.tag_open_pos = pos;
                slf.state = State::TagOpen;
                ControlToken::Continue
            }
            Some(xs) => {
                slf.emitter.emit_string(xs, pos);
                ControlToken::Continue
            }
            None => ControlToken::Eof,
        }),
        State::RawText => slf.reader.read_until(b"<", |xs, pos| match xs {
            Some(b"<") => {
                slf.tag_open_pos = pos;
                slf.state = State::RawTextLessThanSign;
                ControlToken::Continue
            }
            Some(xs) => {
                slf.emitter.emit_string(xs, pos);
                ControlToken::Continue
            }
            None => ControlToken::Eof,
        }),
        State::RawTextLessThanSign => match read_byte!() {
            Some(b'/') => {
                slf.temporary_buffer.clear();
                switch_to!(State::RawTextEndTagOpen)
            }
            c => {
                slf.emitter.emit_string(b"<", slf.tag_open_pos);
                reconsume_in!(c, State::RawText)
            }
        },
        State::RawTextEndTagOpen => match read_byte!() {
            Some(x) if x.is_ascii_alphabetic() => {
                reconsume_in!(Some(x), State::RawTextEndTagName)
            }
            c => {
                slf.emitter.emit_string(b"</", slf.tag_open_pos);
                reconsume_in!(c, State::RawText)
            }
        },
        State::RawTextEndTagName => match read_byte!() {
            Some(x) if x.is_ascii_alphabetic() => {
                slf.temporary_buffer.push(x);
                cont!()
            }
            Some(x @ (whitespace_pat!() | b'/' | b'>'))
                if slf.emitter.is_appropriate_end_tag(&slf.temporary_buffer) =>
            {
                slf.emitter.init_end_tag(slf.tag_open_pos);
                slf.emitter.push_tag_name(&slf.temporary_buffer);
                match x {
                    b'/' => switch_to!(State::SelfClosingStartTag),
                    b'>' => emit_current_tag!(),
                    _ => switch_to!(State::BeforeAttributeName),
                }
            }
            c => {
                slf.emitter.emit_string(b"</", slf.tag_open_pos);
                slf.emitter
                    .emit_string(&slf.temporary_buffer, slf.tag_open_pos + 2);
                reconsume_in!(c, State::RawText)
            }
        },
        State::TagOpen => match read_byte!() {
            Some(b'!') => switch_to!(State::MarkupDeclarationOpen),
            Some(b'/') => switch_to!(State::EndTagOpen),
            Some(x) if x.is_ascii_alphabetic() => {
                slf.emitter.init_start_tag(slf.tag_open_pos);
                reconsume_in!(Some(x), State::TagName)
            }
            c @ Some(b'?') => {
                slf.emitter.init_comment(slf.tag_open_pos);
                reconsume_in!(c, State::BogusComment)
            }
            None => {
                slf.emitter.emit_string(b"<", slf.tag_open_pos);
                eof!()
            }
            c => {
                slf.emitter.emit_string(b"<", slf.tag_open_pos);
                reconsume_in!(c, State::Data)
            }
        },
        State::EndTagOpen => match read_byte!() {
            Some(x) if x.is_ascii_alphabetic() => {
                slf.emitter.init_end_tag(slf.tag_open_pos);
                reconsume_in!(Some(x), State::TagName)
            }
            Some(b'>') => {
                // `</>` is dropped, text around it must not merge into one token
                slf.emitter.flush_current_characters();
                switch_to!(State::Data)
            }
            None => {
                slf.emitter.emit_string(b"</", slf.tag_open_pos);
                eof!()
            }
            c => {
                slf.emitter.init_comment(slf.tag_open_pos);
                reconsume_in!(c, State::BogusComment)
            }
        },
        State::TagName => match read_byte!() {
            Some(whitespace_pat!()) => switch_to!(State::BeforeAttributeName),
            Some(b'/') => switch_to!(State::SelfClosingStartTag),
            Some(b'>') => emit_current_tag!(),
            Some(x) => {
                slf.emitter.push_tag_name(&[x]);
                cont!()
            }
            None => eof!(),
        },
        State::BeforeAttributeName => match read_byte!() {
            Some(whitespace_pat!()) => cont!(),
            c @ (Some(b'/' | b'>') | None) => reconsume_in!(c, State::AfterAttributeName),
            Some(b'=') => {
                slf.emitter.init_attribute(last_pos!());
                slf.emitter.push_attribute_name(b"=");
                switch_to!(State::AttributeName)
            }
            Some(x) => {
                slf.emitter.init_attribute(last_pos!());
                reconsume_in!(Some(x), State::AttributeName)
            }
        },
        State::AttributeName => match read_byte!() {
            c @ (Some(whitespace_pat!() | b'/' | b'>') | None) => {
                reconsume_in!(c, State::AfterAttributeName)
            }
            Some(b'=') => switch_to!(State::BeforeAttributeValue),
            Some(x) => {
                slf.emitter.push_attribute_name(&[x]);
                cont!()
            }
        },
        State::AfterAttributeName => match read_byte!() {
            Some(whitespace_pat!()) => cont!(),
            Some(b'/') => switch_to!(State::SelfClosingStartTag),
            Some(b'=') => switch_to!(State::BeforeAttributeValue),
            Some(b'>') => emit_current_tag!(),
            Some(x) => {
                slf.emitter.init_attribute(last_pos!());
                reconsume_in!(Some(x), State::AttributeName)
            }
            None => eof!(),
        },
        State::BeforeAttributeValue => match read_byte!() {
            Some(whitespace_pat!()) => cont!(),
            Some(b'"') => switch_to!(State::AttributeValueDoubleQuoted),
            Some(b'\'') => switch_to!(State::AttributeValueSingleQuoted),
            Some(b'>') => emit_current_tag!(),
            c => reconsume_in!(c, State::AttributeValueUnquoted),
        },
        State::AttributeValueDoubleQuoted => slf.reader.read_until(b"\"", |xs, pos| match xs {
            Some(b"\"") => {
                slf.state = State::AfterAttributeValueQuoted;
                ControlToken::Continue
            }
            Some(xs) => {
                slf.emitter.push_attribute_value(xs, pos);
                ControlToken::Continue
            }
            None => ControlToken::Eof,
        }),
        State::AttributeValueSingleQuoted => slf.reader.read_until(b"'", |xs, pos| match xs {
            Some(b"'") => {
                slf.state = State::AfterAttributeValueQuoted;
                ControlToken::Continue
            }
            Some(xs) => {
                slf.emitter.push_attribute_value(xs, pos);
                ControlToken::Continue
            }
            None => ControlToken::Eof,
        }),
        State::AttributeValueUnquoted => {
            slf.reader
                .read_until(b"\t\n\x0C\r >", |xs, pos| match xs {
                    Some(b"\t" | b"\n" | b"\x0C" | b"\r" | b" ") => {
                        slf.state = State::BeforeAttributeName;
                        ControlToken::Continue
                    }
                    Some(b">") => {
                        slf.state = slf.emitter.emit_current_tag(pos + 1).unwrap_or(State::Data);
                        ControlToken::Continue
                    }
                    Some(xs) => {
                        slf.emitter.push_attribute_value(xs, pos);
                        ControlToken::Continue
                    }
                    None => ControlToken::Eof,
                })
        }
        State::AfterAttributeValueQuoted => match read_byte!() {
            Some(whitespace_pat!()) => switch_to!(State::BeforeAttributeName),
            Some(b'/') => switch_to!(State::SelfClosingStartTag),
            Some(b'>') => emit_current_tag!(),
            None => eof!(),
            c => reconsume_in!(c, State::BeforeAttributeName),
        },
        State::SelfClosingStartTag => match read_byte!() {
            Some(b'>') => {
                slf.emitter.set_self_closing();
                emit_current_tag!()
            }
            None => eof!(),
            c => reconsume_in!(c, State::BeforeAttributeName),
        },
        State::MarkupDeclarationOpen => {
            if slf.reader.try_read_string(b"--", true)? {
                slf.emitter.init_comment(slf.tag_open_pos);
                switch_to!(State::CommentStart)
            } else if slf.reader.try_read_string(b"doctype", false)? {
                slf.emitter.init_doctype(slf.tag_open_pos);
                switch_to!(State::BeforeDoctypeName)
            } else {
                slf.emitter.init_comment(slf.tag_open_pos);
                switch_to!(State::BogusComment)
            }
        }
        State::CommentStart => {
            // `<!-->` and `<!--->` are abruptly closed empty comments
            if slf.reader.try_read_string(b">", true)? || slf.reader.try_read_string(b"->", true)? {
                let end = slf.reader.position();
                slf.emitter.emit_current_comment(end);
                switch_to!(State::Data)
            } else {
                switch_to!(State::Comment)
            }
        }
        State::Comment => {
            let found_dash = slf.reader.read_until(b"-", |xs, pos| match xs {
                Some(b"-") => None,
                Some(xs) => {
                    slf.emitter.push_comment(xs);
                    Some(ControlToken::Continue)
                }
                None => {
                    slf.emitter.emit_current_comment(pos);
                    Some(ControlToken::Eof)
                }
            })?;

            if let Some(control) = found_dash {
                return Ok(control);
            }

            if slf.reader.try_read_string(b"->", true)? {
                let end = slf.reader.position();
                slf.emitter.emit_current_comment(end);
                switch_to!(State::Data)
            } else {
                slf.emitter.push_comment(b"-");
                cont!()
            }
        }
        State::BogusComment => slf.reader.read_until(b">", |xs, pos| match xs {
            Some(b">") => {
                slf.emitter.emit_current_comment(pos + 1);
                slf.state = State::Data;
                ControlToken::Continue
            }
            Some(xs) => {
                slf.emitter.push_comment(xs);
                ControlToken::Continue
            }
            None => {
                slf.emitter.emit_current_comment(pos);
                ControlToken::Eof
            }
        }),
        State::BeforeDoctypeName => match read_byte!() {
            Some(whitespace_pat!()) => cont!(),
            Some(b'>') => {
                let end = slf.reader.position();
                slf.emitter.emit_current_doctype(end);
                switch_to!(State::Data)
            }
            None => {
                let end = slf.reader.position();
                slf.emitter.emit_current_doctype(end);
                eof!()
            }
            Some(x) => {
                slf.emitter.push_doctype_name(&[x]);
                switch_to!(State::DoctypeName)
            }
        },
        State::DoctypeName => match read_byte!() {
            Some(whitespace_pat!()) => switch_to!(State::AfterDoctypeName),
            Some(b'>') => {
                let end = slf.reader.position();
                slf.emitter.emit_current_doctype(end);
                switch_to!(State::Data)
            }
            None => {
                let end = slf.reader.position();
                slf.emitter.emit_current_doctype(end);
                eof!()
            }
            Some(x) => {
                slf.emitter.push_doctype_name(&[x]);
                cont!()
            }
        },
        State::AfterDoctypeName => slf.reader.read_until(b">", |xs, pos| match xs {
            Some(b">") => {
                slf.emitter.emit_current_doctype(pos + 1);
                slf.state = State::Data;
                ControlToken::Continue
            }
            Some(_) => ControlToken::Continue,
            None => {
                slf.emitter.emit_current_doctype(pos);
                ControlToken::Eof
            }
        }),
    }
}
