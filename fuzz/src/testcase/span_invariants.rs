use htmlcheck::{Span, Token, Tokenizer};

/// Validates span invariants for all tokens produced from the input.
///
/// This fuzzer checks that:
/// 1. Spans have valid bounds (start <= end <= input.len())
/// 2. Tag and attribute name spans point at the (case-folded) name
/// 3. Token spans are non-overlapping and ordered
/// 4. Spans are non-empty for structural tokens (tags, comments, doctypes)
pub fn validate_span_invariants(input: &[u8]) {
    let mut last_end = None;

    for token in Tokenizer::new(input).infallible() {
        validate_token_span(&token, input, &mut last_end);
    }
}

fn validate_token_span(token: &Token, input: &[u8], last_end: &mut Option<usize>) {
    match token {
        Token::StartTag(tag) => {
            validate_span(&tag.span, input, "StartTag", last_end);
            assert!(!tag.span.is_empty(), "StartTag has empty span");
            assert!(
                input[tag.span.start..].starts_with(b"<"),
                "StartTag span does not start with '<' at {:?}",
                tag.span
            );
            validate_name(&tag.name, &tag.name_span, input, "StartTag name");

            for attr in &tag.attributes {
                validate_name(&attr.name, &attr.name_span, input, "Attribute name");
                validate_span(&attr.value_span, input, "Attribute value", &mut None);
                // values are kept raw
                assert_eq!(
                    slice(input, attr.value_span),
                    attr.value.as_slice(),
                    "Attribute value span does not match value"
                );
            }
        }
        Token::EndTag(tag) => {
            validate_span(&tag.span, input, "EndTag", last_end);
            assert!(!tag.span.is_empty(), "EndTag has empty span");
            assert!(
                input[tag.span.start..].starts_with(b"</"),
                "EndTag span does not start with '</' at {:?}",
                tag.span
            );
            validate_name(&tag.name, &tag.name_span, input, "EndTag name");
        }
        Token::String(s) => {
            validate_span(&s.span, input, "String", last_end);
            // no character references are decoded, text is a verbatim slice
            assert_eq!(slice(input, s.span), s.value.as_slice());
        }
        Token::Comment(c) => {
            validate_span(&c.span, input, "Comment", last_end);
            assert!(
                input[c.span.start..].starts_with(b"<"),
                "Comment span does not start with '<' at {:?}",
                c.span
            );
        }
        Token::Doctype(d) => {
            validate_span(&d.span, input, "Doctype", last_end);
            assert!(
                input[d.span.start..].starts_with(b"<!"),
                "Doctype span does not start with '<!' at {:?}",
                d.span
            );
        }
    }
}

fn slice(input: &[u8], span: Span) -> &[u8] {
    &input[span.start..span.end]
}

fn validate_name(name: &[u8], span: &Span, input: &[u8], token_type: &str) {
    validate_span(span, input, token_type, &mut None);
    assert!(
        slice(input, *span).eq_ignore_ascii_case(name),
        "{} span {:?} does not contain {:?}",
        token_type,
        span,
        String::from_utf8_lossy(name)
    );
}

/// Validates basic span invariants.
fn validate_span(span: &Span, input: &[u8], token_type: &str, last_end: &mut Option<usize>) {
    assert!(
        span.start <= span.end,
        "{} span has start > end: {:?}",
        token_type,
        span
    );

    assert!(
        span.end <= input.len(),
        "{} span exceeds input bounds: {:?} (input len: {})",
        token_type,
        span,
        input.len()
    );

    if !span.is_empty() {
        if let Some(prev_end) = last_end {
            assert!(
                span.start >= *prev_end,
                "{} span starts before previous span ended: current {:?}, previous ended at {}",
                token_type,
                span,
                prev_end
            );
        }
        *last_end = Some(span.end);
    }
}
