use htmlcheck::testutils::SlowReader;
use htmlcheck::{resolve_positions, AttributeGroup, Readable, TagRule, TextPos, Validator};
use pretty_assertions::assert_eq;

fn validator() -> Validator {
    let mut validator = Validator::new();
    validator
        .add_group(AttributeGroup::new("events").attrs(["onclick"]))
        .unwrap();
    validator
        .add_valid_tag(TagRule::global().attrs(["id"]).attr_prefix("data-"))
        .unwrap();
    validator
        .add_valid_tag(TagRule::new("a").attrs(["href"]).groups(["events"]))
        .unwrap();
    validator
        .add_valid_tag(TagRule::new("img").self_closing(true))
        .unwrap();
    for tag in ["b", "p", "script", "style"] {
        validator.add_valid_tag(TagRule::new(tag)).unwrap();
    }
    validator
}

/// Checks that:
/// 1. Chunked and byte-by-byte reading produce the same errors
/// 2. Every error offset points at its tag name
/// 3. Resolved positions agree with a naive line count and are stable
pub fn validate_validator_invariants(input: &[u8]) {
    let validator = validator();
    let mut errors = validator.validate_bytes(input);
    let slow_errors = validator.validate_readable(SlowReader(input.to_reader()));
    assert_eq!(errors, slow_errors);

    for error in &errors {
        // invalid UTF-8 in names is replaced, those cannot be compared
        if error.tag_name.contains('\u{fffd}') {
            continue;
        }
        let name = &input[error.offset..];
        assert!(
            name.len() >= error.tag_name.len()
                && name[..error.tag_name.len()].eq_ignore_ascii_case(error.tag_name.as_bytes()),
            "{} does not point at its tag name",
            error
        );
    }

    resolve_positions(input, &mut errors);
    for error in &errors {
        let before = &input[..error.offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        assert_eq!(
            error.text_pos,
            Some(TextPos {
                line,
                column: error.offset - line_start + 1,
            })
        );
    }

    let resolved = errors.clone();
    resolve_positions(input, &mut errors);
    assert_eq!(errors, resolved);
}
