use pretty_assertions::assert_eq;

use htmlcheck::{resolve_positions, TagRule, ValidationError, Validator};

const HTML: &str = "<article>\n  <p class=\"x\" hreff=\"y\">text\n  </article>\n";

fn validator() -> Validator {
    let mut validator = Validator::new();
    validator.add_valid_tag(TagRule::new("article")).unwrap();
    validator
        .add_valid_tag(TagRule::new("p").attrs(["class"]))
        .unwrap();
    validator
}

/// Print every error followed by its source line and a caret under the tag name.
fn render(html: &str, errors: &[ValidationError]) -> String {
    let lines: Vec<_> = html.lines().collect();
    let mut out = String::new();
    for error in errors {
        let pos = error.text_pos.unwrap();
        out.push_str(&format!("{}\n", error));
        out.push_str(lines[pos.line - 1]);
        out.push('\n');
        out.push_str(&" ".repeat(pos.column - 1));
        out.push_str("^\n");
    }
    out
}

#[test]
fn report() {
    let mut errors = validator().validate(HTML);
    resolve_positions(HTML, &mut errors);

    let expected = concat!(
        "unknown-attribute: `hreff` on <p> at 2:4\n",
        "  <p class=\"x\" hreff=\"y\">text\n",
        "   ^\n",
        "wrong-nesting: <article> at 3:5\n",
        "  </article>\n",
        "    ^\n",
        "unclosed-tag: <article> at 1:2\n",
        "<article>\n",
        " ^\n",
        "unclosed-tag: <p> at 2:4\n",
        "  <p class=\"x\" hreff=\"y\">text\n",
        "   ^\n",
    );
    assert_eq!(render(HTML, &errors), expected);
}

#[test]
fn offsets_point_at_tag_names() {
    let errors = validator().validate(HTML);
    for error in &errors {
        assert!(
            HTML[error.offset..].starts_with(&error.tag_name),
            "{} does not point at its tag",
            error
        );
    }
}

#[test]
fn read_from_io() {
    let validator = validator();
    let from_reader = validator.validate_reader(std::io::Cursor::new(HTML)).unwrap();
    assert_eq!(from_reader, validator.validate(HTML));
}
