use iai::{black_box, main};

use htmlcheck::{TagRule, Tokenizer, Validator};

fn tokenize(pattern: &str, i: usize) {
    let s: String = black_box((0..i).map(|_| pattern).collect());
    for _ in Tokenizer::new(&s).infallible() {}
}

fn validate(pattern: &str, i: usize) {
    let mut validator = Validator::new();
    validator
        .add_valid_tag(TagRule::new("a").attrs(["href"]))
        .unwrap();
    let s: String = black_box((0..i).map(|_| pattern).collect());
    black_box(validator.validate(&s));
}

macro_rules! pattern_tests {
    ($(($name:ident, $f:ident, $pattern:expr, $repeat:expr), )*) => {
        $(
            fn $name() {
                $f($pattern, $repeat)
            }
        )*

        main!($($name),*);
    }
}

pattern_tests![
    (data_state_10, tokenize, "a", 10),
    (data_state_10000, tokenize, "a", 10000),
    (tagopen_10, tokenize, "<a>", 10),
    (tagopen_10000, tokenize, "<a>", 10000),
    (tagopenclose_10, tokenize, "<a></a>", 10),
    (tagopenclose_10000, tokenize, "<a></a>", 10000),
    (comment_10, tokenize, "<!-- -->", 10),
    (comment_10000, tokenize, "<!-- -->", 10000),
    (valid_10000, validate, "<a href=x></a>", 10000),
    (unknown_attribute_10000, validate, "<a hreff=x></a>", 10000),
    (unclosed_10000, validate, "<a>", 10000),
];
