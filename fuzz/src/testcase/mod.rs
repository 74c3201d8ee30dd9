use std::env;

mod span_invariants;
mod validator_invariants;

fn enabled(var: &str) -> bool {
    env::var(var).map_or(false, |value| value == "1")
}

pub fn run(s: &[u8]) {
    // unconditionally run tokenizer against raw bytes, it should never crash. we rely on running
    // in debug mode such that this is not just simply optimized away
    let testing_tokenizer = htmlcheck::Tokenizer::new(s).infallible();
    for _ in testing_tokenizer {}

    if enabled("FUZZ_SPAN_INVARIANTS") {
        span_invariants::validate_span_invariants(s);
    }

    if enabled("FUZZ_VALIDATOR_INVARIANTS") {
        validator_invariants::validate_validator_invariants(s);
    }
}
