use std::collections::HashSet;
use std::fmt;
use std::io;

use crate::callback::ErrorReporter;
use crate::stack::{Close, TagStack};
use crate::utils::trace_log;
use crate::{
    AttributeGroup, EndTag, ErrorReason, NestingPolicy, Readable, Schema, SchemaError, StartTag,
    TagRule, Token, Tokenizer, ValidationCallback, ValidationError,
};

/// Checks HTML against a [`Schema`]. See crate-level docs for basic usage.
///
/// Validation never stops at the first problem. Every violation found in the input is returned,
/// in the order it was found, followed by the tags that were never closed.
///
/// All `validate*` methods take `&self`. A configured validator can be shared between threads and
/// used concurrently.
pub struct Validator {
    schema: Schema,
    callback: Option<Box<dyn ValidationCallback>>,
    nesting_policy: NestingPolicy,
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("schema", &self.schema)
            .field("callback", &self.callback.is_some())
            .field("nesting_policy", &self.nesting_policy)
            .finish()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Validator::new()
    }
}

impl Validator {
    /// A validator with an empty, case-sensitive schema.
    #[must_use]
    pub fn new() -> Self {
        Validator::with_schema(Schema::new())
    }

    /// A validator using an already filled schema.
    #[must_use]
    pub fn with_schema(schema: Schema) -> Self {
        Validator {
            schema,
            callback: None,
            nesting_policy: NestingPolicy::default(),
        }
    }

    /// The schema validated against.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// See [`Schema::add_group`].
    pub fn add_group(&mut self, group: AttributeGroup) -> Result<(), SchemaError> {
        self.schema.add_group(group)
    }

    /// See [`Schema::add_valid_tag`].
    pub fn add_valid_tag(&mut self, rule: TagRule) -> Result<(), SchemaError> {
        self.schema.add_valid_tag(rule)
    }

    /// See [`Schema::is_valid_tag`].
    #[must_use]
    pub fn is_valid_tag(&self, tag: &str) -> bool {
        self.schema.is_valid_tag(tag)
    }

    /// See [`Schema::is_valid_attribute`].
    #[must_use]
    pub fn is_valid_attribute(&self, tag: &str, attr: &str) -> bool {
        self.schema.is_valid_attribute(tag, attr)
    }

    /// Pass every error through `callback` before recording it. Replaces the previous callback.
    pub fn register_callback(&mut self, callback: impl ValidationCallback + 'static) {
        self.callback = Some(Box::new(callback));
    }

    /// Record errors unchanged again.
    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    /// Choose how end tags that close the wrong tag are handled.
    pub fn set_nesting_policy(&mut self, policy: NestingPolicy) {
        self.nesting_policy = policy;
    }

    /// The current [`NestingPolicy`].
    #[must_use]
    pub fn nesting_policy(&self) -> NestingPolicy {
        self.nesting_policy
    }

    /// Validate a string of HTML.
    ///
    /// A tag cut off by the end of input, like `<b class='x`, is dropped without an error.
    #[must_use]
    pub fn validate(&self, html: &str) -> Vec<ValidationError> {
        self.validate_tokens(Tokenizer::new(html).infallible())
    }

    /// Validate HTML given as bytes. Invalid UTF-8 is replaced in names and values of reported
    /// errors, offsets still refer to `html`.
    #[must_use]
    pub fn validate_bytes(&self, html: &[u8]) -> Vec<ValidationError> {
        self.validate_tokens(Tokenizer::new(html).infallible())
    }

    /// Read all of `reader` and validate it. Only reading can fail.
    pub fn validate_reader(&self, mut reader: impl io::Read) -> io::Result<Vec<ValidationError>> {
        let mut html = Vec::new();
        reader.read_to_end(&mut html)?;
        Ok(self.validate_bytes(&html))
    }

    /// Validate input from any [`Readable`].
    ///
    /// If the underlying [`crate::Reader`] fails, the input read so far is treated as the whole
    /// document.
    pub fn validate_readable<'a, S: Readable<'a>>(&self, input: S) -> Vec<ValidationError> {
        self.validate_tokens(Tokenizer::new(input).map_while(Result::ok))
    }

    /// Validate tokens from any source. Offsets in the errors are taken from the tokens' spans.
    ///
    /// ```
    /// use htmlcheck::{EndTag, ErrorReason, Span, Token, Validator};
    ///
    /// let validator = Validator::new();
    /// let errors = validator.validate_tokens([Token::EndTag(EndTag {
    ///     name: "p".into(),
    ///     name_span: Span::new(42, 43),
    ///     span: Span::new(40, 44),
    /// })]);
    /// assert_eq!(errors[0].reason, ErrorReason::WrongNesting);
    /// assert_eq!(errors[0].offset, 42);
    /// ```
    pub fn validate_tokens(&self, tokens: impl IntoIterator<Item = Token>) -> Vec<ValidationError> {
        let mut run = Run {
            schema: &self.schema,
            policy: self.nesting_policy,
            stack: TagStack::default(),
            reporter: ErrorReporter::new(self.callback.as_deref()),
        };

        for token in tokens {
            match token {
                Token::StartTag(tag) => run.start_tag(&tag),
                Token::EndTag(tag) => run.end_tag(&tag),
                Token::String(_) | Token::Comment(_) | Token::Doctype(_) => (),
            }
        }

        run.finish()
    }
}

/// State of one validation call.
struct Run<'v> {
    schema: &'v Schema,
    policy: NestingPolicy,
    stack: TagStack,
    reporter: ErrorReporter<'v>,
}

impl Run<'_> {
    fn start_tag(&mut self, tag: &StartTag) {
        let name = tag.name.as_lossy_str();
        let offset = tag.name_span.start;
        trace_log!("start tag <{}> at {}", name, offset);

        if !self.schema.is_valid_tag(&name) {
            self.reporter
                .report(ValidationError::new(ErrorReason::UnknownTag, &*name, offset));
        }

        let matcher = self.schema.matcher(&name);
        let mut seen = HashSet::new();
        for attr in &tag.attributes {
            let attr_name = attr.name.as_lossy_str();
            let reason = if !seen.insert(self.schema.fold(&attr_name).into_owned()) {
                ErrorReason::DuplicateAttribute
            } else if !matcher.matches(&attr_name) {
                ErrorReason::UnknownAttribute
            } else {
                continue;
            };
            self.reporter.report(
                ValidationError::new(reason, &*name, offset)
                    .with_attribute(attr_name, attr.value.as_lossy_str()),
            );
        }

        if tag.self_closing || self.schema.is_self_closing(&name) {
            return;
        }
        self.stack.push(name.into_owned(), offset);
    }

    fn end_tag(&mut self, tag: &EndTag) {
        let name = tag.name.as_lossy_str();
        let offset = tag.name_span.start;
        trace_log!("end tag </{}> at {}", name, offset);

        // such tags were never pushed
        if self.schema.is_self_closing(&name) {
            return;
        }

        let schema = self.schema;
        match self
            .stack
            .close(&name, self.policy, |a, b| schema.names_eq(a, b))
        {
            Close::Popped => (),
            Close::Mismatch => {
                self.reporter
                    .report(ValidationError::new(ErrorReason::WrongNesting, name, offset));
            }
            Close::Unwound(frames) => {
                for frame in frames {
                    self.reporter.report(ValidationError::new(
                        ErrorReason::UnclosedTag,
                        frame.name,
                        frame.offset,
                    ));
                }
            }
        }
    }

    fn finish(mut self) -> Vec<ValidationError> {
        for frame in self.stack.into_unclosed() {
            self.reporter.report(ValidationError::new(
                ErrorReason::UnclosedTag,
                frame.name,
                frame.offset,
            ));
        }
        self.reporter.finish()
    }
}
