#![deny(missing_docs)]
// This is an HTML validator. HTML can be untrusted input from the internet.
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod callback;
mod emitter;
mod error;
mod htmlstring;
mod machine;
mod matcher;
mod position;
mod read_helper;
mod reader;
mod schema;
mod span;
mod stack;
mod token;
mod tokenizer;
mod utils;
mod validator;

#[doc(hidden)]
pub mod testutils;

pub use callback::ValidationCallback;
pub use error::{ErrorReason, ValidationError};
pub use htmlstring::HtmlString;
pub use matcher::AttributeMatcher;
pub use position::{resolve_positions, TextPos};
pub use reader::{Readable, Reader, StringReader};
pub use schema::{AttributeGroup, Schema, SchemaError, TagRule};
pub use span::{Span, Spanned};
pub use stack::NestingPolicy;
pub use token::{Attribute, Doctype, EndTag, StartTag, Token};
pub use tokenizer::{InfallibleTokenizer, Tokenizer};
pub use validator::Validator;
