//! Lossless JavaScript and JSX parser.
//!
//! Parses ECMAScript scripts and modules, with optional JSX, into a tree
//! that remembers every byte of whitespace and every comment. Printing an
//! unedited tree with [`Unparse`] reproduces the input exactly; edited
//! nodes print with canonical spacing while the rest of the file is kept.
//!
//! # Overview
//!
//! - [`Scanner`] - Tokenizer with trivia capture and JSX lexer modes
//! - [`Parser`] - Recursive descent parser with ASI and cover grammars
//! - [`ast`] - Node types, each carrying its own trivia
//! - [`Unparse`] - Turns nodes back into source text
//! - [`ParseOptions`] - Source type, tolerance and token/comment collection
//!
//! # Example
//!
//! ```
//! use lossless_parser::{parse_module, ParseOptions, Unparse};
//!
//! let source = "import x from 'y';\nexport default <App  id={x} />;\n";
//! let output = parse_module(source, &ParseOptions::default()).unwrap();
//! assert_eq!(output.program.unparse(), source);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod character;
pub mod entities;
pub mod error;
pub mod options;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod unparse;

pub use ast::{Expression, NodeKind, Program, Span, Statement};
pub use core_types::{ErrorKind, JsError, JsResult};
pub use options::{ParseOptions, SourceType};
pub use parser::{parse, parse_module, parse_script, Delegate, ParseOutput, Parser};
pub use scanner::{LexMode, Scanner};
pub use token::{Comment, CommentKind, Token, TokenEntry, TokenKind};
pub use unparse::{join_into, RenderContext, Separators, Unparse};
