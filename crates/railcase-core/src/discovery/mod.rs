//! Test discovery for Go source trees.
//!
//! Walks a directory, parses every `_test.go` file with tree-sitter, and
//! reports test functions, their one-level sub-tests, and the doc comments
//! attached to each function.
//!
//! ## Components
//!
//! - `TestParser` trait - Common interface for test extractors
//! - `GoParser` - tree-sitter based Go implementation
//! - `ParserRegistry` - Maps file naming conventions to parsers
//! - `Scanner` - Fail-fast directory walk
//! - `ParsedTestFile` - Declarations and tests of one file

mod error;
mod go;
mod registry;
mod result;
mod scanner;
mod traits;
mod treesitter;

pub use error::DiscoveryError;
pub use go::GoParser;
pub use registry::ParserRegistry;
pub use result::{DiscoveredTest, FunctionDecl, ParsedTestFile, TestIdentifier};
pub use scanner::Scanner;
pub use traits::TestParser;
