//! Parse result types for discovered tests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Slash-delimited test path: `TestFoo` or `TestFoo/sub name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestIdentifier(String);

impl TestIdentifier {
    /// Identifier of a top-level test function.
    pub fn new(function: impl Into<String>) -> Self {
        Self(function.into())
    }

    /// Identifier of a sub-test nested under this one.
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}/{}", self.0, name))
    }

    /// The top-level function name.
    pub fn root(&self) -> &str {
        self.0.split('/').next().unwrap_or(&self.0)
    }

    /// Number of `/`-separated segments (1 for a top-level test).
    pub fn depth(&self) -> usize {
        self.0.split('/').count()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TestIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TestIdentifier {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A function or method declaration found in a test file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    /// Leading doc comment, newline-joined; empty if none.
    pub doc: String,
    /// 1-based line of the `func` keyword.
    pub line: u32,
}

/// A test discovered in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredTest {
    pub identifier: TestIdentifier,
    pub line: u32,
}

/// Result of parsing one test file.
#[derive(Debug, Default, Clone)]
pub struct ParsedTestFile {
    /// Path the file was read from.
    pub file_path: String,

    /// Every declaration, in source order.
    pub declarations: Vec<FunctionDecl>,

    /// Tests and sub-tests, in source order.
    pub tests: Vec<DiscoveredTest>,
}

impl ParsedTestFile {
    /// Create an empty result for the given file.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Default::default()
        }
    }

    /// Final path component of the file.
    pub fn file_name(&self) -> &str {
        Path::new(&self.file_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.file_path)
    }

    pub fn add_declaration(&mut self, decl: FunctionDecl) {
        self.declarations.push(decl);
    }

    pub fn add_test(&mut self, identifier: TestIdentifier, line: u32) {
        self.tests.push(DiscoveredTest { identifier, line });
    }

    /// Doc comment of the first declaration named `name`.
    ///
    /// Go forbids duplicate top-level names but the parser does not, so the
    /// first match wins.
    pub fn doc_for(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.doc.as_str())
    }

    /// Identifiers of every discovered test.
    pub fn identifiers(&self) -> impl Iterator<Item = &TestIdentifier> {
        self.tests.iter().map(|t| &t.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_child_and_root() {
        let base = TestIdentifier::new("TestLogin");
        let sub = base.child("bad password");
        assert_eq!(sub.as_str(), "TestLogin/bad password");
        assert_eq!(sub.root(), "TestLogin");
        assert_eq!(sub.depth(), 2);
        assert_eq!(base.depth(), 1);
    }

    #[test]
    fn test_doc_for_first_match_wins() {
        let mut file = ParsedTestFile::new("pkg/a_test.go");
        file.add_declaration(FunctionDecl {
            name: "TestA".into(),
            doc: "first".into(),
            line: 3,
        });
        file.add_declaration(FunctionDecl {
            name: "TestA".into(),
            doc: "second".into(),
            line: 9,
        });
        assert_eq!(file.doc_for("TestA"), Some("first"));
        assert_eq!(file.doc_for("TestB"), None);
        assert_eq!(file.file_name(), "a_test.go");
    }
}
