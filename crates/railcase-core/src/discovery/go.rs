//! Go test parser using tree-sitter.

use tracing::debug;
use tree_sitter::Node;

use super::error::DiscoveryError;
use super::result::{FunctionDecl, ParsedTestFile, TestIdentifier};
use super::traits::TestParser;
use super::treesitter::{extract_doc_comment, TreeSitterParser};
use crate::config::{DEFAULT_TEST_FILE_SUFFIX, DEFAULT_TEST_PREFIX};

/// Go test parser using tree-sitter.
///
/// Finds `func TestXxx` declarations (methods included, for suite-style
/// tests) and the literal names passed to `x.Run("name", ...)` in their
/// bodies. Only one level of sub-tests is reported: the body of a `Run`
/// call is not searched for further `Run` calls.
pub struct GoParser {
    base: TreeSitterParser,
    test_prefix: String,
    file_suffix: String,
}

impl GoParser {
    pub fn new() -> Self {
        Self::with_conventions(DEFAULT_TEST_PREFIX, DEFAULT_TEST_FILE_SUFFIX)
    }

    /// Parser with a custom test-name prefix and file suffix.
    pub fn with_conventions(test_prefix: impl Into<String>, file_suffix: impl Into<String>) -> Self {
        Self {
            base: TreeSitterParser::new(tree_sitter_go::LANGUAGE.into()),
            test_prefix: test_prefix.into(),
            file_suffix: file_suffix.into(),
        }
    }

    fn is_test_name(&self, name: &str) -> bool {
        name.starts_with(&self.test_prefix)
    }

    fn extract_declaration(&self, node: &Node, content: &str) -> Option<FunctionDecl> {
        let name_node = node.child_by_field_name("name")?;
        Some(FunctionDecl {
            name: TreeSitterParser::node_text(&name_node, content).to_string(),
            doc: extract_doc_comment(node, content),
            line: TreeSitterParser::node_line(node),
        })
    }

    /// Walk a test body collecting `x.Run("literal", ...)` sub-tests.
    fn extract_subtests(
        &self,
        node: &Node,
        content: &str,
        base: &TestIdentifier,
        result: &mut ParsedTestFile,
    ) {
        if node.kind() == "call_expression" && is_run_call(node, content) {
            match subtest_name(node, content) {
                Some(name) => {
                    let id = base.child(name);
                    debug!(test = %id, "discovered sub-test");
                    result.add_test(id, TreeSitterParser::node_line(node));
                }
                None => debug!(
                    parent = %base,
                    line = TreeSitterParser::node_line(node),
                    "skipping sub-test with a non-literal name"
                ),
            }
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.extract_subtests(&child, content, base, result);
        }
    }

    fn process_node(&self, node: Node, content: &str, result: &mut ParsedTestFile) {
        match node.kind() {
            "function_declaration" | "method_declaration" => {
                let Some(decl) = self.extract_declaration(&node, content) else {
                    return;
                };

                if self.is_test_name(&decl.name) {
                    let base = TestIdentifier::new(decl.name.clone());
                    debug!(test = %base, file = %result.file_path, "discovered test");
                    result.add_test(base.clone(), decl.line);

                    if let Some(body) = node.child_by_field_name("body") {
                        self.extract_subtests(&body, content, &base, result);
                    }
                }

                result.add_declaration(decl);
            }
            _ => {}
        }
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

/// `<expr>.Run(...)`, whatever the receiver.
fn is_run_call(call: &Node, content: &str) -> bool {
    call.child_by_field_name("function")
        .filter(|f| f.kind() == "selector_expression")
        .and_then(|f| f.child_by_field_name("field"))
        .map(|field| TreeSitterParser::node_text(&field, content) == "Run")
        .unwrap_or(false)
}

/// First argument of a `Run` call when it is a string literal, without quotes.
///
/// Escape sequences are returned as written in the source.
fn subtest_name<'a>(call: &Node, content: &'a str) -> Option<&'a str> {
    let args = call.child_by_field_name("arguments")?;
    let first = args.named_child(0)?;
    match first.kind() {
        "interpreted_string_literal" | "raw_string_literal" => {
            let text = TreeSitterParser::node_text(&first, content);
            text.get(1..text.len().saturating_sub(1))
        }
        _ => None,
    }
}

impl TestParser for GoParser {
    fn parse_file(&self, path: &str, content: &str) -> Result<ParsedTestFile, DiscoveryError> {
        let tree = self.base.parse_tree(path, content)?;
        let mut result = ParsedTestFile::new(path);

        let root = tree.root_node();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            self.process_node(child, content, &mut result);
        }

        Ok(result)
    }

    fn language_name(&self) -> &'static str {
        "Go"
    }

    fn file_suffix(&self) -> &str {
        &self.file_suffix
    }
}
