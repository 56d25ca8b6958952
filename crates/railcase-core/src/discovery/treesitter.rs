//! Tree-sitter helpers shared by test parsers.

use std::path::PathBuf;

use tree_sitter::{Language, Node, Parser as TSParser, Tree};

use super::error::DiscoveryError;

/// Base tree-sitter parser with shared functionality.
pub struct TreeSitterParser {
    language: Language,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Parse source code into a syntax tree, rejecting trees with errors.
    pub fn parse_tree(&self, path: &str, content: &str) -> Result<Tree, DiscoveryError> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| parse_error(path, 0, format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| parse_error(path, 0, "Failed to parse content"))?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, message) = match first_error(root) {
                Some(node) if node.is_missing() => {
                    (Self::node_line(&node), format!("missing {}", node.kind()))
                }
                Some(node) => (
                    Self::node_line(&node),
                    format!("unexpected {:?}", snippet(Self::node_text(&node, content))),
                ),
                None => (1, "syntax error".to_string()),
            };
            return Err(parse_error(path, line, message));
        }

        Ok(tree)
    }

    /// Get text for a node from source content.
    pub fn node_text<'a>(node: &Node, content: &'a str) -> &'a str {
        &content[node.byte_range()]
    }

    /// Get line number (1-based) for a node.
    pub fn node_line(node: &Node) -> u32 {
        node.start_position().row as u32 + 1
    }
}

fn parse_error(path: &str, line: u32, message: impl Into<String>) -> DiscoveryError {
    DiscoveryError::Parse {
        path: PathBuf::from(path),
        line,
        message: message.into(),
    }
}

/// Depth-first search for the first error or missing node.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

fn snippet(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    line.chars().take(40).collect()
}

/// Doc comment lines directly above `node`, markers stripped.
///
/// The comment block must end on the line right before the declaration and
/// its lines must be contiguous, so a blank line detaches a comment. A
/// comment that trails code on its own line belongs to that code and ends
/// the block.
pub fn extract_doc_comment(node: &Node, content: &str) -> String {
    let mut comments = Vec::new();
    let mut next_row = node.start_position().row;
    let mut sibling = node.prev_named_sibling();

    while let Some(s) = sibling {
        if s.kind() != "comment" || s.end_position().row + 1 != next_row || is_trailing(&s) {
            break;
        }
        let text = TreeSitterParser::node_text(&s, content);
        comments.push(clean_comment(text));
        next_row = s.start_position().row;
        sibling = s.prev_named_sibling();
    }

    comments.reverse();
    comments.join("\n")
}

/// Whether a comment starts on the row where the preceding code ends.
fn is_trailing(comment: &Node) -> bool {
    comment
        .prev_named_sibling()
        .map(|p| p.kind() != "comment" && p.end_position().row == comment.start_position().row)
        .unwrap_or(false)
}

/// Strip `//` or `/* */` markers from a comment.
fn clean_comment(text: &str) -> String {
    if let Some(line) = text.strip_prefix("//") {
        return line.trim().to_string();
    }

    let inner = text.strip_prefix("/*").unwrap_or(text);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);
    inner
        .lines()
        .map(|l| l.trim().trim_start_matches('*').trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
