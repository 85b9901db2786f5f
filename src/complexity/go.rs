//! Decision-point counting over a Go syntax tree.
//!
//! Only top-level `func` declarations with a body are reported. Inside a
//! body each `if`, `for` (range loops included), `case`/`default` clause,
//! `select` statement, `select` clause and `&&`/`||` operator adds one.
//! Function literals count toward the declaration that contains them.

use std::error::Error;

use tree_sitter::{Node, Parser};

use super::FunctionComplexity;

/// Parse `source` and return per-function complexity in declaration order.
/// Source with syntax errors is rejected so the caller can fall back.
pub fn analyze_source(source: &str) -> Result<Vec<FunctionComplexity>, Box<dyn Error>> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
    let tree = parser.parse(source, None).ok_or("go parser returned no tree")?;

    let root = tree.root_node();
    if root.has_error() {
        return Err("go source has syntax errors".into());
    }

    let bytes = source.as_bytes();
    let mut cursor = root.walk();
    let functions = root
        .named_children(&mut cursor)
        .filter_map(|node| function(node, bytes))
        .collect();
    Ok(functions)
}

fn function(node: Node, source: &[u8]) -> Option<FunctionComplexity> {
    if !matches!(node.kind(), "function_declaration" | "method_declaration") {
        return None;
    }
    // declarations without a body (assembly stubs) are skipped
    let body = node.child_by_field_name("body")?;
    let ident = node.child_by_field_name("name")?.utf8_text(source).ok()?;

    let name = match receiver_type(node, source) {
        Some(recv) => format!("{recv}.{ident}"),
        None => ident.to_string(),
    };

    Some(FunctionComplexity {
        name,
        complexity: 1 + decisions(body),
        line: node.start_position().row + 1,
    })
}

/// Receiver type name for `func (r T)` and `func (r *T)`. Generic or
/// otherwise unusual receivers yield `None` and the method keeps its bare
/// name.
fn receiver_type<'a>(node: Node, source: &'a [u8]) -> Option<&'a str> {
    let list = node.child_by_field_name("receiver")?;
    let mut cursor = list.walk();
    let param = list
        .named_children(&mut cursor)
        .find(|c| c.kind() == "parameter_declaration")?;

    let mut ty = param.child_by_field_name("type")?;
    if ty.kind() == "pointer_type" {
        ty = ty.named_child(0)?;
    }
    if ty.kind() != "type_identifier" {
        return None;
    }
    ty.utf8_text(source).ok()
}

fn decisions(body: Node) -> usize {
    let mut count = 0;
    let mut stack = vec![body];
    while let Some(node) = stack.pop() {
        count += match node.kind() {
            "if_statement" | "for_statement" | "expression_case" | "type_case" | "default_case"
            | "communication_case" | "select_statement" => 1,
            "binary_expression" => node
                .child_by_field_name("operator")
                .is_some_and(|op| matches!(op.kind(), "&&" | "||"))
                as usize,
            _ => 0,
        };
        let mut cursor = node.walk();
        stack.extend(node.named_children(&mut cursor));
    }
    count
}

#[cfg(test)]
#[path = "go_test.rs"]
mod tests;
