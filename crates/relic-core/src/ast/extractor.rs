//! Syntax tree visitor - declaration registration, SQL literal discovery,
//! and condition-chain reconstruction
//!
//! Single pass over the tree maintaining a stack of enclosing condition
//! expressions and a current-function slot. Condition rendering is a
//! best-effort human-readable serialization and is never re-parsed.

use tree_sitter::{Node, Tree};

use super::types::{AstExtraction, ClassRecord, FunctionRecord};
use crate::patterns::ConditionalQueryVariant;
use crate::sql::SqlNormalizer;

/// Rendering for condition sub-expressions with no dedicated form
const PLACEHOLDER: &str = "<expr>";

/// Visits primary-dialect syntax trees and collects structural facts
pub struct SyntaxTreeExtractor {
    normalizer: SqlNormalizer,
}

impl SyntaxTreeExtractor {
    pub fn new() -> Self {
        Self {
            normalizer: SqlNormalizer::new(),
        }
    }

    pub fn extract(&self, tree: &Tree, source: &str, file: &str) -> AstExtraction {
        let mut visit = Visit {
            source: source.as_bytes(),
            file,
            normalizer: &self.normalizer,
            conditions: Vec::new(),
            current_function: None,
            class_stack: Vec::new(),
            out: AstExtraction::default(),
        };
        visit.node(tree.root_node());
        visit.out
    }
}

impl Default for SyntaxTreeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

struct Visit<'a> {
    source: &'a [u8],
    file: &'a str,
    normalizer: &'a SqlNormalizer,
    /// Enclosing condition expressions, outer to inner
    conditions: Vec<String>,
    current_function: Option<String>,
    /// Indices into `out.classes` for enclosing class declarations
    class_stack: Vec<usize>,
    out: AstExtraction,
}

impl<'a> Visit<'a> {
    fn node(&mut self, node: Node) {
        match node.kind() {
            "function_definition" | "method_declaration" => self.function(node),
            "class_declaration" => self.class(node),
            "if_statement" => self.conditional(node),
            "assignment_expression" => {
                self.assignment(node);
                self.children(node);
            }
            _ => self.children(node),
        }
    }

    fn children(&mut self, node: Node) {
        let mut cursor = node.walk();
        let kids: Vec<Node> = node.children(&mut cursor).collect();
        for child in kids {
            self.node(child);
        }
    }

    fn function(&mut self, node: Node) {
        let name = self.field_text(node, "name");
        if name.is_empty() {
            self.children(node);
            return;
        }
        let parameters = self.parameters(node);
        self.out.functions.push(FunctionRecord {
            name: name.clone(),
            file: self.file.to_string(),
            parameters,
        });
        if node.kind() == "method_declaration" {
            if let Some(&index) = self.class_stack.last() {
                self.out.classes[index].methods.push(name.clone());
            }
        }
        let previous = self.current_function.replace(name);
        if let Some(body) = node.child_by_field_name("body") {
            self.node(body);
        }
        self.current_function = previous;
    }

    fn parameters(&self, node: Node) -> Vec<String> {
        let mut parameters = Vec::new();
        if let Some(list) = node.child_by_field_name("parameters") {
            let mut cursor = list.walk();
            for child in list.children(&mut cursor) {
                if let Some(name) = child.child_by_field_name("name") {
                    parameters.push(self.text_of(name));
                }
            }
        }
        parameters
    }

    fn class(&mut self, node: Node) {
        let name = self.field_text(node, "name");
        if name.is_empty() {
            self.children(node);
            return;
        }
        self.out.classes.push(ClassRecord {
            name,
            file: self.file.to_string(),
            methods: Vec::new(),
        });
        self.class_stack.push(self.out.classes.len() - 1);
        if let Some(body) = node.child_by_field_name("body") {
            self.node(body);
        }
        self.class_stack.pop();
    }

    fn conditional(&mut self, node: Node) {
        let condition = node
            .child_by_field_name("condition")
            .map(|c| self.render_condition(c))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        if let Some(body) = node.child_by_field_name("body") {
            self.conditions.push(condition);
            self.node(body);
            self.conditions.pop();
        }

        let mut cursor = node.walk();
        let alternatives: Vec<Node> = node
            .children(&mut cursor)
            .filter(|c| matches!(c.kind(), "else_if_clause" | "else_clause"))
            .collect();
        for alternative in alternatives {
            let label = if alternative.kind() == "else_if_clause" {
                alternative
                    .child_by_field_name("condition")
                    .map(|c| self.render_condition(c))
                    .unwrap_or_else(|| PLACEHOLDER.to_string())
            } else {
                "else".to_string()
            };
            if let Some(body) = alternative.child_by_field_name("body") {
                self.conditions.push(label);
                self.node(body);
                self.conditions.pop();
            }
        }
    }

    fn assignment(&mut self, node: Node) {
        let Some(right) = node.child_by_field_name("right") else {
            return;
        };
        if !matches!(right.kind(), "string" | "encapsed_string") {
            return;
        }
        let literal = self.string_value(right);
        if !self.normalizer.looks_like_sql(&literal) {
            return;
        }
        let query = self.normalizer.query(&literal);
        self.out.queries.push(query.clone());
        self.out.variants.push(ConditionalQueryVariant {
            conditions: self.conditions.clone(),
            query,
            file: self.file.to_string(),
        });
    }

    fn render_condition(&self, node: Node) -> String {
        match node.kind() {
            "parenthesized_expression" => node
                .named_child(0)
                .map(|inner| self.render_condition(inner))
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            "binary_expression" => {
                let left = node
                    .child_by_field_name("left")
                    .map(|n| self.render_condition(n))
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                let right = node
                    .child_by_field_name("right")
                    .map(|n| self.render_condition(n))
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                let operator = node
                    .child_by_field_name("operator")
                    .or_else(|| node.child(1))
                    .map(|n| self.text_of(n))
                    .unwrap_or_else(|| "?".to_string());
                format!("{} {} {}", left, operator, right)
            }
            "variable_name" => self.text_of(node),
            "string" | "encapsed_string" => format!("\"{}\"", self.string_value(node)),
            "integer" | "float" => self.text_of(node),
            _ => PLACEHOLDER.to_string(),
        }
    }

    fn string_value(&self, node: Node) -> String {
        let mut value = String::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "string_content" {
                value.push_str(&self.text_of(child));
            }
        }
        if value.is_empty() {
            value = self
                .text_of(node)
                .trim_matches(|c| c == '\'' || c == '"')
                .to_string();
        }
        value
    }

    fn text_of(&self, node: Node) -> String {
        node.utf8_text(self.source).unwrap_or("").to_string()
    }

    fn field_text(&self, node: Node, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|n| self.text_of(n))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parser::{PhpTreeParser, ScriptParser};

    fn extract(source: &str) -> AstExtraction {
        let mut parser = PhpTreeParser::new().unwrap();
        let tree = parser.parse(source).unwrap();
        SyntaxTreeExtractor::new().extract(&tree, source, "test.php")
    }

    #[test]
    fn test_function_with_parameters() {
        let extraction = extract("<?php function find_user($id, $active) { return $id; }");
        assert_eq!(extraction.functions.len(), 1);
        assert_eq!(extraction.functions[0].name, "find_user");
        assert_eq!(extraction.functions[0].parameters, vec!["$id", "$active"]);
    }

    #[test]
    fn test_class_with_methods() {
        let extraction = extract(
            "<?php class OrderRepo { function all() { } function purge($before) { } }",
        );
        assert_eq!(extraction.classes.len(), 1);
        assert_eq!(extraction.classes[0].name, "OrderRepo");
        assert_eq!(extraction.classes[0].methods, vec!["all", "purge"]);
        assert_eq!(extraction.functions.len(), 2);
    }

    #[test]
    fn test_if_else_variants() {
        let source = "<?php if ($x > 5) { $query = 'SELECT * FROM t1'; } else { $query = 'SELECT * FROM t2'; }";
        let extraction = extract(source);

        assert_eq!(extraction.variants.len(), 2);
        assert_eq!(extraction.variants[0].conditions, vec!["$x > 5"]);
        assert_eq!(extraction.variants[0].query.tables, vec!["t1"]);
        assert_eq!(extraction.variants[1].conditions, vec!["else"]);
        assert_eq!(extraction.variants[1].query.tables, vec!["t2"]);
    }

    #[test]
    fn test_nested_conditions_outer_to_inner() {
        let source =
            "<?php if ($a == 1) { if ($b == 2) { $q = 'DELETE FROM logs'; } }";
        let extraction = extract(source);

        assert_eq!(extraction.variants.len(), 1);
        assert_eq!(extraction.variants[0].conditions, vec!["$a == 1", "$b == 2"]);
        assert_eq!(extraction.variants[0].query.tables, vec!["logs"]);
    }

    #[test]
    fn test_unconditional_query_has_empty_conditions() {
        let extraction = extract("<?php $q = 'SELECT id FROM users';");
        assert_eq!(extraction.variants.len(), 1);
        assert!(extraction.variants[0].conditions.is_empty());
        assert_eq!(extraction.queries.len(), 1);
        assert_eq!(extraction.queries[0].text, "SELECT id FROM users");
    }

    #[test]
    fn test_non_sql_strings_ignored() {
        let extraction = extract("<?php $title = 'Order overview';");
        assert!(extraction.variants.is_empty());
        assert!(extraction.queries.is_empty());
    }

    #[test]
    fn test_string_condition_rendering() {
        let source = r#"<?php if ($mode == "admin") { $q = 'SELECT * FROM audit'; }"#;
        let extraction = extract(source);
        assert_eq!(extraction.variants.len(), 1);
        assert_eq!(extraction.variants[0].conditions, vec!["$mode == \"admin\""]);
    }
}
