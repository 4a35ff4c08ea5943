//! Variable parser for {{variable}} syntax
//!
//! Parses strings to extract variable references with their positions.

use std::ops::Range;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A variable reference found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name, trimmed, without braces.
    pub name: String,

    /// Byte range of the whole `{{ ... }}` reference in the input.
    pub span: Range<usize>,
}

/// Extracts all variable references, in order of appearance.
///
/// Names are trimmed; `{{ }}` with an empty name is skipped. An unclosed
/// `{{` ends parsing.
///
/// # Examples
///
/// ```
/// use restpad_application::variable_resolver::parse_variables;
///
/// let refs = parse_variables("{{base}}/users/{{ id }}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[1].name, "id");
/// assert_eq!(refs[1].span, 15..23);
/// ```
#[must_use]
pub fn parse_variables(input: &str) -> Vec<VariableReference> {
    let mut references = Vec::new();
    let mut cursor = 0;

    while let Some(open) = input[cursor..].find(OPEN).map(|i| cursor + i) {
        let name_start = open + OPEN.len();
        let Some(close) = input[name_start..].find(CLOSE).map(|i| name_start + i) else {
            break;
        };
        let end = close + CLOSE.len();

        let name = input[name_start..close].trim();
        if !name.is_empty() {
            references.push(VariableReference {
                name: name.to_string(),
                span: open..end,
            });
        }
        cursor = end;
    }

    references
}
