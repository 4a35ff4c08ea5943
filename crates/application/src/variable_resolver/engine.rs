//! Variable resolution engine

use restpad_domain::VariableBindings;

use super::parser::parse_variables;

/// Result of resolving a template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// The template with every known reference substituted.
    pub resolved: String,

    /// Bindings that were substituted, in order of first use.
    pub substituted: VariableBindings,

    /// Referenced names with no binding, in order of first use.
    pub unresolved: Vec<String>,
}

impl Resolution {
    /// Whether every reference was substituted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Substitutes `{{name}}` references with values from `bindings`.
///
/// Unknown references are left in place verbatim.
#[must_use]
pub fn resolve_variables(input: &str, bindings: &VariableBindings) -> Resolution {
    let mut resolution = Resolution {
        resolved: String::with_capacity(input.len()),
        ..Resolution::default()
    };
    let mut last_end = 0;

    for reference in parse_variables(input) {
        resolution
            .resolved
            .push_str(&input[last_end..reference.span.start]);

        if let Some(value) = bindings.get(&reference.name) {
            resolution.resolved.push_str(value);
            resolution
                .substituted
                .entry(reference.name)
                .or_insert_with(|| value.clone());
        } else {
            resolution
                .resolved
                .push_str(&input[reference.span.clone()]);
            if !resolution.unresolved.contains(&reference.name) {
                resolution.unresolved.push(reference.name);
            }
        }

        last_end = reference.span.end;
    }

    resolution.resolved.push_str(&input[last_end..]);
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bindings(pairs: &[(&str, &str)]) -> VariableBindings {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_plain_text_is_untouched() {
        let result = resolve_variables("https://example.com", &VariableBindings::new());
        assert_eq!(result.resolved, "https://example.com");
        assert!(result.substituted.is_empty());
        assert!(result.is_complete());
    }

    #[test]
    fn test_substitutes_known_bindings() {
        let vars = bindings(&[("host", "api.test"), ("version", "v2")]);
        let result = resolve_variables("https://{{host}}/{{ version }}/users", &vars);

        assert_eq!(result.resolved, "https://api.test/v2/users");
        assert_eq!(result.substituted, vars);
    }

    #[test]
    fn test_unknown_reference_left_verbatim() {
        let vars = bindings(&[("host", "api.test")]);
        let result = resolve_variables("{{host}}/{{ missing }}/{{missing}}", &vars);

        assert_eq!(result.resolved, "api.test/{{ missing }}/{{missing}}");
        assert_eq!(result.unresolved, vec!["missing"]);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_repeated_reference_recorded_once() {
        let vars = bindings(&[("id", "7")]);
        let result = resolve_variables("{{id}}-{{id}}", &vars);

        assert_eq!(result.resolved, "7-7");
        assert_eq!(result.substituted.len(), 1);
    }
}
