//! Variable resolution module
//!
//! Substitutes `{{variable}}` references in request templates with the
//! bindings of an environment.
//!
//! # Usage
//!
//! ```
//! use restpad_application::variable_resolver::resolve_variables;
//! use restpad_domain::VariableBindings;
//!
//! let mut bindings = VariableBindings::new();
//! bindings.insert("host".to_string(), "localhost".to_string());
//!
//! let result = resolve_variables("http://{{host}}/api", &bindings);
//! assert_eq!(result.resolved, "http://localhost/api");
//! assert!(result.is_complete());
//! ```

pub mod engine;
pub mod parser;

pub use engine::{Resolution, resolve_variables};
pub use parser::{VariableReference, parse_variables};
