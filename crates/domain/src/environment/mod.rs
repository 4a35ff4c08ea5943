//! Named environments and their variable bindings.

mod variables;

pub use variables::{VariableBindings, VariablesData};
