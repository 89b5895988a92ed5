//! Query and mutation document assembly.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::types::{GraphQlRequest, Variables};

/// `$name` references inside a selection fragment.
static VARIABLE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([_A-Za-z][_0-9A-Za-z]*)").expect("variable reference pattern is valid")
});

/// Build a mutation whose variables are passed as a single `input` object.
///
/// Produces
/// `mutation <Op>(<decls>) { <name>(input: { <args> }) { <selection> } }`
/// where `<Op>` defaults to `name` with its first ASCII letter upper-cased.
///
/// Only variables present in `variables` are declared, using the type from
/// `var_types` in `var_types` order. Variables already referenced as `$name`
/// inside `selection` are declared but not passed as top-level arguments.
///
/// # Example
///
/// ```
/// use fittfinder::graphql::{Variables, build_mutation};
/// use serde_json::json;
///
/// let mut variables = Variables::new();
/// variables.insert("name".into(), json!("x"));
/// let request = build_mutation("createEvent", &[("name", "String!")], variables, "id", None);
/// assert_eq!(
///     request.query(),
///     "mutation CreateEvent($name: String!) { createEvent(input: { name: $name }) { id } }"
/// );
/// ```
pub fn build_mutation(
    name: &str,
    var_types: &[(&str, &str)],
    variables: Variables,
    selection: &str,
    operation_name: Option<&str>,
) -> GraphQlRequest {
    let operation_name = operation_name.map_or_else(|| upper_first(name), str::to_string);
    let decls = declare_variables(var_types, &variables);
    let args = map_arguments(&variables, &referenced_variables(selection));
    let query = format!(
        "mutation {operation_name}({decls}) {{ {name}(input: {{ {args} }}) {{ {selection} }} }}"
    );
    GraphQlRequest::new(query)
        .with_operation_name(operation_name)
        .with_variables(variables)
}

/// Build a query whose variables are passed directly as field arguments.
///
/// Produces
/// `query <Op>(<decls>) { <name>(<args>) { <selection> } }`, following the
/// same declaration and argument rules as [`build_mutation`].
pub fn build_query(
    name: &str,
    var_types: &[(&str, &str)],
    variables: Variables,
    selection: &str,
    operation_name: Option<&str>,
) -> GraphQlRequest {
    let operation_name = operation_name.map_or_else(|| upper_first(name), str::to_string);
    let decls = declare_variables(var_types, &variables);
    let args = map_arguments(&variables, &referenced_variables(selection));
    let query =
        format!("query {operation_name}({decls}) {{ {name}({args}) {{ {selection} }} }}");
    GraphQlRequest::new(query)
        .with_operation_name(operation_name)
        .with_variables(variables)
}

/// Names referenced as `$name` in a selection fragment.
///
/// This is a textual scan, not a parse, so partial or malformed fragments
/// still yield whatever references they contain.
fn referenced_variables(selection: &str) -> HashSet<&str> {
    VARIABLE_REFERENCE
        .captures_iter(selection)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

fn declare_variables(var_types: &[(&str, &str)], variables: &Variables) -> String {
    var_types
        .iter()
        .filter(|(name, _)| variables.contains_key(*name))
        .map(|(name, ty)| format!("${name}: {ty}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn map_arguments(variables: &Variables, exclude: &HashSet<&str>) -> String {
    variables
        .keys()
        .filter(|name| !exclude.contains(name.as_str()))
        .map(|name| format!("{name}: ${name}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
