//! Template engine behind [`PromptTemplate`](crate::domain::PromptTemplate)
//!
//! A minimal evaluator: placeholder substitution plus repeated blocks.
//! Parsing happens once; rendering only reads the input.

use serde_json::Value;

use crate::domain::entities::InvocationInput;
use crate::domain::errors::InvocationError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const EACH_PREFIX: &str = "#each ";
const EACH_END: &str = "/each";
const THIS: &str = "this";
const INDEX: &str = "@index";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(String),
    Var(String),
    Each { path: String, body: Vec<Node> },
}

pub(crate) fn parse(source: &str) -> Result<Vec<Node>, InvocationError> {
    // Frame 0 is the root; each open `{{#each}}` pushes one.
    let mut stack: Vec<(Option<String>, Vec<Node>)> = vec![(None, Vec::new())];
    let mut rest = source;
    let mut offset = 0;

    while let Some(open) = rest.find(OPEN) {
        if open > 0 {
            push(&mut stack, Node::Text(rest[..open].to_string()));
        }

        let after_open = &rest[open + OPEN.len()..];
        let close = after_open.find(CLOSE).ok_or_else(|| {
            InvocationError::Template(format!(
                "unterminated tag starting at byte {}",
                offset + open
            ))
        })?;
        let tag = after_open[..close].trim();

        if let Some(path) = tag.strip_prefix(EACH_PREFIX) {
            let path = check_path(path.trim())?;
            stack.push((Some(path), Vec::new()));
        } else if tag == EACH_END {
            if stack.len() == 1 {
                return Err(InvocationError::Template(
                    "`{{/each}}` without a matching `{{#each}}`".to_string(),
                ));
            }
            if let Some((Some(path), body)) = stack.pop() {
                push(&mut stack, Node::Each { path, body });
            }
        } else if tag.starts_with('#') || tag.starts_with('/') {
            return Err(InvocationError::Template(format!(
                "unsupported block tag `{{{{{}}}}}`",
                tag
            )));
        } else {
            push(&mut stack, Node::Var(check_path(tag)?));
        }

        let consumed = open + OPEN.len() + close + CLOSE.len();
        offset += consumed;
        rest = &rest[consumed..];
    }

    if !rest.is_empty() {
        push(&mut stack, Node::Text(rest.to_string()));
    }

    if stack.len() > 1 {
        let unclosed = stack
            .last()
            .and_then(|(path, _)| path.clone())
            .unwrap_or_default();
        return Err(InvocationError::Template(format!(
            "`{{{{#each {}}}}}` is never closed",
            unclosed
        )));
    }

    Ok(stack.pop().map(|(_, nodes)| nodes).unwrap_or_default())
}

fn push(stack: &mut [(Option<String>, Vec<Node>)], node: Node) {
    if let Some((_, nodes)) = stack.last_mut() {
        nodes.push(node);
    }
}

fn check_path(path: &str) -> Result<String, InvocationError> {
    if path.is_empty() {
        return Err(InvocationError::Template("empty placeholder".to_string()));
    }
    if path.chars().any(char::is_whitespace) || path.split('.').any(str::is_empty) {
        return Err(InvocationError::Template(format!(
            "invalid placeholder `{}`",
            path
        )));
    }
    Ok(path.to_string())
}

/// Collect top-level input names referenced by the nodes, without duplicates
pub(crate) fn collect_roots(nodes: &[Node], names: &mut Vec<String>) {
    collect(nodes, 0, names);
}

fn collect(nodes: &[Node], depth: usize, names: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Var(path) => {
                // Inside a block a bare name usually refers to the element.
                if depth == 0 {
                    add_root(path, names);
                }
            }
            Node::Each { path, body } => {
                if depth == 0 {
                    add_root(path, names);
                }
                collect(body, depth + 1, names);
            }
        }
    }
}

fn add_root(path: &str, names: &mut Vec<String>) {
    let root = path.split('.').next().unwrap_or(path);
    if root != THIS && root != INDEX && !names.iter().any(|n| n == root) {
        names.push(root.to_string());
    }
}

/// Lookup scope: the caller's input, or one element of an `each` block
enum Scope<'a> {
    Root(&'a InvocationInput),
    Item { value: &'a Value, index: usize },
}

pub(crate) fn render(
    nodes: &[Node],
    input: &InvocationInput,
    defaults: &InvocationInput,
) -> Result<String, InvocationError> {
    let mut out = String::new();
    let mut scopes = vec![Scope::Root(input)];
    render_nodes(nodes, &mut scopes, defaults, &mut out)?;
    Ok(out)
}

fn render_nodes<'a>(
    nodes: &'a [Node],
    scopes: &mut Vec<Scope<'a>>,
    defaults: &'a InvocationInput,
    out: &mut String,
) -> Result<(), InvocationError> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(path) if path == INDEX => {
                let index = scopes.iter().rev().find_map(|s| match s {
                    Scope::Item { index, .. } => Some(*index),
                    Scope::Root(_) => None,
                });
                match index {
                    Some(index) => out.push_str(&index.to_string()),
                    None => {
                        return Err(InvocationError::Template(
                            "`{{@index}}` used outside of an each block".to_string(),
                        ))
                    }
                }
            }
            Node::Var(path) => {
                let value = resolve(path, scopes, defaults)?;
                out.push_str(&to_text(value));
            }
            Node::Each { path, body } => {
                let value = resolve(path, scopes, defaults)?;
                let items = value.as_array().ok_or_else(|| {
                    InvocationError::Template(format!(
                        "`{{{{#each {}}}}}` expects a list, got {}",
                        path,
                        type_name(value)
                    ))
                })?;
                for (index, item) in items.iter().enumerate() {
                    scopes.push(Scope::Item { value: item, index });
                    let rendered = render_nodes(body, scopes, defaults, out);
                    scopes.pop();
                    rendered?;
                }
            }
        }
    }
    Ok(())
}

fn resolve<'a>(
    path: &str,
    scopes: &[Scope<'a>],
    defaults: &'a InvocationInput,
) -> Result<&'a Value, InvocationError> {
    let mut segments = path.split('.');
    let first = segments.next().unwrap_or(path);
    let rest: Vec<&str> = segments.collect();

    let found = if first == THIS {
        scopes
            .iter()
            .rev()
            .find_map(|s| match s {
                Scope::Item { value, .. } => Some(*value),
                Scope::Root(_) => None,
            })
            .and_then(|value| descend(value, &rest))
    } else {
        scopes
            .iter()
            .rev()
            .find_map(|s| {
                let base = match *s {
                    Scope::Item { value, .. } => value.get(first),
                    Scope::Root(input) => input.get(first),
                };
                base.filter(|v| !v.is_null())
                    .and_then(|v| descend(v, &rest))
            })
            .or_else(|| defaults.get(first).and_then(|v| descend(v, &rest)))
    };

    found.ok_or_else(|| {
        InvocationError::Template(format!(
            "missing value for placeholder `{}` and no default is defined",
            path
        ))
    })
}

fn descend<'a>(mut value: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    for segment in segments {
        value = match value {
            Value::Object(map) => map.get(*segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    (!value.is_null()).then_some(value)
}

fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PromptTemplate;
    use proptest::prelude::*;
    use serde_json::json;

    fn input(value: Value) -> InvocationInput {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_substitutes_placeholders() {
        let template = PromptTemplate::new("Niche: {{niche}}, audience: {{ audience }}").unwrap();
        let rendered = template
            .render(&input(json!({"niche": "fitness", "audience": "beginners"})))
            .unwrap();
        assert_eq!(rendered, "Niche: fitness, audience: beginners");
    }

    #[test]
    fn test_dotted_paths_and_scalars() {
        let template =
            PromptTemplate::new("@{{profile.handle}} has {{profile.followers}} ({{verified}})")
                .unwrap();
        let rendered = template
            .render(&input(json!({
                "profile": {"handle": "ana.fit", "followers": 1200},
                "verified": true
            })))
            .unwrap();
        assert_eq!(rendered, "@ana.fit has 1200 (true)");
    }

    #[test]
    fn test_each_block_preserves_order() {
        let template =
            PromptTemplate::new("Posts:{{#each posts}}\n{{@index}}. {{this}}{{/each}}").unwrap();
        let rendered = template
            .render(&input(json!({"posts": ["leg day", "meal prep", "rest"]})))
            .unwrap();
        assert_eq!(rendered, "Posts:\n0. leg day\n1. meal prep\n2. rest");
    }

    #[test]
    fn test_each_block_resolves_element_fields_then_outer_scope() {
        let template = PromptTemplate::new(
            "{{#each posts}}[{{platform}}] {{this.caption}} - {{likes}};{{/each}}",
        )
        .unwrap();
        let rendered = template
            .render(&input(json!({
                "platform": "tiktok",
                "posts": [
                    {"caption": "a", "likes": 10},
                    {"caption": "b", "likes": 20, "platform": "reels"}
                ]
            })))
            .unwrap();
        assert_eq!(rendered, "[tiktok] a - 10;[reels] b - 20;");
    }

    #[test]
    fn test_nested_each() {
        let template = PromptTemplate::new(
            "{{#each scenes}}{{name}}:{{#each shots}}({{this}}){{/each}} {{/each}}",
        )
        .unwrap();
        let rendered = template
            .render(&input(json!({
                "scenes": [
                    {"name": "intro", "shots": ["wide", "close"]},
                    {"name": "outro", "shots": []}
                ]
            })))
            .unwrap();
        assert_eq!(rendered, "intro:(wide)(close) outro: ");
    }

    #[test]
    fn test_missing_field_without_default_fails() {
        let template = PromptTemplate::new("Tone: {{tone}}").unwrap();
        let err = template.render(&InvocationInput::new()).unwrap_err();
        assert!(matches!(err, InvocationError::Template(_)));
        assert!(err.to_string().contains("tone"));
    }

    #[test]
    fn test_missing_field_uses_default() {
        let template = PromptTemplate::new("Tone: {{tone}}")
            .unwrap()
            .with_default("tone", "casual");
        assert_eq!(template.render(&InvocationInput::new()).unwrap(), "Tone: casual");

        let rendered = template
            .render(&input(json!({"tone": "bold"})))
            .unwrap();
        assert_eq!(rendered, "Tone: bold");
    }

    #[test]
    fn test_null_counts_as_missing() {
        let template = PromptTemplate::new("{{tone}}").unwrap();
        assert!(template.render(&input(json!({"tone": null}))).is_err());
    }

    #[test]
    fn test_each_over_non_list_fails() {
        let template = PromptTemplate::new("{{#each topics}}{{this}}{{/each}}").unwrap();
        let err = template
            .render(&input(json!({"topics": "gym"})))
            .unwrap_err();
        assert!(err.to_string().contains("expects a list"));
    }

    #[test]
    fn test_objects_render_as_compact_json() {
        let template = PromptTemplate::new("{{metrics}}").unwrap();
        let rendered = template
            .render(&input(json!({"metrics": {"likes": 3}})))
            .unwrap();
        assert_eq!(rendered, r#"{"likes":3}"#);
    }

    #[test]
    fn test_parse_errors() {
        assert!(PromptTemplate::new("Hello {{name").is_err());
        assert!(PromptTemplate::new("{{#each xs}}{{this}}").is_err());
        assert!(PromptTemplate::new("{{/each}}").is_err());
        assert!(PromptTemplate::new("{{}}").is_err());
        assert!(PromptTemplate::new("{{#if x}}y{{/if}}").is_err());
        assert!(PromptTemplate::new("{{two words}}").is_err());
    }

    #[test]
    fn test_placeholders_lists_top_level_fields_once() {
        let template = PromptTemplate::new(
            "{{niche}} {{#each posts}}{{caption}} {{niche}}{{/each}} {{profile.handle}} {{niche}}",
        )
        .unwrap();
        assert_eq!(template.placeholders(), vec!["niche", "posts", "profile"]);
    }

    #[test]
    fn test_render_does_not_touch_input() {
        let template = PromptTemplate::new("{{#each xs}}{{this}}{{/each}}").unwrap();
        let data = input(json!({"xs": [1, 2, 3]}));
        let before = data.clone();
        template.render(&data).unwrap();
        assert_eq!(data, before);
    }

    proptest! {
        #[test]
        fn prop_full_substitution_leaves_no_placeholder(
            fields in prop::collection::btree_map("f[a-z]{0,7}", "[a-zA-Z0-9 ,.!]{0,16}", 1..6)
        ) {
            let source: String = fields
                .keys()
                .map(|k| format!("<{{{{{}}}}}>", k))
                .collect();
            let template = PromptTemplate::new(source).unwrap();
            let data: InvocationInput = fields
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();

            let rendered = template.render(&data).unwrap();
            prop_assert!(!rendered.contains("{{"));
            prop_assert!(!rendered.contains("}}"));
            for value in fields.values() {
                let wrapped = format!("<{}>", value);
                prop_assert!(rendered.contains(&wrapped));
            }
        }

        #[test]
        fn prop_each_block_repeats_once_per_element_in_order(
            items in prop::collection::vec("[a-z]{1,6}", 0..12)
        ) {
            let template = PromptTemplate::new("{{#each items}}[{{this}}]{{/each}}").unwrap();
            let data = input(json!({"items": items.clone()}));

            let rendered = template.render(&data).unwrap();
            let expected: String = items.iter().map(|i| format!("[{}]", i)).collect();
            prop_assert_eq!(rendered.matches('[').count(), items.len());
            prop_assert_eq!(rendered, expected);
        }
    }
}
