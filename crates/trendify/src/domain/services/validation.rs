//! Schema validation
//!
//! Walks an [`OutputSchema`] against parsed JSON and reports every
//! violation. Validation is all-or-nothing: nothing is defaulted or
//! filled in.

use serde_json::Value;

use crate::domain::entities::{FieldSchema, OutputSchema, SchemaType};
use crate::domain::errors::Violation;
use crate::domain::services::template::type_name;

const ROOT: &str = "$";

pub fn validate(schema: &OutputSchema, value: &Value) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    match value {
        Value::Object(_) => check_fields(schema.fields(), value, "", &mut violations),
        other => violations.push(Violation::new(
            ROOT,
            format!("expected an object, got {}", type_name(other)),
        )),
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_fields(fields: &[FieldSchema], object: &Value, parent: &str, out: &mut Vec<Violation>) {
    for field in fields {
        let path = join(parent, &field.name);
        match object.get(&field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    out.push(Violation::new(path, "required field is missing"));
                }
            }
            Some(value) => check(&field.ty, value, &path, out),
        }
    }
}

fn check(ty: &SchemaType, value: &Value, path: &str, out: &mut Vec<Violation>) {
    match ty {
        SchemaType::String { min_len, max_len } => {
            let Some(s) = value.as_str() else {
                return out.push(mismatch(path, "string", value));
            };
            let len = s.chars().count();
            if let Some(min) = min_len {
                if len < *min {
                    out.push(Violation::new(
                        path,
                        format!("expected at least {} characters, got {}", min, len),
                    ));
                }
            }
            if let Some(max) = max_len {
                if len > *max {
                    out.push(Violation::new(
                        path,
                        format!("expected at most {} characters, got {}", max, len),
                    ));
                }
            }
        }
        SchemaType::Number { min, max } => {
            let Some(n) = value.as_f64() else {
                return out.push(mismatch(path, "number", value));
            };
            check_range(n, *min, *max, path, out);
        }
        SchemaType::Integer { min, max } => {
            let Some(n) = as_integer(value) else {
                return out.push(mismatch(path, "integer", value));
            };
            check_range(
                n as f64,
                min.map(|m| m as f64),
                max.map(|m| m as f64),
                path,
                out,
            );
        }
        SchemaType::Boolean => {
            if !value.is_boolean() {
                out.push(mismatch(path, "boolean", value));
            }
        }
        SchemaType::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.iter().any(|a| a == s) => {}
            Some(s) => out.push(Violation::new(
                path,
                format!("`{}` is not one of [{}]", s, allowed.join(", ")),
            )),
            None => out.push(mismatch(path, "string", value)),
        },
        SchemaType::Array {
            items,
            min_items,
            max_items,
        } => {
            let Some(elements) = value.as_array() else {
                return out.push(mismatch(path, "array", value));
            };
            let len = elements.len();
            match (min_items, max_items) {
                (Some(min), Some(max)) if min == max && len != *min => {
                    out.push(Violation::new(
                        path,
                        format!("expected exactly {} items, got {}", min, len),
                    ));
                }
                _ => {
                    if let Some(min) = min_items {
                        if len < *min {
                            out.push(Violation::new(
                                path,
                                format!("expected at least {} items, got {}", min, len),
                            ));
                        }
                    }
                    if let Some(max) = max_items {
                        if len > *max {
                            out.push(Violation::new(
                                path,
                                format!("expected at most {} items, got {}", max, len),
                            ));
                        }
                    }
                }
            }
            for (i, element) in elements.iter().enumerate() {
                check(items, element, &format!("{}[{}]", path, i), out);
            }
        }
        SchemaType::Object(fields) => {
            if !value.is_object() {
                return out.push(mismatch(path, "object", value));
            }
            check_fields(fields, value, path, out);
        }
        SchemaType::OneOf(types) => {
            let matches = types.iter().any(|t| {
                let mut scratch = Vec::new();
                check(t, value, path, &mut scratch);
                scratch.is_empty()
            });
            if !matches {
                out.push(Violation::new(
                    path,
                    format!(
                        "{} does not match any accepted shape",
                        type_name(value)
                    ),
                ));
            }
        }
    }
}

fn check_range(n: f64, min: Option<f64>, max: Option<f64>, path: &str, out: &mut Vec<Violation>) {
    if let Some(min) = min {
        if n < min {
            out.push(Violation::new(path, format!("{} is below minimum {}", n, min)));
        }
    }
    if let Some(max) = max {
        if n > max {
            out.push(Violation::new(path, format!("{} is above maximum {}", n, max)));
        }
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn mismatch(path: &str, expected: &str, value: &Value) -> Violation {
    Violation::new(
        path,
        format!("expected {}, got {}", expected, type_name(value)),
    )
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.path.as_str()).collect()
    }

    #[test]
    fn test_array_of_exactly_three_strings() {
        let schema = OutputSchema::new(vec![FieldSchema::required(
            "x",
            SchemaType::array_exact(SchemaType::string(), 3),
        )]);

        assert!(validate(&schema, &json!({"x": ["a", "b", "c"]})).is_ok());

        let violations = validate(&schema, &json!({"x": ["a", "b"]})).unwrap_err();
        assert_eq!(paths(&violations), vec!["x"]);
        assert!(violations[0].message.contains("exactly 3"));
    }

    #[test]
    fn test_reports_every_violation() {
        let schema = OutputSchema::new(vec![
            FieldSchema::required("title", SchemaType::string_min(10)),
            FieldSchema::required("score", SchemaType::number_range(0.0, 10.0)),
            FieldSchema::required("risk", SchemaType::enumeration(&["low", "medium", "high"])),
            FieldSchema::required("tags", SchemaType::array_of(SchemaType::string())),
            FieldSchema::optional("note", SchemaType::string()),
        ]);

        let violations = validate(
            &schema,
            &json!({"title": "short", "score": 11, "risk": "extreme", "tags": ["ok", 3]}),
        )
        .unwrap_err();

        assert_eq!(paths(&violations), vec!["title", "score", "risk", "tags[1]"]);
    }

    #[test]
    fn test_required_and_null() {
        let schema = OutputSchema::new(vec![
            FieldSchema::required("a", SchemaType::string()),
            FieldSchema::optional("b", SchemaType::string()),
        ]);
        let violations = validate(&schema, &json!({"a": null, "b": null})).unwrap_err();
        assert_eq!(paths(&violations), vec!["a"]);
        assert_eq!(violations[0].message, "required field is missing");
    }

    #[test]
    fn test_nested_object_paths() {
        let schema = OutputSchema::new(vec![FieldSchema::required(
            "scenes",
            SchemaType::array_of(SchemaType::object(vec![
                FieldSchema::required("description", SchemaType::string()),
                FieldSchema::required("seconds", SchemaType::integer()),
            ])),
        )]);

        let violations = validate(
            &schema,
            &json!({"scenes": [
                {"description": "intro", "seconds": 5},
                {"description": 3, "seconds": 2.5}
            ]}),
        )
        .unwrap_err();
        assert_eq!(
            paths(&violations),
            vec!["scenes[1].description", "scenes[1].seconds"]
        );
    }

    #[test]
    fn test_integer_accepts_whole_floats() {
        let schema =
            OutputSchema::new(vec![FieldSchema::required("n", SchemaType::integer_range(1, 5))]);
        assert!(validate(&schema, &json!({"n": 3.0})).is_ok());
        assert!(validate(&schema, &json!({"n": 6})).is_err());
    }

    #[test]
    fn test_one_of_union_shapes() {
        let schema = OutputSchema::new(vec![FieldSchema::required(
            "ideas",
            SchemaType::array_of(SchemaType::one_of(vec![
                SchemaType::string(),
                SchemaType::object(vec![FieldSchema::required("idea", SchemaType::string())]),
            ])),
        )]);

        assert!(validate(&schema, &json!({"ideas": ["a", {"idea": "b"}]})).is_ok());

        let violations = validate(&schema, &json!({"ideas": ["a", {"title": "b"}, 4]})).unwrap_err();
        assert_eq!(paths(&violations), vec!["ideas[1]", "ideas[2]"]);
    }

    #[test]
    fn test_root_must_be_object() {
        let schema = OutputSchema::new(vec![]);
        let violations = validate(&schema, &json!([1, 2])).unwrap_err();
        assert_eq!(paths(&violations), vec!["$"]);
    }

    #[test]
    fn test_unknown_keys_are_accepted() {
        let schema = OutputSchema::new(vec![FieldSchema::required("score", SchemaType::number())]);
        assert!(validate(&schema, &json!({"score": 7, "extra": "ignored"})).is_ok());
    }
}
