//! Normalization of accepted union shapes
//!
//! Runs after validation. Each field with a [`Normalization`] rule is
//! rewritten in place; array values are rewritten element by element so
//! order is preserved.

use serde_json::{Map, Value};

use crate::domain::entities::{FieldSchema, Normalization, OutputSchema, SchemaType};

pub fn normalize(schema: &OutputSchema, value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            normalize_fields(schema.fields(), &mut map);
            Value::Object(map)
        }
        other => other,
    }
}

fn normalize_fields(fields: &[FieldSchema], map: &mut Map<String, Value>) {
    for field in fields {
        let Some(slot) = map.get_mut(&field.name) else {
            continue;
        };

        if let SchemaType::Object(nested) = &field.ty {
            if let Value::Object(inner) = &mut *slot {
                normalize_fields(nested, inner);
            }
        }
        if let SchemaType::Array { items, .. } = &field.ty {
            if let (SchemaType::Object(nested), Value::Array(elements)) = (items.as_ref(), &mut *slot)
            {
                for element in elements.iter_mut() {
                    if let Value::Object(inner) = element {
                        normalize_fields(nested, inner);
                    }
                }
            }
        }

        if let Some(rule) = &field.normalize {
            let current = slot.take();
            *slot = match current {
                Value::Array(elements) => {
                    Value::Array(elements.into_iter().map(|e| apply(rule, e)).collect())
                }
                other => apply(rule, other),
            };
        }
    }
}

fn apply(rule: &Normalization, value: Value) -> Value {
    match rule {
        Normalization::UnwrapKey(key) => match value {
            Value::Object(mut map) if map.contains_key(key) => {
                map.remove(key).unwrap_or(Value::Null)
            }
            other => other,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn idea_schema() -> OutputSchema {
        OutputSchema::new(vec![FieldSchema::required(
            "ideas",
            SchemaType::array_of(SchemaType::one_of(vec![
                SchemaType::string(),
                SchemaType::object(vec![FieldSchema::required("idea", SchemaType::string())]),
            ])),
        )
        .normalized(Normalization::UnwrapKey("idea".to_string()))])
    }

    #[test]
    fn test_mixed_list_collapses_to_strings_in_order() {
        let value = json!({"ideas": ["duet challenge", {"idea": "gym swap"}, "live Q&A", {"idea": "recipe remix"}]});
        let normalized = normalize(&idea_schema(), value);
        assert_eq!(
            normalized,
            json!({"ideas": ["duet challenge", "gym swap", "live Q&A", "recipe remix"]})
        );
    }

    #[test]
    fn test_single_value_field() {
        let schema = OutputSchema::new(vec![FieldSchema::required(
            "headline",
            SchemaType::one_of(vec![
                SchemaType::string(),
                SchemaType::object(vec![FieldSchema::required("text", SchemaType::string())]),
            ]),
        )
        .normalized(Normalization::UnwrapKey("text".to_string()))]);

        let normalized = normalize(&schema, json!({"headline": {"text": "Go viral"}, "other": 1}));
        assert_eq!(normalized, json!({"headline": "Go viral", "other": 1}));
    }

    #[test]
    fn test_nested_rules_inside_array_of_objects() {
        let schema = OutputSchema::new(vec![FieldSchema::required(
            "scenes",
            SchemaType::array_of(SchemaType::object(vec![FieldSchema::required(
                "voiceover",
                SchemaType::string(),
            )
            .normalized(Normalization::UnwrapKey("line".to_string()))])),
        )]);

        let normalized = normalize(
            &schema,
            json!({"scenes": [{"voiceover": {"line": "hi"}}, {"voiceover": "bye"}]}),
        );
        assert_eq!(
            normalized,
            json!({"scenes": [{"voiceover": "hi"}, {"voiceover": "bye"}]})
        );
    }

    #[test]
    fn test_untouched_without_rules() {
        let schema = OutputSchema::new(vec![FieldSchema::required("a", SchemaType::string())]);
        let value = json!({"a": {"idea": "x"}});
        assert_eq!(normalize(&schema, value.clone()), value);
    }
}
