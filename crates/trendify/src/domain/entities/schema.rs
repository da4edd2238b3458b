//! OutputSchema - Declarative description of the expected model output
//!
//! Schemas are explicit field-descriptor tables; the validator in
//! `domain::services::validation` walks them against parsed JSON.

use serde_json::{json, Map, Value};

/// Structural type of a value, with its constraints
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType {
    String {
        min_len: Option<usize>,
        max_len: Option<usize>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Boolean,
    /// String restricted to one of the listed values
    Enum(Vec<String>),
    Array {
        items: Box<SchemaType>,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },
    Object(Vec<FieldSchema>),
    /// Any of the listed shapes is accepted (pair with a [`Normalization`])
    OneOf(Vec<SchemaType>),
}

impl SchemaType {
    pub fn string() -> Self {
        Self::String {
            min_len: None,
            max_len: None,
        }
    }

    pub fn string_min(min_len: usize) -> Self {
        Self::String {
            min_len: Some(min_len),
            max_len: None,
        }
    }

    pub fn number() -> Self {
        Self::Number {
            min: None,
            max: None,
        }
    }

    pub fn number_range(min: f64, max: f64) -> Self {
        Self::Number {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn integer() -> Self {
        Self::Integer {
            min: None,
            max: None,
        }
    }

    pub fn integer_range(min: i64, max: i64) -> Self {
        Self::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn boolean() -> Self {
        Self::Boolean
    }

    pub fn enumeration(values: &[&str]) -> Self {
        Self::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    pub fn array_of(items: SchemaType) -> Self {
        Self::Array {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        }
    }

    pub fn array_exact(items: SchemaType, len: usize) -> Self {
        Self::array_between(items, len, len)
    }

    pub fn array_between(items: SchemaType, min_items: usize, max_items: usize) -> Self {
        Self::Array {
            items: Box::new(items),
            min_items: Some(min_items),
            max_items: Some(max_items),
        }
    }

    pub fn object(fields: Vec<FieldSchema>) -> Self {
        Self::Object(fields)
    }

    pub fn one_of(types: Vec<SchemaType>) -> Self {
        Self::OneOf(types)
    }

    /// JSON Schema rendition, used as a shape hint for the model
    pub fn to_json_schema(&self) -> Value {
        match self {
            SchemaType::String { min_len, max_len } => {
                let mut schema = json!({"type": "string"});
                if let Some(min) = min_len {
                    schema["minLength"] = json!(min);
                }
                if let Some(max) = max_len {
                    schema["maxLength"] = json!(max);
                }
                schema
            }
            SchemaType::Number { min, max } => {
                let mut schema = json!({"type": "number"});
                if let Some(min) = min {
                    schema["minimum"] = json!(min);
                }
                if let Some(max) = max {
                    schema["maximum"] = json!(max);
                }
                schema
            }
            SchemaType::Integer { min, max } => {
                let mut schema = json!({"type": "integer"});
                if let Some(min) = min {
                    schema["minimum"] = json!(min);
                }
                if let Some(max) = max {
                    schema["maximum"] = json!(max);
                }
                schema
            }
            SchemaType::Boolean => json!({"type": "boolean"}),
            SchemaType::Enum(values) => json!({"type": "string", "enum": values}),
            SchemaType::Array {
                items,
                min_items,
                max_items,
            } => {
                let mut schema = json!({"type": "array", "items": items.to_json_schema()});
                if let Some(min) = min_items {
                    schema["minItems"] = json!(min);
                }
                if let Some(max) = max_items {
                    schema["maxItems"] = json!(max);
                }
                schema
            }
            SchemaType::Object(fields) => object_json_schema(fields),
            SchemaType::OneOf(types) => {
                json!({"anyOf": types.iter().map(|t| t.to_json_schema()).collect::<Vec<_>>()})
            }
        }
    }
}

/// Rule collapsing an accepted union shape into the canonical one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalization {
    /// `{key: x}` becomes `x`; anything else is left as is.
    /// Applied element-wise when the field holds an array.
    UnwrapKey(String),
}

/// One named field of an object schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub ty: SchemaType,
    pub required: bool,
    pub description: Option<String>,
    pub normalize: Option<Normalization>,
}

impl FieldSchema {
    pub fn required(name: impl Into<String>, ty: SchemaType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: true,
            description: None,
            normalize: None,
        }
    }

    pub fn optional(name: impl Into<String>, ty: SchemaType) -> Self {
        Self {
            required: false,
            ..Self::required(name, ty)
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn normalized(mut self, rule: Normalization) -> Self {
        self.normalize = Some(rule);
        self
    }
}

/// Top-level schema: the model must answer with a JSON object
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    fields: Vec<FieldSchema>,
}

impl OutputSchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn to_json_schema(&self) -> Value {
        object_json_schema(&self.fields)
    }
}

fn object_json_schema(fields: &[FieldSchema]) -> Value {
    let mut properties = Map::new();
    for field in fields {
        let mut schema = field.ty.to_json_schema();
        if let Some(description) = &field.description {
            schema["description"] = json!(description);
        }
        properties.insert(field.name.clone(), schema);
    }

    let required: Vec<&str> = fields
        .iter()
        .filter(|f| f.required)
        .map(|f| f.name.as_str())
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_rendition() {
        let schema = OutputSchema::new(vec![
            FieldSchema::required("x", SchemaType::array_exact(SchemaType::string(), 3))
                .describe("three hooks"),
            FieldSchema::optional("mood", SchemaType::enumeration(&["calm", "hype"])),
        ]);

        let rendered = schema.to_json_schema();
        assert_eq!(rendered["type"], "object");
        assert_eq!(rendered["required"], json!(["x"]));
        assert_eq!(rendered["properties"]["x"]["minItems"], 3);
        assert_eq!(rendered["properties"]["x"]["maxItems"], 3);
        assert_eq!(rendered["properties"]["x"]["description"], "three hooks");
        assert_eq!(rendered["properties"]["mood"]["enum"], json!(["calm", "hype"]));
    }

    #[test]
    fn test_one_of_renders_any_of() {
        let ty = SchemaType::one_of(vec![
            SchemaType::string(),
            SchemaType::object(vec![FieldSchema::required("idea", SchemaType::string())]),
        ]);
        let rendered = ty.to_json_schema();
        assert_eq!(rendered["anyOf"].as_array().map(|a| a.len()), Some(2));
    }
}
