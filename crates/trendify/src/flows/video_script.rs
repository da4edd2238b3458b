//! video_script - Scene-by-scene short video script

use serde_json::json;

use super::{builtin, Flow};
use crate::domain::entities::{FieldSchema, OutputSchema, SchemaType};
use crate::domain::value_objects::Provider;

const TEMPLATE: &str = "Write a script for a {{duration_seconds}}-second {{platform}} video about: {{topic}}.
Key points to cover, in this order:
{{#each key_points}}{{@index}}. {{this}}
{{/each}}
Start with a strong hook of at least one full sentence. Split the video into \
3 to 8 scenes; for each scene describe what is shown and the voiceover line. \
Finish with a call to action.
Answer with JSON: {\"title\": ..., \"hook\": ..., \"scenes\": [{\"description\": ..., \"voiceover\": ...}], \"call_to_action\": ...}";

pub(super) fn flow() -> Flow {
    Flow {
        name: "video_script",
        description: "Short video script with hook, scenes and call to action",
        provider: Provider::Google,
        requires_attachment: false,
        template: builtin(TEMPLATE)
            .with_default("duration_seconds", 60)
            .with_default("key_points", json!([])),
        schema: OutputSchema::new(vec![
            FieldSchema::required("title", SchemaType::string_min(1)),
            FieldSchema::required("hook", SchemaType::string_min(10)),
            FieldSchema::required(
                "scenes",
                SchemaType::array_between(
                    SchemaType::object(vec![
                        FieldSchema::required("description", SchemaType::string_min(1)),
                        FieldSchema::required("voiceover", SchemaType::string()),
                    ]),
                    3,
                    8,
                ),
            ),
            FieldSchema::required("call_to_action", SchemaType::string_min(1)),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::InvocationInput;
    use crate::domain::services::validate;

    #[test]
    fn test_numbers_key_points() {
        let mut input = InvocationInput::new();
        input.insert("topic".into(), json!("meal prep"));
        input.insert("platform".into(), json!("youtube shorts"));
        input.insert("duration_seconds".into(), json!(45));
        input.insert("key_points".into(), json!(["shop", "cook", "store"]));

        let prompt = flow().template.render(&input).unwrap();
        assert!(prompt.starts_with("Write a script for a 45-second youtube shorts video"));
        assert!(prompt.contains("0. shop\n1. cook\n2. store\n"));
    }

    #[test]
    fn test_short_hook_is_rejected() {
        let scene = json!({"description": "kitchen", "voiceover": "let's go"});
        let output = json!({
            "title": "Prep",
            "hook": "Hi!",
            "scenes": [scene.clone(), scene.clone(), scene],
            "call_to_action": "Follow"
        });

        let violations = validate(&flow().schema, &output).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "hook");
    }
}
