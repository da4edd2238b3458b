//! content_ideas - Five post ideas for a creator's niche

use serde_json::json;

use super::{builtin, Flow};
use crate::domain::entities::{FieldSchema, OutputSchema, SchemaType};
use crate::domain::value_objects::Provider;

const TEMPLATE: &str = "You are a social media strategist helping a content creator.
Niche: {{niche}}
Target audience: {{audience}}
Platform: {{platform}}
Tone: {{tone}}
Topics already covered recently (avoid repeating them):
{{#each recent_topics}}- {{this}}
{{/each}}
Suggest exactly 5 fresh content ideas. For each idea give a short title, \
the opening hook (first sentence the viewer hears) and the best format \
(reel, carousel, story, live or long video).
Answer with JSON: {\"ideas\": [{\"title\": ..., \"hook\": ..., \"format\": ...}]}";

pub(super) fn flow() -> Flow {
    Flow {
        name: "content_ideas",
        description: "Five content ideas with hook and format for a niche and audience",
        provider: Provider::Google,
        requires_attachment: false,
        template: builtin(TEMPLATE)
            .with_default("tone", "friendly and energetic")
            .with_default("recent_topics", json!([])),
        schema: OutputSchema::new(vec![FieldSchema::required(
            "ideas",
            SchemaType::array_exact(
                SchemaType::object(vec![
                    FieldSchema::required("title", SchemaType::string_min(1)),
                    FieldSchema::required("hook", SchemaType::string_min(1)),
                    FieldSchema::required("format", SchemaType::string_min(1)),
                ]),
                5,
            ),
        )
        .describe("exactly five ideas")]),
    }
}
