//! collaboration_ideas - Joint content ideas for two creators
//!
//! Models answer with either plain strings or `{idea: ...}` objects; both
//! are accepted and collapsed to strings.

use super::{builtin, Flow};
use crate::domain::entities::{FieldSchema, Normalization, OutputSchema, SchemaType};
use crate::domain::value_objects::Provider;

const TEMPLATE: &str = "Two creators want to collaborate.
Creator A niche: {{niche}}
Creator B niche: {{partner_niche}}
Suggest 3 to 6 collaboration ideas that make sense for both audiences.
Answer with JSON: {\"ideas\": [\"...\"]}";

pub(super) fn flow() -> Flow {
    Flow {
        name: "collaboration_ideas",
        description: "Collaboration ideas for two creators' niches",
        provider: Provider::OpenAI,
        requires_attachment: false,
        template: builtin(TEMPLATE),
        schema: OutputSchema::new(vec![FieldSchema::required(
            "ideas",
            SchemaType::array_between(
                SchemaType::one_of(vec![
                    SchemaType::string_min(1),
                    SchemaType::object(vec![FieldSchema::required(
                        "idea",
                        SchemaType::string_min(1),
                    )]),
                ]),
                3,
                6,
            ),
        )
        .normalized(Normalization::UnwrapKey("idea".to_string()))]),
    }
}
