//! video_review - Retention review of an uploaded video

use super::{builtin, Flow};
use crate::domain::entities::{FieldSchema, OutputSchema, SchemaType};
use crate::domain::value_objects::Provider;

const TEMPLATE: &str = "Watch the attached video. It was made for {{platform}} with this goal: {{goal}}.
Rate it from 0 to 10, estimate the risk that viewers drop off early \
(low, medium or high) and list between 1 and 5 concrete improvements.
Answer with JSON: {\"overall_score\": ..., \"retention_risk\": ..., \"improvements\": [...]}";

pub(super) fn flow() -> Flow {
    Flow {
        name: "video_review",
        description: "Score, retention risk and improvements for an uploaded video",
        provider: Provider::Google,
        requires_attachment: true,
        template: builtin(TEMPLATE),
        schema: OutputSchema::new(vec![
            FieldSchema::required("overall_score", SchemaType::number_range(0.0, 10.0)),
            FieldSchema::required(
                "retention_risk",
                SchemaType::enumeration(&["low", "medium", "high"]),
            ),
            FieldSchema::required(
                "improvements",
                SchemaType::array_between(SchemaType::string_min(1), 1, 5),
            ),
        ]),
    }
}
