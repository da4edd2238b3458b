//! profile_analysis - Scored review of a creator profile

use serde_json::json;

use super::{builtin, Flow};
use crate::domain::entities::{FieldSchema, OutputSchema, SchemaType};
use crate::domain::value_objects::Provider;

const TEMPLATE: &str = "Analyse the social media profile @{{handle}} ({{niche}}).
Followers: {{metrics.followers}}
Average engagement rate: {{metrics.engagement_rate}}%
Recent posts:
{{#each recent_posts}}- \"{{caption}}\" ({{likes}} likes, {{comments}} comments)
{{/each}}
Give the profile a score from 0 to 10, exactly 3 strengths, exactly 3 \
weaknesses and one concrete recommendation for the next 30 days.
Answer with JSON: {\"score\": ..., \"strengths\": [...], \"weaknesses\": [...], \"recommendation\": ...}";

pub(super) fn flow() -> Flow {
    Flow {
        name: "profile_analysis",
        description: "Profile score with three strengths, three weaknesses and a recommendation",
        provider: Provider::Google,
        requires_attachment: false,
        template: builtin(TEMPLATE).with_default("recent_posts", json!([])),
        schema: OutputSchema::new(vec![
            FieldSchema::required("score", SchemaType::number_range(0.0, 10.0)),
            FieldSchema::required(
                "strengths",
                SchemaType::array_exact(SchemaType::string_min(1), 3),
            ),
            FieldSchema::required(
                "weaknesses",
                SchemaType::array_exact(SchemaType::string_min(1), 3),
            ),
            FieldSchema::required("recommendation", SchemaType::string_min(1)),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::InvocationInput;
    use crate::domain::services::validate;

    #[test]
    fn test_renders_nested_metrics_and_posts() {
        let mut input = InvocationInput::new();
        input.insert("handle".into(), json!("chef.ana"));
        input.insert("niche".into(), json!("vegan cooking"));
        input.insert(
            "metrics".into(),
            json!({"followers": 12800, "engagement_rate": 4.2}),
        );
        input.insert(
            "recent_posts".into(),
            json!([{"caption": "Tofu 3 ways", "likes": 540, "comments": 31}]),
        );

        let prompt = flow().template.render(&input).unwrap();
        assert!(prompt.contains("Followers: 12800"));
        assert!(prompt.contains("engagement rate: 4.2%"));
        assert!(prompt.contains("- \"Tofu 3 ways\" (540 likes, 31 comments)"));
    }

    #[test]
    fn test_missing_metrics_is_a_template_error() {
        let mut input = InvocationInput::new();
        input.insert("handle".into(), json!("chef.ana"));
        input.insert("niche".into(), json!("vegan cooking"));

        assert!(flow().template.render(&input).is_err());
    }

    #[test]
    fn test_schema_bounds() {
        let output = json!({
            "score": 12,
            "strengths": ["a", "b", "c"],
            "weaknesses": ["a", "b"],
            "recommendation": "post daily"
        });
        let violations = validate(&flow().schema, &output).unwrap_err();
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["score", "weaknesses"]);
    }
}
