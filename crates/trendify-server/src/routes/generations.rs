//! Generation Routes - Saved results per user

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::{ApiError, ErrorResponse, GenerationResponse};
use crate::AppState;

const MAX_HISTORY: i64 = 50;

#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Maximum number of records (1-50, default 50)
    pub limit: Option<i64>,
}

/// List a user's generations, newest first
#[utoipa::path(
    get,
    path = "/trendify/users/{user_id}/generations",
    params(
        ("user_id" = String, Path, description = "User ID"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "Saved generations", body = Vec<GenerationResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Generation"
)]
pub async fn list_generations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<GenerationResponse>>, ApiError> {
    let limit = query.limit.unwrap_or(MAX_HISTORY).clamp(1, MAX_HISTORY);

    let records = state
        .generation_service
        .history(&user_id, limit)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(
        records
            .into_iter()
            .map(GenerationResponse::from_domain)
            .collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/trendify/users/:user_id/generations", get(list_generations))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{canned_invoker, read_json, test_state, IDEAS_REPLY};
    use axum::{body::Body, http::Request, http::StatusCode};
    use serde_json::json;
    use tower::ServiceExt;
    use trendify::{InvocationInput, Provider};

    #[tokio::test]
    async fn test_history_newest_first() {
        let (_, state) = test_state(None, vec![canned_invoker(Provider::OpenAI, IDEAS_REPLY)]);

        for niche in ["first", "second"] {
            let mut input = InvocationInput::new();
            input.insert("niche".into(), json!(niche));
            input.insert("partner_niche".into(), json!("cooking"));
            state
                .generation_service
                .generate("collaboration_ideas", Some("u1"), input, vec![])
                .await
                .unwrap();
        }

        let response = crate::app(state)
            .oneshot(
                Request::get("/trendify/users/u1/generations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["input"]["niche"], "second");
        assert_eq!(records[1]["input"]["niche"], "first");
    }

    #[tokio::test]
    async fn test_unknown_user_has_empty_history() {
        let (_, state) = test_state(None, vec![]);
        let response = crate::app(state)
            .oneshot(
                Request::get("/trendify/users/nobody/generations?limit=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!([]));
    }
}
