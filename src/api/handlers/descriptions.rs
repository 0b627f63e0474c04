use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::descriptions::{DescriptionRequest, DescriptionResponse},
    errors::Error,
};

/// Describe the objects in an uploaded image
#[utoipa::path(
    post,
    path = "/api/generate-description",
    request_body = DescriptionRequest,
    tag = "descriptions",
    responses(
        (status = 200, description = "Short description of detected objects", body = DescriptionResponse),
        (status = 400, description = "Missing or undecodable image"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn generate_description(
    State(state): State<AppState>,
    Json(request): Json<DescriptionRequest>,
) -> Result<Json<DescriptionResponse>, Error> {
    let Some(image) = request.image else {
        return Err(Error::BadRequest {
            message: "image is required".to_string(),
        });
    };

    let description = state.describer.describe(&image).await?;

    Ok(Json(DescriptionResponse { description }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_config, create_test_state};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use sqlx::PgPool;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn descriptions_server(pool: PgPool, vision_endpoint: &str, translation_endpoint: &str) -> TestServer {
        let mut config = create_test_config();
        config.vision.endpoint = vision_endpoint.parse().unwrap();
        config.translation.endpoint = translation_endpoint.parse().unwrap();
        let state = create_test_state(pool, config);
        let app = axum::Router::new()
            .route("/api/generate-description", axum::routing::post(generate_description))
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_generate_description_missing_image(pool: PgPool) {
        let server = descriptions_server(pool, "http://127.0.0.1:1", "http://127.0.0.1:1");

        let response = server.post("/api/generate-description").json(&serde_json::json!({})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_generate_description_end_to_end(pool: PgPool) {
        let vision = MockServer::start().await;
        let translation = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "responses": [{
                    "labelAnnotations": [
                        {"description": "Glove", "score": 0.97},
                        {"description": "Hand", "score": 0.88},
                    ]
                }]
            })))
            .mount(&vision)
            .await;

        Mock::given(method("POST"))
            .and(path("/language/translate/v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "translations": [
                    {"translatedText": "장갑"},
                    {"translatedText": "손"},
                ]}
            })))
            .mount(&translation)
            .await;

        let server = descriptions_server(pool, &vision.uri(), &translation.uri());

        let response = server
            .post("/api/generate-description")
            .json(&serde_json::json!({"image": "data:image/png;base64,aGVsbG8="}))
            .await;
        response.assert_status_ok();
        let body: DescriptionResponse = response.json();
        assert_eq!(body.description, "장갑, 손");
    }
}
