use actix_files::Files;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use futures::future;
use log::{error, info};
use serde::Serialize;
use serde_json::json;
use shared::{data_url, AnalysisRequest, ValidationError};

use crate::llm::{AnalysisMode, OpenAiService};

/// Which prompt-and-schema pair the endpoint runs with. One configurable
/// pair; no per-request switching.
#[derive(Clone)]
pub struct AnalysisSettings {
    pub mode: AnalysisMode,
    pub system_prompt: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Something went wrong while analyzing the files.")]
    Analysis,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Analysis => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/analyze").route(web::post().to(handle_analyze)))
        .service(web::resource("/api/health").route(web::get().to(health)));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Validates the submission, decodes every file, and issues exactly one
/// provider call. Decode failures and provider failures both surface as the
/// same generic error; no provider detail reaches the client.
async fn handle_analyze(
    service: web::Data<OpenAiService>,
    settings: web::Data<AnalysisSettings>,
    request: web::Json<AnalysisRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;

    info!("Analyzing {} uploaded file(s)", request.files.len());

    // All-or-nothing decode; nothing is sent to the provider if any file fails.
    let images = future::try_join_all(request.files.iter().map(|file| async move {
        data_url::decode(&file.data_url).map_err(|e| {
            error!("Failed to decode uploaded file '{}': {}", file.name, e);
            ApiError::Analysis
        })
    }))
    .await?;

    let outcome = service
        .analyze(
            &settings.system_prompt,
            &images,
            request.temperature,
            settings.mode,
        )
        .await
        .map_err(|e| {
            error!("Analysis request failed: {}", e);
            ApiError::Analysis
        })?;

    Ok(HttpResponse::Ok().json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use shared::{Analysis, AnalysisOutcome, UploadedFile};
    use wiremock::matchers::{method, path};
    use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

    macro_rules! test_app {
        ($server:expr, $mode:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(OpenAiService::new(
                        "test-key".into(),
                        $server.uri(),
                        "gpt-4o-mini".into(),
                    )))
                    .app_data(web::Data::new(AnalysisSettings {
                        mode: $mode,
                        system_prompt: "Judge the profile.".into(),
                    }))
                    .configure(configure_api),
            )
            .await
        };
    }

    fn png(name: &str, bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            name: name.into(),
            data_url: data_url::encode("image/png", bytes),
        }
    }

    fn sample_analysis() -> Analysis {
        Analysis {
            letter_grade: "A-".into(),
            overall_score_out_of_100: 88.0,
            follower_to_following_letter_grade: "B".into(),
            micro_genre: "sunset minimalist".into(),
            genre_emoji: "🌇".into(),
            full_analysis_text: "Strong grid, questionable boomerangs.".into(),
        }
    }

    fn chat_response(content: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": content } }
            ]
        }))
    }

    /// Matches a chat completion whose user turn carries exactly these image
    /// URLs in order, with the given temperature (or none at all).
    struct ExpectsImages {
        urls: Vec<String>,
        temperature: Option<f64>,
    }

    impl Match for ExpectsImages {
        fn matches(&self, request: &Request) -> bool {
            let body: serde_json::Value = match serde_json::from_slice(&request.body) {
                Ok(v) => v,
                Err(_) => return false,
            };
            let Some(parts) = body["messages"][1]["content"].as_array() else {
                return false;
            };
            if parts.len() != self.urls.len() {
                return false;
            }
            for (part, url) in parts.iter().zip(&self.urls) {
                if part["type"].as_str() != Some("image_url")
                    || part["image_url"]["url"].as_str() != Some(url)
                {
                    return false;
                }
            }
            match self.temperature {
                Some(t) => body["temperature"]
                    .as_f64()
                    .is_some_and(|v| (v - t).abs() < 1e-6),
                None => body.get("temperature").is_none(),
            }
        }
    }

    #[actix_web::test]
    async fn empty_file_list_is_rejected_before_any_provider_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        let app = test_app!(server, AnalysisMode::Structured);

        let req = test::TestRequest::post()
            .uri("/api/analyze")
            .set_json(AnalysisRequest::new(vec![], None))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn structured_mode_forwards_images_in_order_and_returns_the_object() {
        let server = MockServer::start().await;
        let a = png("a.png", b"first image");
        let b = png("b.png", b"second image");
        let analysis = sample_analysis();

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(ExpectsImages {
                urls: vec![a.data_url.clone(), b.data_url.clone()],
                temperature: None,
            })
            .respond_with(chat_response(&serde_json::to_string(&analysis).unwrap()))
            .expect(1)
            .mount(&server)
            .await;
        let app = test_app!(server, AnalysisMode::Structured);

        let req = test::TestRequest::post()
            .uri("/api/analyze")
            .set_json(AnalysisRequest::new(vec![a, b], None))
            .to_request();
        let outcome: AnalysisOutcome = test::call_and_read_body_json(&app, req).await;

        assert_eq!(outcome, AnalysisOutcome::Structured(analysis));
    }

    #[actix_web::test]
    async fn temperature_passes_through_unmodified() {
        let server = MockServer::start().await;
        let file = png("a.png", b"pixels");

        Mock::given(method("POST"))
            .and(ExpectsImages {
                urls: vec![file.data_url.clone()],
                temperature: Some(0.25),
            })
            .respond_with(chat_response(
                &serde_json::to_string(&sample_analysis()).unwrap(),
            ))
            .expect(1)
            .mount(&server)
            .await;
        let app = test_app!(server, AnalysisMode::Structured);

        let req = test::TestRequest::post()
            .uri("/api/analyze")
            .set_json(AnalysisRequest::new(vec![file], Some(0.25)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn text_mode_returns_the_raw_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(chat_response("honestly? strong aesthetic, weak bios."))
            .expect(1)
            .mount(&server)
            .await;
        let app = test_app!(server, AnalysisMode::Text);

        let req = test::TestRequest::post()
            .uri("/api/analyze")
            .set_json(AnalysisRequest::new(vec![png("a.png", b"pixels")], None))
            .to_request();
        let outcome: AnalysisOutcome = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            outcome,
            AnalysisOutcome::Text("honestly? strong aesthetic, weak bios.".into())
        );
    }

    #[actix_web::test]
    async fn undecodable_file_fails_without_reaching_the_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        let app = test_app!(server, AnalysisMode::Structured);

        let bad = UploadedFile {
            name: "a.png".into(),
            data_url: "not a data url".into(),
        };
        let req = test::TestRequest::post()
            .uri("/api/analyze")
            .set_json(AnalysisRequest::new(vec![bad], None))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn provider_failure_surfaces_as_a_generic_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited, key sk-123"))
            .mount(&server)
            .await;
        let app = test_app!(server, AnalysisMode::Structured);

        let req = test::TestRequest::post()
            .uri("/api/analyze")
            .set_json(AnalysisRequest::new(vec![png("a.png", b"pixels")], None))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let message = body["error"].as_str().unwrap();
        assert!(!message.contains("sk-123"));
        assert!(!message.contains("rate limited"));
    }

    #[actix_web::test]
    async fn health_endpoint_reports_ok() {
        let server = MockServer::start().await;
        let app = test_app!(server, AnalysisMode::Structured);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
    }
}
