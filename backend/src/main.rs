mod llm;
mod routes;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use llm::{AnalysisMode, OpenAiService};
use routes::{configure_routes, AnalysisSettings};
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let frontend_dir = if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        format!("{}/../frontend/dist", manifest_dir)
    } else {
        "/usr/src/app/frontend/dist".to_string()
    };

    let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
        std::io::Error::other("OPENAI_API_KEY is not set; the analysis endpoint cannot start")
    })?;
    let base_url =
        env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
    let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

    let mode = match env::var("ANALYSIS_MODE") {
        Ok(raw) => raw
            .parse::<AnalysisMode>()
            .map_err(|e| std::io::Error::other(format!("ANALYSIS_MODE: {}", e)))?,
        Err(_) => AnalysisMode::Structured,
    };
    let system_prompt =
        env::var("SYSTEM_PROMPT").unwrap_or_else(|_| llm::prompt::DEFAULT_SYSTEM_PROMPT.to_string());

    log::info!("Analysis mode: {:?}, model: {}", mode, model);

    let service = OpenAiService::new(api_key, base_url, model);
    let settings = AnalysisSettings {
        mode,
        system_prompt,
    };

    let port = env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(web::Data::new(service.clone()))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
