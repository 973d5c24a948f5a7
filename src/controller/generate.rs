use crate::entities::generation::{GenerateQuery, GenerationRequest, NameResponse};
use crate::error::AppError;
use crate::service::names::NameGenerator;
use crate::utils::config::AppConfig;
use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// `GET /generate`: one generation attempt, always answered with a name.
///
/// Model failures and rejected samples are resolved inside the generator, so
/// the only error path left is the blocking pool itself.
#[get("/generate")]
pub async fn generate_name(
    generator: web::Data<NameGenerator>,
    config: web::Data<Arc<AppConfig>>,
    query: web::Query<GenerateQuery>,
) -> Result<HttpResponse, AppError> {
    let request_id = Uuid::new_v4();
    let start_time = Utc::now();

    let request = GenerationRequest::from_query(query.into_inner(), &config.generation.defaults);
    log::info!(
        "[{}] Generate request: temperature={}, seed={}, use_flare={}",
        request_id,
        request.temperature,
        request.seed,
        request.use_flare
    );
    log::debug!("[{}] Prompt: {:?}", request_id, request.prompt);

    let generator = generator.into_inner();
    let generated = web::block(move || generator.generate_detailed(&request)).await?;

    let duration = Utc::now() - start_time;
    log::info!(
        "[{}] Generated '{}' ({:?}) in {}ms",
        request_id,
        generated.name,
        generated.source,
        duration.num_milliseconds()
    );

    Ok(HttpResponse::Ok().json(NameResponse { name: generated.name }))
}
