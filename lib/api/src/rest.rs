use actix_web::{web, App, HttpServer, HttpResponse, Result as ActixResult};
use actix_cors::Cors;
use insightx_core::{Error, FragmentRecord, ScoredFragment, Vector};
use insightx_retrieval::{
    format_context, latest_question, ChatMessage, PromptPlan, RoutingDecision, Strategy,
};
use insightx_storage::StorageManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Upper bound for a CSV upload body
const MAX_CSV_BYTES: usize = 32 * 1024 * 1024;

#[derive(Deserialize)]
struct AppendFragmentsRequest {
    fragments: Vec<FragmentRequest>,
}

#[derive(Deserialize)]
struct FragmentRequest {
    document_id: Option<String>,
    content: String,
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct RouteRequest {
    vector: Vec<f32>,
    limit: Option<usize>,
    question: Option<String>,
    #[serde(default)]
    history: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct QueryRequest {
    vector: Vec<f32>,
    question: String,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct QueryResponse {
    strategy: Strategy,
    used_fragments: usize,
    fragments: Vec<ScoredFragment>,
    context: String,
    plan: PromptPlan,
}

#[derive(Serialize)]
struct RouteResponse {
    strategy: Strategy,
    #[serde(flatten)]
    decision: RoutingDecision,
    context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<PromptPlan>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        storage: Arc<StorageManager>,
        port: u16,
    ) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .configure(|cfg| Self::configure(cfg, storage.clone()))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Register the routes on an app; shared by the server and the tests
    pub fn configure(cfg: &mut web::ServiceConfig, storage: Arc<StorageManager>) {
        cfg.app_data(web::Data::new(storage))
            .app_data(web::PayloadConfig::new(MAX_CSV_BYTES))
            .route("/datasets", web::get().to(list_datasets))
            .route("/datasets/{source_id}", web::get().to(get_dataset))
            .route("/datasets/{source_id}", web::put().to(put_dataset))
            .route("/datasets/{source_id}", web::delete().to(delete_dataset))
            .route("/fragments", web::put().to(append_fragments))
            .route("/route", web::post().to(route))
            .route("/query", web::post().to(query));
    }
}

fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        Error::EmptyTable(_)
        | Error::TableParse(_)
        | Error::InvalidInput(_)
        | Error::InvalidConfig(_) => HttpResponse::BadRequest().json(body),
        _ => {
            tracing::error!("Request failed: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

async fn list_datasets(
    storage: web::Data<Arc<StorageManager>>,
) -> ActixResult<HttpResponse> {
    match storage.list_profiles() {
        Ok(ids) => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": ids }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn get_dataset(
    storage: web::Data<Arc<StorageManager>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let source_id = path.into_inner();

    match storage.get_profile(&source_id) {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": profile }))),
        Ok(None) => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Dataset not found"
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn put_dataset(
    storage: web::Data<Arc<StorageManager>>,
    path: web::Path<String>,
    body: String,
) -> ActixResult<HttpResponse> {
    let source_id = path.into_inner();

    match storage.ingest_csv(&source_id, &body) {
        Ok(profile) => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": profile }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn delete_dataset(
    storage: web::Data<Arc<StorageManager>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let source_id = path.into_inner();

    match storage.remove_profile(&source_id) {
        Ok(true) => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": true }))),
        Ok(false) => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Dataset not found"
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn append_fragments(
    storage: web::Data<Arc<StorageManager>>,
    req: web::Json<AppendFragmentsRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    if req.fragments.iter().any(|f| f.embedding.is_empty()) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Every fragment needs a non-empty embedding"
        })));
    }
    if let Some(pos) = req
        .fragments
        .iter()
        .position(|f| f.embedding.iter().any(|x| !x.is_finite()))
    {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Fragment {} has a non-finite embedding component", pos)
        })));
    }

    let fragments: Vec<FragmentRecord> = req
        .fragments
        .into_iter()
        .map(|f| FragmentRecord {
            document_id: f.document_id,
            content: f.content,
            embedding: Vector::new(f.embedding),
        })
        .collect();

    match storage.append_fragments(fragments) {
        Ok(written) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": { "appended": written }
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn route(
    storage: web::Data<Arc<StorageManager>>,
    req: web::Json<RouteRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    if req.limit == Some(0) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "'limit' must be positive"
        })));
    }

    let query = Vector::new(req.vector);
    let decision = match storage.route_query(&query, req.limit) {
        Ok(d) => d,
        Err(e) => return Ok(error_response(&e)),
    };

    let question = match req.question.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => Some(q),
        _ => latest_question(&req.history).ok(),
    };
    let plan = question.map(|q| storage.plan(&decision, q, &req.history));

    let response = RouteResponse {
        strategy: decision.strategy(),
        context: decision.context_block(),
        decision,
        plan,
    };
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": response })))
}

/// Always answer from the top fragments, regardless of the routing threshold
async fn query(
    storage: web::Data<Arc<StorageManager>>,
    req: web::Json<QueryRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    if req.limit == Some(0) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "'limit' must be positive"
        })));
    }

    let vector = Vector::new(req.vector);
    match storage.query_strict(&vector, req.limit, &req.question) {
        Ok((fragments, plan)) => {
            let response = QueryResponse {
                strategy: plan.strategy,
                used_fragments: fragments.len(),
                context: format_context(&fragments),
                fragments,
                plan,
            };
            Ok(HttpResponse::Ok().json(serde_json::json!({ "result": response })))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
