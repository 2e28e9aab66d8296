// file: src/web/handlers.rs
// description: axum handlers for the page, its two form actions, the json api and health
// reference: every failure becomes a message on the page, never a crashed request

use crate::error::AdvisorError;
use crate::models::Answer;
use crate::pipeline::{DiagnosisSession, EmbedOutcome, ProgressTracker};
use crate::utils::HealthReport;
use crate::web::page::{Notice, PageView};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

pub type SharedSession = Arc<DiagnosisSession>;

#[derive(Debug, Default, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub symptoms: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiQuery {
    pub symptoms: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

fn base_view(session: &DiagnosisSession) -> PageView {
    PageView::new(
        session.config().server.max_query_chars,
        !session.has_credential(),
    )
}

pub async fn index(State(session): State<SharedSession>) -> Html<String> {
    Html(base_view(&session).render())
}

pub async fn embed(State(session): State<SharedSession>) -> Html<String> {
    let mut view = base_view(&session);
    let tracker = ProgressTracker::hidden(0);

    match session.embed_documents(false, Some(&tracker)).await {
        Ok(EmbedOutcome::Built(stats)) => {
            let progress = tracker.get_stats();
            info!(
                "Embedded {} chunks at {:.1} chunks/sec",
                progress.chunks_embedded,
                progress.chunks_per_second()
            );
            view.embed_notices
                .push(Notice::Info("Embedding started...".to_string()));
            view.embed_notices.push(Notice::Success(format!(
                "Medical Vector Store DB is Ready! ({} chunks from {} documents)",
                stats.chunks, stats.documents
            )));
        }
        Ok(EmbedOutcome::AlreadyReady(_)) => {
            view.embed_notices.push(Notice::Success(
                "Medical Vector Store DB is Ready!".to_string(),
            ));
        }
        Err(e) => {
            error!("Embedding failed: {}", e);
            view.embed_notices.push(Notice::Error(embed_error_message(&e)));
        }
    }

    Html(view.render())
}

fn embed_error_message(error: &AdvisorError) -> String {
    match error {
        AdvisorError::MissingCredential => error.to_string(),
        AdvisorError::NoDocuments(_) => "No documents found".to_string(),
        other => format!("Error during embedding process: {}", other),
    }
}

pub async fn query(
    State(session): State<SharedSession>,
    Form(form): Form<QueryForm>,
) -> Html<String> {
    let mut view = base_view(&session);
    view.symptoms = form.symptoms.clone();

    if form.symptoms.trim().is_empty() {
        return Html(view.render());
    }

    match session.ask(&form.symptoms).await {
        Ok(answer) => view.answer = Some(answer),
        Err(AdvisorError::IndexNotReady) => {
            view.query_notices.push(Notice::Info(
                "Please run the 'Start Document Embedding' process first.".to_string(),
            ));
        }
        Err(e) => {
            error!("Retrieval failed: {}", e);
            view.query_notices.push(Notice::Error(format!(
                "Error during retrieval process: {}",
                e
            )));
        }
    }

    Html(view.render())
}

pub async fn api_query(
    State(session): State<SharedSession>,
    Json(request): Json<ApiQuery>,
) -> Result<Json<Answer>, (StatusCode, Json<ApiError>)> {
    session.ask(&request.symptoms).await.map(Json).map_err(|e| {
        if e.is_client_error() {
            warn!("API query rejected: {}", e);
        } else {
            error!("API query failed: {}", e);
        }
        (
            status_for(&e),
            Json(ApiError {
                error: e.to_string(),
            }),
        )
    })
}

fn status_for(error: &AdvisorError) -> StatusCode {
    match error {
        AdvisorError::Validation(_) => StatusCode::BAD_REQUEST,
        AdvisorError::IndexNotReady => StatusCode::CONFLICT,
        AdvisorError::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
        AdvisorError::Api { .. } | AdvisorError::Http(_) | AdvisorError::Embedding(_) => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn health(State(session): State<SharedSession>) -> (StatusCode, Json<HealthReport>) {
    let report = session.health().await;
    let status = if report.is_unhealthy() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (status, Json(report))
}
