//! Routes: the progression page and the two ways of adding XP.

use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use services::ProgressionServiceError;
use tracing::{error, warn};
use ui::{ProgressionVm, render_error, render_index};

use crate::server::AppState;

type AppStateArc = Arc<AppState>;

pub fn progression_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(index))
        .route("/add_xp", post(add_xp_form))
        .route("/add_xp/:amount", get(add_xp_path))
}

#[derive(Debug, Deserialize)]
struct AddXpForm {
    amount: Option<String>,
}

/// Handler error rendered as an HTML error page.
struct PageError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let body = render_error(self.status.as_u16(), self.message);
        (self.status, Html(body)).into_response()
    }
}

impl From<ProgressionServiceError> for PageError {
    fn from(err: ProgressionServiceError) -> Self {
        let status = match &err {
            ProgressionServiceError::Input(_) | ProgressionServiceError::Progression(_) => {
                warn!("rejected click: {err}");
                StatusCode::BAD_REQUEST
            }
            ProgressionServiceError::NotFound => {
                error!("player record missing");
                StatusCode::NOT_FOUND
            }
            _ => {
                error!("click failed: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

async fn index(State(state): State<AppStateArc>) -> Result<Html<String>, PageError> {
    let player = state.progression.current().await?;
    Ok(Html(render_index(ProgressionVm::from(&player))))
}

async fn add_xp_form(
    State(state): State<AppStateArc>,
    Form(form): Form<AddXpForm>,
) -> Result<Redirect, PageError> {
    let raw = form.amount.unwrap_or_default();
    state.progression.add_xp_raw(&raw).await?;
    Ok(Redirect::to("/"))
}

async fn add_xp_path(
    State(state): State<AppStateArc>,
    Path(amount): Path<String>,
) -> Result<Redirect, PageError> {
    state.progression.add_xp_raw(&amount).await?;
    Ok(Redirect::to("/"))
}
