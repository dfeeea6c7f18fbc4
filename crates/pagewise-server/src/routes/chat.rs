//! Chat routes — relay a message to the selected provider.
//! Matches /api/chat used by the extension's popup and context menu.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::warn;

use pagewise_chat::{
    ActionRequest, ChatReply, ChatRequest, ChatResponse, ChatStatus, ErrorBody, ErrorReport,
    ReportKind,
};
use pagewise_client::MenuAction;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/status", get(get_status))
        .route("/chat/action", post(run_action))
}

// ---------------------------------------------------------------
// Chat
// ---------------------------------------------------------------

/// POST /api/chat
async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected(rejection),
    };

    respond(state.dispatcher.handle_chat(request).await)
}

// ---------------------------------------------------------------
// Context-menu actions
// ---------------------------------------------------------------

/// POST /api/chat/action — build the menu prompt server-side, then chat.
async fn run_action(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejected(rejection),
    };

    let Some(action) = MenuAction::from_menu_id(&req.action) else {
        return bad_request(format!("Unknown action: {}", req.action));
    };
    if req.text.trim().is_empty() {
        return bad_request("Text is required".into());
    }

    let request = ChatRequest {
        message: action.prompt(&req.text),
        history: Vec::new(),
        provider: req.provider,
        credential: req.credential,
    };
    respond(state.dispatcher.handle_chat(request).await)
}

// ---------------------------------------------------------------
// Status
// ---------------------------------------------------------------

/// GET /api/chat/status — configured providers, never the keys.
async fn get_status(State(state): State<Arc<AppState>>) -> Json<ChatStatus> {
    Json(state.dispatcher.config().status())
}

// ---------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------

fn respond(result: Result<ChatResponse, ErrorReport>) -> Response {
    match result {
        Ok(reply) => (
            StatusCode::OK,
            Json(ChatReply {
                response: reply.text,
            }),
        )
            .into_response(),
        Err(report) => match report.kind {
            ReportKind::ValidationError | ReportKind::ConfigurationError => {
                bad_request(report.message)
            }
            ReportKind::RequestFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Failed to process request".into(),
                    message: Some(report.message),
                }),
            )
                .into_response(),
        },
    }
}

fn bad_request(error: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error,
            message: None,
        }),
    )
        .into_response()
}

fn rejected(rejection: JsonRejection) -> Response {
    warn!("Rejected chat body: {}", rejection.body_text());
    bad_request(rejection.body_text())
}
