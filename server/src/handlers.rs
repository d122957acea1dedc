use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;
use tracing::info;
use watchlist_shared::ToggleResponse;

use crate::error::AppError;
use crate::render;
use crate::sessions::{check_csrf, existing_session, get_or_create_session, session_cookie_header};
use crate::state::AppState;

pub const WATCHLIST_URL: &str = "/watchlist/";
pub const TOGGLE_URL: &str = "/watchlist/toggle/";
pub const REMOVE_URL: &str = "/watchlist/remove/";
pub const REMOVE_ALL_URL: &str = "/watchlist/remove_all/";
pub const OBJECT_ROUTE: &str = "/objects/:model_label/:object_id/";

/// Where the detail page of a catalog object lives.
pub fn object_url(model_label: &str, object_id: i64) -> String {
    format!("/objects/{model_label}/{object_id}/")
}

#[derive(Deserialize)]
pub struct ActionForm {
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub model_label: Option<String>,
}

impl ActionForm {
    fn model_label(&self) -> Result<&str, AppError> {
        self.model_label
            .as_deref()
            .ok_or(AppError::BadRequest("model_label is required"))
    }

    fn target(&self) -> Result<(&str, i64), AppError> {
        let object_id = self
            .object_id
            .as_deref()
            .and_then(|value| value.trim().parse().ok())
            .ok_or(AppError::BadRequest("object_id must be an integer"))?;
        Ok((self.model_label()?, object_id))
    }
}

fn with_session_cookie(html: String, session_id: &str, issue_cookie: bool) -> Response {
    let mut response = Html(html).into_response();
    if issue_cookie {
        if let Ok(value) = HeaderValue::from_str(&session_cookie_header(session_id)) {
            response.headers_mut().insert(SET_COOKIE, value);
        }
    }
    response
}

pub async fn catalog_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (session_id, session, issue_cookie) = get_or_create_session(&state, &headers).await;
    let session = session.read().await;
    let watchlist = state.storage.load_watchlist(&session_id).await?;
    let html = render::catalog_page(&state.catalog, &watchlist, &session.csrf_token);
    Ok(with_session_cookie(html, &session_id, issue_cookie))
}

pub async fn watchlist_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (session_id, session, issue_cookie) = get_or_create_session(&state, &headers).await;
    let session = session.read().await;
    let watchlist = state.storage.load_watchlist(&session_id).await?;
    info!("watchlist page session={session_id} items={}", watchlist.len());
    let html = render::watchlist_page(&state.catalog, &watchlist, &session.csrf_token);
    Ok(with_session_cookie(html, &session_id, issue_cookie))
}

pub async fn object_page(
    State(state): State<AppState>,
    Path((model_label, object_id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let model = state
        .catalog
        .model(&model_label)
        .ok_or(AppError::NotFound("unknown model"))?;
    let object = state
        .catalog
        .object(&model_label, object_id)
        .ok_or(AppError::NotFound("unknown object"))?;
    let (session_id, session, issue_cookie) = get_or_create_session(&state, &headers).await;
    let session = session.read().await;
    let watchlist = state.storage.load_watchlist(&session_id).await?;
    let html = render::object_page(model, object, &watchlist, &session.csrf_token);
    Ok(with_session_cookie(html, &session_id, issue_cookie))
}

pub async fn toggle_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ActionForm>,
) -> Result<Json<ToggleResponse>, AppError> {
    let (session_id, session) = existing_session(&state, &headers)
        .await
        .ok_or(AppError::Forbidden("no session"))?;
    let _session = {
        let guard = session.write().await;
        check_csrf(&guard, &headers)?;
        guard
    };
    let (model_label, object_id) = form.target()?;

    let Some(object_repr) = state.catalog.object_repr(model_label, object_id) else {
        info!("toggle ignored unknown object session={session_id} model={model_label} id={object_id}");
        return Ok(Json(ToggleResponse {
            on_watchlist: false,
        }));
    };
    let mut watchlist = state.storage.load_watchlist(&session_id).await?;
    let on_watchlist = watchlist.toggle(model_label, object_id, object_repr);
    state.storage.save_watchlist(&session_id, &watchlist).await?;
    info!("toggle session={session_id} model={model_label} id={object_id} on_watchlist={on_watchlist}");
    Ok(Json(ToggleResponse { on_watchlist }))
}

pub async fn remove_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ActionForm>,
) -> Result<StatusCode, AppError> {
    let (session_id, session) = existing_session(&state, &headers)
        .await
        .ok_or(AppError::Forbidden("no session"))?;
    let _session = {
        let guard = session.write().await;
        check_csrf(&guard, &headers)?;
        guard
    };
    let (model_label, object_id) = form.target()?;

    let mut watchlist = state.storage.load_watchlist(&session_id).await?;
    if watchlist.remove(model_label, object_id) {
        state.storage.save_watchlist(&session_id, &watchlist).await?;
        info!("remove session={session_id} model={model_label} id={object_id}");
    }
    Ok(StatusCode::OK)
}

pub async fn remove_all_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ActionForm>,
) -> Result<StatusCode, AppError> {
    let (session_id, session) = existing_session(&state, &headers)
        .await
        .ok_or(AppError::Forbidden("no session"))?;
    let _session = {
        let guard = session.write().await;
        check_csrf(&guard, &headers)?;
        guard
    };
    let model_label = form.model_label()?;

    let mut watchlist = state.storage.load_watchlist(&session_id).await?;
    let removed = watchlist.remove_model(model_label);
    if removed > 0 {
        state.storage.save_watchlist(&session_id, &watchlist).await?;
        info!("remove all session={session_id} model={model_label} removed={removed}");
    }
    Ok(StatusCode::OK)
}
