use std::collections::HashMap;
use std::sync::Arc;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;
use watchlist_shared::CSRF_HEADER;

use crate::error::AppError;
use crate::state::{AppState, Session, SessionEntry};

pub const SESSION_COOKIE: &str = "watchlist_session";

pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn normalize_session_id(value: &str) -> Option<String> {
    let parsed = Uuid::parse_str(value).ok()?;
    Some(parsed.to_string())
}

pub fn session_cookie_header(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

/// The session id from the request's cookies, if it is a well-formed UUID.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| normalize_session_id(value))
}

/// Drops the least recently used sessions until one more fits under `limit`.
fn make_room(sessions: &mut HashMap<String, SessionEntry>, limit: usize) {
    while sessions.len() >= limit {
        let Some(oldest) = sessions
            .iter()
            .min_by_key(|(_, entry)| entry.last_seen())
            .map(|(id, _)| id.clone())
        else {
            break;
        };
        sessions.remove(&oldest);
        info!("Evicted idle session {oldest}");
    }
}

/// Returns the session for the request, creating it when needed. The flag
/// is true when the client has to be sent a new cookie.
pub async fn get_or_create_session(
    state: &AppState,
    headers: &HeaderMap,
) -> (String, Arc<RwLock<Session>>, bool) {
    let cookie_id = session_id_from_headers(headers);
    if let Some(session_id) = &cookie_id {
        if let Some(entry) = state.sessions.read().await.get(session_id) {
            entry.touch(state.tick());
            return (session_id.clone(), entry.session.clone(), false);
        }
    }
    let issue_cookie = cookie_id.is_none();
    let session_id = cookie_id.unwrap_or_else(new_session_id);

    let mut sessions = state.sessions.write().await;
    if let Some(entry) = sessions.get(&session_id) {
        entry.touch(state.tick());
        return (session_id, entry.session.clone(), issue_cookie);
    }
    make_room(&mut sessions, state.session_limit);
    info!("Creating session {session_id}");
    let entry = SessionEntry::new(state.tick());
    let session = entry.session.clone();
    sessions.insert(session_id.clone(), entry);
    (session_id, session, issue_cookie)
}

pub async fn existing_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Option<(String, Arc<RwLock<Session>>)> {
    let session_id = session_id_from_headers(headers)?;
    let sessions = state.sessions.read().await;
    let entry = sessions.get(&session_id)?;
    entry.touch(state.tick());
    let session = entry.session.clone();
    Some((session_id, session))
}

pub fn check_csrf(session: &Session, headers: &HeaderMap) -> Result<(), AppError> {
    let token = headers
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Forbidden("CSRF token missing"))?;
    if token != session.csrf_token {
        return Err(AppError::Forbidden("CSRF token incorrect"));
    }
    Ok(())
}
