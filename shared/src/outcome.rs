use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::markup::{NOT_WATCHED_CLASS, ON_WATCHLIST_CLASS, WATCHED_CLASS};
use crate::request::ActionKind;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleResponse {
    pub on_watchlist: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchState {
    Watched,
    NotWatched,
}

impl WatchState {
    pub fn from_flag(on_watchlist: bool) -> Self {
        if on_watchlist {
            WatchState::Watched
        } else {
            WatchState::NotWatched
        }
    }

    pub fn classes_to_add(self) -> &'static [&'static str] {
        match self {
            WatchState::Watched => &[WATCHED_CLASS, ON_WATCHLIST_CLASS],
            WatchState::NotWatched => &[NOT_WATCHED_CLASS],
        }
    }

    pub fn classes_to_remove(self) -> &'static [&'static str] {
        match self {
            WatchState::Watched => &[NOT_WATCHED_CLASS],
            WatchState::NotWatched => &[WATCHED_CLASS, ON_WATCHLIST_CLASS],
        }
    }
}

/// The one DOM mutation an action applies once its response is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomPatch {
    SetWatchState(WatchState),
    /// Remove the clicked item, and its group if the list is left empty.
    RemoveItem,
    RemoveGroup,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("button is missing the {0} attribute")]
    MissingAttribute(&'static str),

    #[error("page has no CSRF token field")]
    MissingCsrfToken,

    #[error("request failed: {0}")]
    Network(String),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("unexpected page structure: {0}")]
    Dom(String),
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Maps a response to the patch it calls for. `body` is only consulted for a
/// successful toggle.
pub fn resolve(kind: ActionKind, status: u16, body: Option<&str>) -> Result<DomPatch, ActionError> {
    if !is_success(status) {
        return Err(ActionError::Status(status));
    }
    match kind {
        ActionKind::Toggle => {
            let body = body.ok_or_else(|| ActionError::MalformedBody("empty body".to_string()))?;
            let parsed = serde_json::from_str::<ToggleResponse>(body)
                .map_err(|error| ActionError::MalformedBody(error.to_string()))?;
            Ok(DomPatch::SetWatchState(WatchState::from_flag(parsed.on_watchlist)))
        }
        ActionKind::Remove => Ok(DomPatch::RemoveItem),
        ActionKind::RemoveAll => Ok(DomPatch::RemoveGroup),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_true_sets_watched() {
        let patch = resolve(ActionKind::Toggle, 200, Some(r#"{"on_watchlist": true}"#));
        assert_eq!(patch, Ok(DomPatch::SetWatchState(WatchState::Watched)));
    }

    #[test]
    fn toggle_false_sets_not_watched() {
        let patch = resolve(ActionKind::Toggle, 200, Some(r#"{"on_watchlist": false}"#));
        assert_eq!(patch, Ok(DomPatch::SetWatchState(WatchState::NotWatched)));
    }

    #[test]
    fn toggle_with_error_status_skips_the_body() {
        let patch = resolve(ActionKind::Toggle, 500, Some(r#"{"on_watchlist": true}"#));
        assert_eq!(patch, Err(ActionError::Status(500)));
    }

    #[test]
    fn toggle_with_bad_json_is_malformed() {
        assert!(matches!(
            resolve(ActionKind::Toggle, 200, Some("<html>")),
            Err(ActionError::MalformedBody(_))
        ));
        assert!(matches!(
            resolve(ActionKind::Toggle, 200, Some(r#"{"on_watchlist": "yes"}"#)),
            Err(ActionError::MalformedBody(_))
        ));
        assert!(matches!(
            resolve(ActionKind::Toggle, 200, None),
            Err(ActionError::MalformedBody(_))
        ));
    }

    #[test]
    fn removes_ignore_the_body() {
        assert_eq!(resolve(ActionKind::Remove, 200, None), Ok(DomPatch::RemoveItem));
        assert_eq!(
            resolve(ActionKind::Remove, 204, Some("not json")),
            Ok(DomPatch::RemoveItem)
        );
        assert_eq!(resolve(ActionKind::RemoveAll, 200, None), Ok(DomPatch::RemoveGroup));
    }

    #[test]
    fn removes_with_error_status_change_nothing() {
        for status in [301, 400, 403, 404, 500] {
            assert_eq!(resolve(ActionKind::Remove, status, None), Err(ActionError::Status(status)));
            assert_eq!(
                resolve(ActionKind::RemoveAll, status, None),
                Err(ActionError::Status(status))
            );
        }
    }

    #[test]
    fn watch_state_class_sets_are_disjoint() {
        for state in [WatchState::Watched, WatchState::NotWatched] {
            for class in state.classes_to_add() {
                assert!(!state.classes_to_remove().contains(class));
            }
        }
        assert_eq!(
            WatchState::Watched.classes_to_add(),
            WatchState::NotWatched.classes_to_remove()
        );
    }
}
