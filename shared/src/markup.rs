//! Class names, attribute names and form fields shared by the rendered
//! markup and the browser controller.

pub const TOGGLE_BUTTON_CLASS: &str = "watchlist-toggle-btn";
pub const REMOVE_BUTTON_CLASS: &str = "watchlist-remove-btn";
pub const REMOVE_ALL_BUTTON_CLASS: &str = "watchlist-remove-all-btn";

pub const ITEMS_LIST_CLASS: &str = "watchlist-items-list";
pub const ITEM_CLASS: &str = "watchlist-item";
pub const MODEL_CONTAINER_CLASS: &str = "model-watchlist-container";

pub const NOT_WATCHED_CLASS: &str = "text-primary";
pub const WATCHED_CLASS: &str = "text-success";
pub const ON_WATCHLIST_CLASS: &str = "on-watchlist";

pub const OBJECT_ID_ATTR: &str = "data-object-id";
pub const MODEL_LABEL_ATTR: &str = "data-model-label";
pub const URL_ATTR: &str = "data-url";

pub const CSRF_FIELD_NAME: &str = "csrfmiddlewaretoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

pub const OBJECT_ID_FIELD: &str = "object_id";
pub const MODEL_LABEL_FIELD: &str = "model_label";

/// `.class` selector for a single class name.
pub fn class_selector(class: &str) -> String {
    format!(".{class}")
}

/// Attribute selector for the page's CSRF field.
pub fn csrf_selector() -> String {
    format!("[name={CSRF_FIELD_NAME}]")
}
