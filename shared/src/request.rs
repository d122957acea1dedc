use std::fmt;

use serde::{Deserialize, Serialize};

use crate::markup::{
    class_selector, CSRF_HEADER, MODEL_LABEL_FIELD, OBJECT_ID_FIELD, REMOVE_ALL_BUTTON_CLASS,
    REMOVE_BUTTON_CLASS, TOGGLE_BUTTON_CLASS,
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Toggle,
    Remove,
    RemoveAll,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [ActionKind::Toggle, ActionKind::Remove, ActionKind::RemoveAll];

    pub fn trigger_class(self) -> &'static str {
        match self {
            ActionKind::Toggle => TOGGLE_BUTTON_CLASS,
            ActionKind::Remove => REMOVE_BUTTON_CLASS,
            ActionKind::RemoveAll => REMOVE_ALL_BUTTON_CLASS,
        }
    }

    pub fn selector(self) -> String {
        class_selector(self.trigger_class())
    }

    /// Only the toggle response carries a body worth reading.
    pub fn reads_body(self) -> bool {
        matches!(self, ActionKind::Toggle)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Toggle => "toggle",
            ActionKind::Remove => "remove",
            ActionKind::RemoveAll => "remove-all",
        };
        f.write_str(name)
    }
}

/// The data attributes of a trigger button, as rendered by the server.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ButtonData {
    pub object_id: String,
    pub model_label: String,
    pub url: String,
}

/// Everything needed to issue one action request. Building it does not touch
/// the page: the token is passed in by the caller.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ActionRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub fields: Vec<(String, String)>,
}

impl ActionRequest {
    pub fn build(button: &ButtonData, csrf_token: &str) -> Self {
        Self {
            method: "POST".to_string(),
            url: button.url.clone(),
            headers: vec![(CSRF_HEADER.to_string(), csrf_token.to_string())],
            fields: vec![
                (OBJECT_ID_FIELD.to_string(), button.object_id.clone()),
                (MODEL_LABEL_FIELD.to_string(), button.model_label.clone()),
            ],
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Method, url and form fields. Headers are left out since they carry the
/// CSRF token.
impl fmt::Display for ActionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)?;
        for (name, value) in &self.fields {
            write!(f, " {name}={value:?}")?;
        }
        Ok(())
    }
}
