use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response, UrlSearchParams, Window};

use watchlist_shared::{resolve, ActionError, ActionKind, ActionRequest, DomPatch};

use crate::util::js_error_message;

/// Builds the same-origin `fetch` request for a descriptor. The body is
/// url-encoded, so the browser sets the form content type itself.
pub fn fetch_request(request: &ActionRequest) -> Result<Request, JsValue> {
    let headers = Headers::new()?;
    for (name, value) in &request.headers {
        headers.set(name, value)?;
    }
    let body = UrlSearchParams::new()?;
    for (name, value) in &request.fields {
        body.append(name, value);
    }

    let init = RequestInit::new();
    init.set_method(&request.method);
    init.set_mode(RequestMode::SameOrigin);
    init.set_headers(&JsValue::from(headers));
    init.set_body(&JsValue::from(body));
    Request::new_with_str_and_init(&request.url, &init)
}

pub async fn send(window: &Window, request: &ActionRequest) -> Result<Response, ActionError> {
    let fetch_request =
        fetch_request(request).map_err(|error| ActionError::Network(js_error_message(&error)))?;
    let value = JsFuture::from(window.fetch_with_request(&fetch_request))
        .await
        .map_err(|error| ActionError::Network(js_error_message(&error)))?;
    value
        .dyn_into::<Response>()
        .map_err(|_| ActionError::Network("fetch did not resolve to a Response".to_string()))
}

pub async fn read_outcome(kind: ActionKind, response: &Response) -> Result<DomPatch, ActionError> {
    let status = response.status();
    let body = if kind.reads_body() && response.ok() {
        let promise = response
            .text()
            .map_err(|error| ActionError::MalformedBody(js_error_message(&error)))?;
        JsFuture::from(promise)
            .await
            .map_err(|error| ActionError::MalformedBody(js_error_message(&error)))?
            .as_string()
    } else {
        None
    };
    resolve(kind, status, body.as_deref())
}
