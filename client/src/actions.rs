use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, Window};

use watchlist_shared::{
    ActionError, ActionKind, ActionRequest, DomPatch, MODEL_LABEL_ATTR, OBJECT_ID_ATTR,
};

use crate::dom::{apply_patch, button_data, csrf_token, query_all};
use crate::net::{read_outcome, send};

/// Runs one action for a clicked button: request, response, DOM patch.
/// The DOM is only touched once the response resolved to a patch.
pub async fn perform(
    window: &Window,
    document: &Document,
    button: &Element,
    kind: ActionKind,
    debug: bool,
) -> Result<DomPatch, ActionError> {
    let data = button_data(button)?;
    let token = csrf_token(document)?;
    let request = ActionRequest::build(&data, &token);
    if debug {
        web_sys::console::log_1(&format!("watchlist {kind} request {request}").into());
    }

    let response = send(window, &request).await?;
    let patch = read_outcome(kind, &response).await?;
    apply_patch(button, patch)?;
    Ok(patch)
}

fn report_failure(kind: ActionKind, button: &Element, error: &ActionError) {
    let object_id = button.get_attribute(OBJECT_ID_ATTR).unwrap_or_default();
    let model_label = button.get_attribute(MODEL_LABEL_ATTR).unwrap_or_default();
    web_sys::console::warn_1(
        &format!(
            "watchlist {kind} failed object_id={object_id:?} model_label={model_label:?}: {error}"
        )
        .into(),
    );
}

fn bind_button(
    window: &Window,
    document: &Document,
    button: Element,
    kind: ActionKind,
    debug: bool,
) -> Result<(), JsValue> {
    let window = window.clone();
    let document = document.clone();
    let target = button.clone();
    let onclick = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let window = window.clone();
        let document = document.clone();
        let button = button.clone();
        spawn_local(async move {
            match perform(&window, &document, &button, kind, debug).await {
                Ok(patch) => {
                    if debug {
                        web_sys::console::log_1(
                            &format!("watchlist {kind} applied {patch:?}").into(),
                        );
                    }
                }
                Err(error) => report_failure(kind, &button, &error),
            }
        });
    });
    target.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
    onclick.forget();
    Ok(())
}

/// Attaches one click listener to every trigger button on the page.
pub fn bind_all(window: &Window, document: &Document, debug: bool) -> Result<usize, JsValue> {
    let mut bound = 0;
    for kind in ActionKind::ALL {
        for button in query_all(document, &kind.selector())? {
            bind_button(window, document, button, kind, debug)?;
            bound += 1;
        }
    }
    Ok(bound)
}
