use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use watchlist_shared::{
    class_selector, csrf_selector, ActionError, ButtonData, DomPatch, WatchState, ITEMS_LIST_CLASS,
    ITEM_CLASS, MODEL_CONTAINER_CLASS, MODEL_LABEL_ATTR, OBJECT_ID_ATTR, URL_ATTR,
};

use crate::util::js_error_message;

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        if let Some(element) = nodes
            .get(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        {
            elements.push(element);
        }
    }
    Ok(elements)
}

fn required_attribute(element: &Element, name: &'static str) -> Result<String, ActionError> {
    element
        .get_attribute(name)
        .ok_or(ActionError::MissingAttribute(name))
}

pub fn button_data(button: &Element) -> Result<ButtonData, ActionError> {
    Ok(ButtonData {
        object_id: required_attribute(button, OBJECT_ID_ATTR)?,
        model_label: required_attribute(button, MODEL_LABEL_ATTR)?,
        url: required_attribute(button, URL_ATTR)?,
    })
}

/// Reads the CSRF field of the page. Called on every action, never cached.
pub fn csrf_token(document: &Document) -> Result<String, ActionError> {
    let field = document
        .query_selector(&csrf_selector())
        .ok()
        .flatten()
        .ok_or(ActionError::MissingCsrfToken)?;
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        return Ok(input.value());
    }
    field
        .get_attribute("value")
        .ok_or(ActionError::MissingCsrfToken)
}

fn closest(element: &Element, class: &str) -> Result<Option<Element>, ActionError> {
    element
        .closest(&class_selector(class))
        .map_err(|error| ActionError::Dom(js_error_message(&error)))
}

fn set_watch_state(button: &Element, state: WatchState) -> Result<(), ActionError> {
    let classes = button.class_list();
    for class in state.classes_to_remove() {
        classes
            .remove_1(class)
            .map_err(|error| ActionError::Dom(js_error_message(&error)))?;
    }
    for class in state.classes_to_add() {
        classes
            .add_1(class)
            .map_err(|error| ActionError::Dom(js_error_message(&error)))?;
    }
    Ok(())
}

fn remove_item(button: &Element) -> Result<(), ActionError> {
    let item = closest(button, ITEM_CLASS)?
        .ok_or_else(|| ActionError::Dom(format!("button is not inside .{ITEM_CLASS}")))?;
    // A detached item has already been removed by an earlier response.
    let Some(list) = closest(&item, ITEMS_LIST_CLASS)? else {
        item.remove();
        return Ok(());
    };
    let group = closest(&list, MODEL_CONTAINER_CLASS)?;
    item.remove();
    if list.children().length() == 0 {
        if let Some(group) = group {
            group.remove();
        }
    }
    Ok(())
}

fn remove_group(button: &Element) -> Result<(), ActionError> {
    let group = closest(button, MODEL_CONTAINER_CLASS)?.ok_or_else(|| {
        ActionError::Dom(format!("button is not inside .{MODEL_CONTAINER_CLASS}"))
    })?;
    group.remove();
    Ok(())
}

pub fn apply_patch(button: &Element, patch: DomPatch) -> Result<(), ActionError> {
    match patch {
        DomPatch::SetWatchState(state) => set_watch_state(button, state),
        DomPatch::RemoveItem => remove_item(button),
        DomPatch::RemoveGroup => remove_group(button),
    }
}
