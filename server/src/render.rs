use watchlist_shared::{
    CSRF_FIELD_NAME, ITEMS_LIST_CLASS, ITEM_CLASS, MODEL_CONTAINER_CLASS, MODEL_LABEL_ATTR,
    NOT_WATCHED_CLASS, OBJECT_ID_ATTR, ON_WATCHLIST_CLASS, REMOVE_ALL_BUTTON_CLASS,
    REMOVE_BUTTON_CLASS, TOGGLE_BUTTON_CLASS, URL_ATTR, WATCHED_CLASS,
};

use crate::catalog::{Catalog, CatalogModel, CatalogObject};
use crate::handlers::{object_url, REMOVE_ALL_URL, REMOVE_URL, TOGGLE_URL, WATCHLIST_URL};
use crate::watchlist::Watchlist;

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn action_button(
    classes: &str,
    object_id: &str,
    model_label: &str,
    url: &str,
    label: &str,
) -> String {
    format!(
        "<button type=\"button\" class=\"{classes}\" {OBJECT_ID_ATTR}=\"{}\" {MODEL_LABEL_ATTR}=\"{}\" {URL_ATTR}=\"{}\">{}</button>",
        escape(object_id),
        escape(model_label),
        escape(url),
        escape(label)
    )
}

pub fn toggle_button(model_label: &str, object_id: i64, on_watchlist: bool) -> String {
    let classes = if on_watchlist {
        format!("{TOGGLE_BUTTON_CLASS} {WATCHED_CLASS} {ON_WATCHLIST_CLASS}")
    } else {
        format!("{TOGGLE_BUTTON_CLASS} {NOT_WATCHED_CLASS}")
    };
    action_button(
        &classes,
        &object_id.to_string(),
        model_label,
        TOGGLE_URL,
        "Watch",
    )
}

fn object_link(model_label: &str, object_id: i64, repr: &str) -> String {
    format!(
        "<a href=\"{}\">{}</a>",
        escape(&object_url(model_label, object_id)),
        escape(repr)
    )
}

fn layout(title: &str, csrf_token: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\" /><title>{title}</title><link rel=\"stylesheet\" href=\"/static/watchlist.css\" /></head><body><nav><a href=\"/\">Catalog</a> <a href=\"{WATCHLIST_URL}\">My watchlist</a></nav><h1>{title}</h1><input type=\"hidden\" name=\"{CSRF_FIELD_NAME}\" value=\"{token}\" />{body}<script type=\"module\">import init from \"/static/pkg/watchlist_client.js\"; init();</script></body></html>",
        title = escape(title),
        token = escape(csrf_token),
        body = body
    )
}

/// Every catalog object with a toggle button showing its current state.
pub fn catalog_page(catalog: &Catalog, watchlist: &Watchlist, csrf_token: &str) -> String {
    let mut body = String::new();
    for model in catalog.models() {
        body.push_str(&format!("<section><h2>{}</h2><ul>", escape(&model.verbose_name)));
        for object in &model.objects {
            let on_watchlist = watchlist.on_watchlist(&model.label, object.id);
            body.push_str(&format!(
                "<li>{} {}</li>",
                object_link(&model.label, object.id, &object.repr),
                toggle_button(&model.label, object.id, on_watchlist)
            ));
        }
        body.push_str("</ul></section>");
    }
    layout("Catalog", csrf_token, &body)
}

/// Detail page of one catalog object with its toggle button.
pub fn object_page(
    model: &CatalogModel,
    object: &CatalogObject,
    watchlist: &Watchlist,
    csrf_token: &str,
) -> String {
    let on_watchlist = watchlist.on_watchlist(&model.label, object.id);
    let body = format!(
        "<p>{} #{}</p>{}",
        escape(&model.verbose_name),
        object.id,
        toggle_button(&model.label, object.id, on_watchlist)
    );
    layout(&object.repr, csrf_token, &body)
}

/// One group per watched model, sorted by verbose name. Labels the catalog
/// no longer knows are skipped.
pub fn watchlist_page(catalog: &Catalog, watchlist: &Watchlist, csrf_token: &str) -> String {
    let mut groups = watchlist
        .models()
        .filter_map(|(label, entries)| {
            let model = catalog.model(label)?;
            Some((model.verbose_name.as_str(), label, entries))
        })
        .collect::<Vec<_>>();
    groups.sort_by(|a, b| a.0.cmp(b.0));

    let mut body = String::new();
    if groups.is_empty() {
        body.push_str("<p class=\"watchlist-empty\">Your watchlist is empty.</p>");
    }
    for (verbose_name, label, entries) in groups {
        body.push_str(&format!(
            "<div class=\"{MODEL_CONTAINER_CLASS}\"><h2>{}</h2><ul class=\"{ITEMS_LIST_CLASS}\">",
            escape(verbose_name)
        ));
        for entry in entries {
            body.push_str(&format!(
                "<li class=\"{ITEM_CLASS}\">{} {}</li>",
                object_link(label, entry.object_id, &entry.object_repr),
                action_button(
                    REMOVE_BUTTON_CLASS,
                    &entry.object_id.to_string(),
                    label,
                    REMOVE_URL,
                    "Remove"
                )
            ));
        }
        body.push_str("</ul>");
        body.push_str(&action_button(
            REMOVE_ALL_BUTTON_CLASS,
            "",
            label,
            REMOVE_ALL_URL,
            "Remove all",
        ));
        body.push_str("</div>");
    }
    layout("My watchlist", csrf_token, &body)
}
