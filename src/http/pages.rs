//! Page chrome: the provider index and the embed-frame page.
//!
//! # Responsibilities
//! - List cataloged providers on the index page
//! - Emit the frame page whose iframe src is the provider's initial
//!   proxy token
//!
//! These are thin display collaborators around the proxy engine; all the
//! traffic they set up flows through the forwarding handler.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::http::server::AppState;
use crate::proxy::reentry_url;

/// `GET /` — provider catalog.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut items = String::new();
    for provider in state.providers.iter() {
        items.push_str(&format!(
            "      <li><a href=\"/embed/frame/{}\">{}</a></li>\n",
            escape(&provider.id),
            escape(&provider.name)
        ));
    }

    Html(format!(
        "<!doctype html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>Looking Glass Directory</title></head>\n\
         <body>\n\
           <h1>Looking Glass Directory</h1>\n\
           <p>Select a provider to open its looking glass in an embedded frame.</p>\n\
           <ul>\n{items}\
           </ul>\n\
         </body>\n\
         </html>\n"
    ))
}

/// `GET /embed/frame/{pid}` — frame page for one provider.
///
/// Unknown identifiers get a 404; known ones get a full-height iframe whose
/// src is the initial proxy token for the provider's upstream URL.
pub async fn embed_frame(State(state): State<AppState>, Path(pid): Path<String>) -> Response {
    let Some(provider) = state.providers.get(&pid) else {
        tracing::debug!(provider = %pid, "Unknown provider requested");
        return (StatusCode::NOT_FOUND, "unknown provider").into_response();
    };

    let frame_src = reentry_url(&provider.url);
    let name = escape(&provider.name);

    Html(format!(
        "<!doctype html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{name}</title>\n\
         <style>html,body{{margin:0;height:100%}}iframe{{border:0;width:100%;height:100%}}</style>\n\
         </head>\n\
         <body>\n\
           <iframe src=\"{frame_src}\" title=\"{name}\"></iframe>\n\
         </body>\n\
         </html>\n"
    ))
    .into_response()
}

/// Minimal HTML escaping for text and attribute positions.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
