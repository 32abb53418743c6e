//! HTTP server for a document root.
//!
//! Everything is served from `/`, and the query string picks the response:
//!
//! - `?search&q=...`: JSON search results
//! - `?api=content&file=...`: JSON with the rendered fragment of one document
//! - `?file=...`, or no query at all: the full page of a document
use std::{collections::HashMap, sync::Arc};

use axum::{
  Json,
  Router,
  extract::{Query, State},
  http::StatusCode,
  response::{Html, IntoResponse, Response},
  routing::get,
};
use log::{error, info};

use crate::{
  api,
  error::MarkviewError,
  html::{PageMode, render_page},
  site::Site,
};

/// What a request to `/` asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  Search(String),
  Content(String),
  Page(Option<String>),
}

/// Pick the response for a query string. `param` names the parameter that
/// carries the document path.
///
/// Search wins over the content API, which wins over a page.
#[must_use]
pub fn route(params: &HashMap<String, String>, param: &str) -> Route {
  if params.contains_key("search")
    && let Some(query) = params.get("q")
  {
    return Route::Search(query.clone());
  }

  let file = params.get(param).cloned();
  match file {
    Some(file) if params.get("api").is_some_and(|api| api == "content") => {
      Route::Content(file)
    },
    file => Route::Page(file),
  }
}

/// Answer one request. Reads the filesystem, so it runs off the async
/// workers.
#[must_use]
pub fn respond(site: &Site, route: Route) -> Response {
  match route {
    Route::Search(query) => Json(api::search(site, &query)).into_response(),
    Route::Content(file) => Json(api::content(site, &file)).into_response(),
    Route::Page(file) => {
      let documents = site.documents();
      match render_page(site, &documents, file.as_deref(), PageMode::Served) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
          error!("Failed to render page: {e}");
          (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page")
            .into_response()
        },
      }
    },
  }
}

async fn handle(
  State(site): State<Arc<Site>>,
  Query(params): Query<HashMap<String, String>>,
) -> Response {
  let route = route(&params, &site.config().markdown.navigation_param);
  match tokio::task::spawn_blocking(move || respond(&site, route)).await {
    Ok(response) => response,
    Err(e) => {
      error!("Request handler failed: {e}");
      (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        .into_response()
    },
  }
}

/// Build the router for `site`.
#[must_use]
pub fn router(site: Arc<Site>) -> Router {
  Router::new().route("/", get(handle)).with_state(site)
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!("Failed to listen for Ctrl+C: {e}");
    std::future::pending::<()>().await;
  }
  info!("Shutdown signal received, stopping server...");
}

/// Serve `site` on `address` until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run_server(site: Site, address: &str) -> Result<(), MarkviewError> {
  let listener = tokio::net::TcpListener::bind(address).await?;
  info!(
    "Serving {} on http://{}",
    site.root().display(),
    listener.local_addr()?
  );

  axum::serve(listener, router(Arc::new(site)))
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}
