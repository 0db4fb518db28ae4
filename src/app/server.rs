use crate::app::render::render_html;
use crate::config::toml_config::ServerConfig;
use crate::core::page::{PageRequest, PageService};
use crate::domain::model::{Locale, RoiForm};
use crate::utils::error::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Where `/` and unsupported locales are sent.
pub const HOME_PATH: &str = "/en";

/// Page routes over one shared `PageService`.
///
/// - `/` redirects to `/en`
/// - `GET /{lang}` renders the page, `POST /{lang}` also runs the calculator
/// - any `{lang}` other than `en` or `pt` redirects to `/en`
/// - `/static/*` and `/favicon.ico` come from `static_dir`
pub fn router(service: Arc<PageService>, static_dir: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/{lang}", get(show_page).post(submit_form))
        .route_service("/favicon.ico", ServeFile::new(static_dir.join("favicon.ico")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(service: Arc<PageService>, config: &ServerConfig) -> Result<()> {
    let app = router(service, std::path::Path::new(&config.static_dir));
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!("🌐 Serving pages on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn home() -> Redirect {
    Redirect::to(HOME_PATH)
}

async fn show_page(State(service): State<Arc<PageService>>, Path(lang): Path<String>) -> Response {
    respond(&service, &lang, None).await
}

async fn submit_form(
    State(service): State<Arc<PageService>>,
    Path(lang): Path<String>,
    Form(form): Form<RoiForm>,
) -> Response {
    respond(&service, &lang, Some(form)).await
}

async fn respond(service: &PageService, lang: &str, form: Option<RoiForm>) -> Response {
    let Some(locale) = Locale::from_tag(lang) else {
        tracing::debug!("Unsupported locale '{}', redirecting to {}", lang, HOME_PATH);
        return Redirect::to(HOME_PATH).into_response();
    };

    let request = PageRequest {
        lang: locale.as_str().to_string(),
        form,
    };
    let page = service.build(request).await;

    match render_html(&page) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render {} page: {}", locale, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
