//! Static file server for the generated blog

use std::path::Path;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Mount point of the assets directory.
pub const ASSETS_PREFIX: &str = "/assets";

/// Output paths masked as 404 so the post directory is never listed.
pub const POST_DIR_SUFFIX: &str = "/post/";

/// Create the server router.
///
/// The output directory is served at `/` and, when given, the assets
/// directory at `/assets/`. Directory-style paths are answered with 404.
pub fn router(output_dir: &Path, assets_dir: Option<&Path>) -> Router {
    let mut app = Router::new();

    if let Some(assets) = assets_dir {
        app = app.nest_service(ASSETS_PREFIX, static_dir(assets, "/"));
    }

    app.fallback_service(static_dir(output_dir, POST_DIR_SUFFIX))
        .layer(TraceLayer::new_for_http())
}

fn static_dir(dir: &Path, masked_suffix: &'static str) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(middleware::from_fn_with_state(masked_suffix, not_found_on_suffix))
}

async fn not_found_on_suffix(
    State(suffix): State<&'static str>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path().ends_with(suffix) {
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(request).await
}

/// Bind `addr` and serve `app` until `shutdown` resolves.
pub async fn serve(
    addr: &str,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolve on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutting down");
}
