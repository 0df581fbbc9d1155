mod routes;

use std::sync::Arc;

use tower_http::trace::TraceLayer;

use crate::console::{args::ServerArgs, ctx::ConsoleCtx, error::KnaResult};

pub async fn run(ctx: Arc<ConsoleCtx>, args: &ServerArgs) -> KnaResult<()> {
    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    let router = axum::Router::new()
        .nest("/api", routes::create_router(ctx))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let matched_path = request.uri().path_and_query().map(ToString::to_string);
                tracing::info_span!("http_request", method = ?request.method(), matched_path)
            }),
        );

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
