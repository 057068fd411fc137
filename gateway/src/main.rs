use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::prelude::*;

use citiwatch_gateway::clients::BackendClient;
use citiwatch_gateway::config::Config;
use citiwatch_gateway::middleware::RequestGate;
use citiwatch_gateway::rest_api;

async fn health_handler() -> &'static str {
    "ok"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,citiwatch_gateway=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true),
        )
        .init();

    info!("Starting CitiWatch gateway...");

    let config = Config::from_env()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    info!(
        backend = %config.backend.base_url,
        "Configuration loaded"
    );

    let client = BackendClient::new(&config.backend)
        .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;

    let bind_addr = (config.server.host.clone(), config.server.port);
    info!(host = %bind_addr.0, port = bind_addr.1, "Binding HTTP server");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(client.clone()))
            .wrap(RequestGate)
            .wrap(TracingLogger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/health", web::get().to(health_handler))
            .configure(rest_api::configure)
    })
    .workers(config.server.workers)
    .bind(bind_addr)?
    .run()
    .await
}
