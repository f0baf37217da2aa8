use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use energy_report_server::{cli, config, db, openapi, routes, state};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

async fn bind_listener(addr: &str) -> Result<TcpListener> {
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
            anyhow::bail!(
                "Failed to bind energy-report-server listener on {addr}: port already in use. Stop the other service using this port or re-run with --port to choose another port.",
            );
        }
        Err(err) => Err(err)
            .with_context(|| format!("failed to bind energy-report-server listener on {addr}")),
    }
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let mut allowed = Vec::with_capacity(origins.len());
    for origin in origins {
        allowed.push(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {origin}"))?,
        );
    }
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    if args.print_openapi {
        println!(
            "{}",
            serde_json::to_string_pretty(&openapi::openapi_json())?
        );
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = config::ReportConfig::from_env()?;
    let pool = db::connect_lazy(&config.database_url)?;

    let cors = cors_layer(&config.cors_allowed_origins)?;

    // Report generation POSTs are the expensive paths; GETs stay unlimited.
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .methods(vec![axum::http::Method::POST])
            .use_headers()
            .finish()
            .context("failed to build rate limiter config")?,
    );
    let governor_limiter = governor_conf.limiter().clone();
    std::thread::spawn(move || loop {
        std::thread::sleep(std::time::Duration::from_secs(60));
        governor_limiter.retain_recent();
    });

    let state = state::AppState {
        config: config.clone(),
        db: pool,
    };

    let app = routes::router(state)
        .layer(GovernorLayer::new(governor_conf))
        .layer(cors);
    let addr = format!("{}:{}", args.host, args.port);
    let listener = bind_listener(&addr).await?;
    tracing::info!(%addr, "energy-report-server listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}
