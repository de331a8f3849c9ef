use crate::cli::ServeArgs;
use crate::infra::{build_engine, AppState};
use crate::routes::with_persony_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use persony::config::AppConfig;
use persony::error::AppError;
use persony::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(catalog) = args.catalog.take() {
        config.questionnaire.catalog_path = Some(catalog);
    }

    telemetry::init(&config.telemetry)?;

    let engine = build_engine(args.engine, &config.questionnaire)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_persony_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, engine = %args.engine, "persony questionnaire service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
