use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionRepository};
use crate::routes::with_valuation_routes;
use avalia_ai::config::AppConfig;
use avalia_ai::error::AppError;
use avalia_ai::telemetry;
use avalia_ai::valuation::{HttpPriceEstimator, ValuationService};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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
    if let Some(layout) = args.layout.take() {
        config.valuation.layout = layout;
    }
    if let Some(url) = args.estimator_url.take() {
        config.valuation.estimator_url = url;
        config.valuation.validate()?;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let estimator = Arc::new(HttpPriceEstimator::new(&config.valuation.estimator_url)?);
    let repository = Arc::new(InMemorySessionRepository::default());
    let service = Arc::new(ValuationService::new(
        repository,
        estimator,
        config.valuation.layout,
    ));

    let app = with_valuation_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        layout = ?config.valuation.layout,
        estimator = %config.valuation.estimator_url,
        "valuation form service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
