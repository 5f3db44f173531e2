use crate::cli::ServeArgs;
use crate::infra::{build_assessment_service, build_extractor, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use check_mate::config::{AppConfig, MailTransport};
use check_mate::error::AppError;
use check_mate::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let assessment_service = build_assessment_service(&config)?;
    let extractor = build_extractor(&config);

    let app = with_service_routes(assessment_service, extractor)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        provider = %config.llm.provider,
        model = %config.llm.model,
        sharing = config.mail.transport() != MailTransport::Disabled,
        "check mate service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
