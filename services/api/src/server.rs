use crate::cli::ServeArgs;
use crate::infra::{load_store, AppState};
use crate::routes::with_promotion_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use recruit_slots::config::AppConfig;
use recruit_slots::error::AppError;
use recruit_slots::telemetry;
use recruit_slots::workflows::promotion::PromotionService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

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

    match &config.crm {
        Some(crm) => info!(domain = %crm.domain, "CRM webhook credentials configured"),
        None => warn!("CRM credentials not configured; serving from the snapshot store only"),
    }

    let store = Arc::new(load_store(config.snapshot_path.as_deref())?);
    info!(projects = store.project_count(), "record store ready");
    let promotion_service = Arc::new(PromotionService::new(store.clone(), store));

    let app = with_promotion_routes(promotion_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "promotion webhook service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
