use crate::cli::ServeArgs;
use crate::infra::{seed_standard_campus, AppState};
use crate::routes::with_core_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hostel_ops::config::AppConfig;
use hostel_ops::error::AppError;
use hostel_ops::telemetry;
use hostel_ops::workflows::allocation::{
    AllocationEngine, AllocationPolicy, InMemoryDirectory,
};
use hostel_ops::workflows::complaints::{ComplaintService, InMemoryComplaintLog};
use hostel_ops::workflows::roster::RosterImporter;
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

    let policy = match &config.allocation.policy_path {
        Some(path) => AllocationPolicy::from_path(path)?,
        None => AllocationPolicy::default(),
    };

    let store = Arc::new(InMemoryDirectory::default());
    seed_standard_campus(&store);
    if let Some(roster) = args.roster.take() {
        let profiles = RosterImporter::from_path(&roster)?;
        info!(count = profiles.len(), path = %roster.display(), "roster registered");
        store.register_students(profiles);
    }

    let engine = Arc::new(AllocationEngine::new(store.clone(), policy));
    let complaints = Arc::new(ComplaintService::new(
        store,
        Arc::new(InMemoryComplaintLog::default()),
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_core_routes(engine, complaints)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hostel operations service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
