use crate::cli::ServeArgs;
use crate::infra::{load_catalog, load_profiles, AppState, InMemoryProfileStore};
use crate::routes::with_safety_routes;
use axum::Extension;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use transfit_safety::config::AppConfig;
use transfit_safety::error::AppError;
use transfit_safety::safety::{SafetyEngine, SafetyEvaluationService};
use transfit_safety::telemetry;
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

    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
    };

    let engine = SafetyEngine::standard()?;
    let catalog = Arc::new(load_catalog(args.catalog.as_deref(), &config.catalog)?);
    let profiles = Arc::new(InMemoryProfileStore::with_profiles(load_profiles(
        args.profiles.as_deref(),
    )?));
    info!(
        rules = engine.registry().len(),
        exercises = catalog.len(),
        profiles = profiles.len(),
        "safety engine initialized"
    );

    let service = Arc::new(SafetyEvaluationService::new(profiles, catalog, engine));
    let app = with_safety_routes(service).layer(Extension(app_state));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "safety service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
