use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::services::fetcher::{DataFetcher, ReservationCache};
use domain::services::notification::{LoggingNotificationService, NotificationService};
use domain::services::store::PlannerStore;

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{health, occupancy, planner, settings, suites};
use crate::services::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlannerStore>,
    pub fetcher: DataFetcher,
    pub sessions: Arc<SessionRegistry>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn PlannerStore>,
        notifier: Arc<dyn NotificationService>,
    ) -> Self {
        let fetcher = DataFetcher::new(store.clone(), Arc::new(ReservationCache::new()));
        let sessions = Arc::new(SessionRegistry::new(
            fetcher.clone(),
            notifier,
            config.planner.max_sessions,
        ));
        Self {
            store,
            fetcher,
            sessions,
            config: Arc::new(config),
        }
    }
}

pub fn create_app(config: Config, store: Arc<dyn PlannerStore>) -> Router {
    let state = AppState::new(config, store, Arc::new(LoggingNotificationService));
    router(state)
}

pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let planner_routes = Router::new()
        .route("/api/v1/planner/sessions", post(planner::open_session))
        .route(
            "/api/v1/planner/sessions/:session_id",
            delete(planner::close_session),
        )
        .route(
            "/api/v1/planner/sessions/:session_id/grid",
            get(planner::get_grid),
        )
        .route(
            "/api/v1/planner/sessions/:session_id/navigate",
            post(planner::navigate),
        )
        .route(
            "/api/v1/planner/sessions/:session_id/drag/pickup",
            post(planner::pick_up),
        )
        .route(
            "/api/v1/planner/sessions/:session_id/drag/hover",
            post(planner::hover),
        )
        .route(
            "/api/v1/planner/sessions/:session_id/drag/leave",
            post(planner::leave),
        )
        .route(
            "/api/v1/planner/sessions/:session_id/drag/drop",
            post(planner::drop_on),
        )
        .route(
            "/api/v1/planner/sessions/:session_id/drag/cancel",
            post(planner::cancel),
        )
        .route(
            "/api/v1/planner/sessions/:session_id/cells/:day/:column",
            get(planner::cell_route),
        );

    let read_routes = Router::new()
        .route("/api/v1/suites", get(suites::list_suites))
        .route("/api/v1/occupancy/today", get(occupancy::today))
        .route("/api/v1/settings/display", get(settings::display));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(read_routes)
        .merge(planner_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
