//! 应用层：路由注册与共享状态

pub mod users;

use std::time::Duration;

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::HttpConfig;
use crate::core::middleware::request_logging_middleware;
use users::{handler, UserStore};

/// 用户接口的基础路径
pub const USERS_BASE_PATH: &str = "/api/users";

#[derive(Clone, Default)]
pub struct AppState {
    pub users: UserStore,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 路由表，不含中间件
pub fn router(state: AppState) -> Router {
    let users = Router::new()
        .route("/", get(handler::list_users).post(handler::create_user))
        .route("/search", get(handler::search_users))
        .route(
            "/:id",
            get(handler::get_user)
                .put(handler::update_user)
                .delete(handler::delete_user),
        );

    Router::new()
        .nest(USERS_BASE_PATH, users)
        .route("/health", get(health_check))
        .with_state(state)
}

/// 完整应用：路由表加上日志、跨域与超时中间件
pub fn build_app(state: AppState, http: &HttpConfig) -> Router {
    let mut app = router(state)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http());

    if http.cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }
    if http.timeout_seconds > 0 {
        app = app.layer(TimeoutLayer::new(Duration::from_secs(http.timeout_seconds)));
    }

    app
}

/// 健康检查
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "users_count": state.users.len(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
