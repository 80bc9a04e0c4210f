//! 核心中间件模块

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    if status.is_client_error() || status.is_server_error() {
        warn!("{} {} - {} - {}ms", method, uri, status, duration.as_millis());
    } else {
        info!("{} {} - {} - {}ms", method, uri, status, duration.as_millis());
    }

    response
}
