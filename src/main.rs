//! 用户 CRUD 服务入口

use std::env;
use std::path::PathBuf;

use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use users_api::{app::USERS_BASE_PATH, build_app, infrastructure::logger::Logger, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = Config::locate(env::args_os().nth(1).map(PathBuf::from));
    let config = Config::load(config_path.as_deref())?;
    let _log_guard = Logger::init(&config.logging)?;

    match &config_path {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let addr = config.socket_addr()?;
    let app = build_app(AppState::new(), &config.http);
    let listener = TcpListener::bind(addr).await?;

    info!("🚀 用户服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    {}              - 获取所有用户", USERS_BASE_PATH);
    info!("   GET    {}/:id          - 获取特定用户", USERS_BASE_PATH);
    info!("   POST   {}              - 创建新用户", USERS_BASE_PATH);
    info!("   PUT    {}/:id          - 全量更新用户", USERS_BASE_PATH);
    info!("   DELETE {}/:id          - 删除用户", USERS_BASE_PATH);
    info!("   GET    {}/search       - 分页搜索 (name, page, size)", USERS_BASE_PATH);
    info!("   GET    /health                - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

/// 等待 Ctrl+C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("监听 Ctrl+C 失败: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("监听 SIGTERM 失败: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到退出信号，开始优雅关闭");
}
