use plateful_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载 .env
    dotenv::dotenv().ok();

    // 2. 加载配置并确保工作目录存在 (日志写入 work_dir/logs)
    let config = Config::from_env();
    config.ensure_work_dir_structure()?;
    setup_environment(&config);

    // 打印横幅
    print_banner();

    tracing::info!("Plateful server starting...");

    // 3. 初始化服务器状态
    let state = ServerState::initialize(&config).await;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
