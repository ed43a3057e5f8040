use tokio::net::TcpListener;
use todo_core::{db, TodoService};
use todo_server::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_dir = std::env::var("TODO_CONFIG_DIR").unwrap_or_else(|_| "configs".to_string());
    let config = AppConfig::new(&config_dir)?;
    todo_server::logging::init_tracing(&config.logging)?;

    let pool = db::connect(&config.database.url, config.database.max_connections).await?;
    db::migrate(&pool).await?;

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    todo_server::run(listener, TodoService::new(pool), &config.server).await?;
    Ok(())
}
