use todo_core::config::TodoConfig;
use todo_core::store::JsonFileStore;
use todo_core::web::WebServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    todo_core::logging::init(false);
    tracing::info!("ToDo server starting");

    let cfg = TodoConfig::load();
    tracing::info!(data_file = cfg.data_file(), "Using data file");

    let store = JsonFileStore::new(cfg.data_file());
    let server = WebServer::new(store, cfg.listen_addr());

    if let Err(e) = server.start().await {
        tracing::error!("HTTP server error: {}", e);
        return Err(e);
    }

    tracing::info!("ToDo server shutting down");
    Ok(())
}
