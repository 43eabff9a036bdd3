use recipe_manager::{
    build_store, create_app, infrastructure::logger::Logger, openapi, Config, RecipeService,
};
use std::env;
use tokio::net::TcpListener;
use tracing::{error, info};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // --openapi 只输出接口文档
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", openapi().to_pretty_json()?);
        return Ok(());
    }

    let config = Config::load()?;
    let _log_guard = Logger::init(&config.logging)?;

    info!("Starting recipe manager...");

    let store = build_store(&config).await.map_err(|e| {
        error!("Failed to initialize storage: {}", e);
        e
    })?;
    let app = create_app(RecipeService::new(store), &config.http);

    let listener = TcpListener::bind(config.http.socket_addr()).await?;
    let addr = listener.local_addr()?;

    info!("🚀 Recipe manager running on http://{}", addr);
    info!("📖 API endpoints:");
    info!("   GET    /recipes          - List recipes (?vegetarian=&noOfServings=&ingredients=&instructions=)");
    info!("   POST   /recipes          - Create recipe");
    info!("   GET    /recipes/:id      - Get recipe by ID");
    info!("   PUT    /recipes/:id      - Update recipe");
    info!("   DELETE /recipes/:id      - Delete recipe");
    info!("   GET    /health           - Health check");
    info!("   GET    /api-docs/openapi.json - OpenAPI document");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
