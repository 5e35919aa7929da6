use fuckboss_api::{Config, serve};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env();
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("API Endpoints:");
    info!("  GET    /health               - Health check");
    info!("  POST   /api/posts            - Create post");
    info!("  GET    /api/posts            - List posts (cityCode, paginated)");
    info!("  GET    /api/posts/{{id}}     - Get specific post");
    info!("  POST   /api/posts/search     - Search posts by keyword");

    serve(listener, config).await
}
