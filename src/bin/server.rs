//! Server: loads settings from env / `.env`, connects the pool, mounts the record routes.

use shape_rest::{build_router, AppState, LogFormat, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("shape_rest=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Full => builder.init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;
    init_tracing(settings.log_format);

    // Lazy so the server still starts, and answers 500, while the database is down.
    let pool = settings
        .database
        .pool_options()
        .connect_lazy_with(settings.database.connect_options()?);
    let app = build_router(AppState::from_pool(pool));

    let listener = TcpListener::bind(("0.0.0.0", settings.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
