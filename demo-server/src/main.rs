use axum::Router;
use axum_table_browser::TableBrowserLayer;
use sqlx::sqlite::SqlitePool;
use tower_http::trace::TraceLayer;

mod database;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        )
        .init();

    // File-backed SQLite database; created on first run
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./demo.db?mode=rwc".to_string());
    let pool = SqlitePool::connect(&database_url)
        .await
        .expect("Failed to connect to SQLite database");

    // Seed demo tables so there is something to browse
    database::setup(&pool)
        .await
        .expect("Failed to setup database");

    // Mount the browser at the application root
    let app = Router::new()
        .merge(TableBrowserLayer::sqlite("", pool).into_router())
        .layer(TraceLayer::new_for_http());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind");

    tracing::info!("Table browser running at http://{bind_addr}/");
    axum::serve(listener, app).await.expect("Server error");
}
