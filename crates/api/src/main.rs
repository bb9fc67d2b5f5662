use std::sync::Arc;

#[tokio::main]
async fn main() {
    restock_observability::init();

    let services = match restock_api::app::services::build_services().await {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!("failed to build services: {e}");
            std::process::exit(1);
        }
    };

    let app = restock_api::app::build_app(services);

    let addr = std::env::var("RESTOCK_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
