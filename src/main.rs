use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::info;

use atrium::catalog::RoomCatalog;
use atrium::registry::Registry;
use atrium::wire;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let metrics_port: Option<u16> = std::env::var("ATRIUM_METRICS_PORT")
        .ok()
        .and_then(|s| s.parse().ok());
    atrium::observability::init(metrics_port);

    let port = std::env::var("ATRIUM_PORT").unwrap_or_else(|_| "7474".into());
    let bind = std::env::var("ATRIUM_BIND").unwrap_or_else(|_| "0.0.0.0".into());
    let max_connections: usize = std::env::var("ATRIUM_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(256);

    // A bad catalog aborts startup here; requests never see it.
    let catalog = match std::env::var("ATRIUM_CATALOG") {
        Ok(path) => {
            info!("loading catalog from {path}");
            RoomCatalog::from_path(&path)?
        }
        Err(_) => RoomCatalog::default_campus(),
    };

    let registry = Arc::new(Registry::new(&catalog));
    metrics::gauge!(atrium::observability::ROOMS).set(registry.room_count() as f64);

    let semaphore = Arc::new(Semaphore::new(max_connections));

    let addr = format!("{bind}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("atrium listening on {addr}");
    info!("  rooms: {}", registry.room_count());
    info!("  max_connections: {max_connections}");
    info!(
        "  metrics: {}",
        metrics_port.map_or("disabled".to_string(), |p| format!(
            "http://0.0.0.0:{p}/metrics"
        ))
    );

    // Graceful shutdown: stop accepting on SIGTERM/ctrl-c, drain in-flight connections
    let shutdown = async {
        let ctrl_c = tokio::signal::ctrl_c();
        #[cfg(unix)]
        {
            let mut sigterm =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("failed to register SIGTERM handler");
            tokio::select! {
                _ = ctrl_c => {}
                _ = sigterm.recv() => {}
            }
        }
        #[cfg(not(unix))]
        {
            ctrl_c.await.ok();
        }
    };
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (socket, peer) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::error!("accept error: {e}");
                        continue;
                    }
                };

                let permit = match semaphore.clone().try_acquire_owned() {
                    Ok(permit) => permit,
                    Err(_) => {
                        tracing::warn!("connection limit reached, rejecting {peer}");
                        metrics::counter!(atrium::observability::CONNECTIONS_REJECTED_TOTAL).increment(1);
                        drop(socket);
                        continue;
                    }
                };

                info!("connection from {peer}");
                metrics::counter!(atrium::observability::CONNECTIONS_TOTAL).increment(1);
                metrics::gauge!(atrium::observability::CONNECTIONS_ACTIVE).increment(1.0);
                let registry = registry.clone();

                tokio::spawn(async move {
                    let _permit = permit; // held until connection closes
                    if let Err(e) = wire::process_connection(socket, registry).await {
                        tracing::error!("connection error from {peer}: {e}");
                    }
                    metrics::gauge!(atrium::observability::CONNECTIONS_ACTIVE).decrement(1.0);
                });
            }
            _ = &mut shutdown => {
                info!("shutdown signal received, stopping accept loop");
                break;
            }
        }
    }

    // Wait for in-flight connections to finish (up to 10s)
    info!("draining connections...");
    let drain_deadline = tokio::time::sleep(std::time::Duration::from_secs(10));
    tokio::pin!(drain_deadline);

    loop {
        if semaphore.available_permits() == max_connections {
            info!("all connections drained");
            break;
        }
        tokio::select! {
            _ = &mut drain_deadline => {
                let remaining = max_connections - semaphore.available_permits();
                tracing::warn!("drain timeout, {remaining} connections still open");
                break;
            }
            _ = tokio::time::sleep(std::time::Duration::from_millis(100)) => {}
        }
    }

    info!("atrium stopped");
    Ok(())
}
