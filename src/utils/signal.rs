use tokio::signal;

/// Resolves on Ctrl+C. If the handler can't be installed the server keeps
/// running until killed.
pub async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        crate::error::log_error(&e);
        std::future::pending::<()>().await;
    }

    #[cfg(not(windows))]
    println!();
    tracing::info!("Ctrl+C received, shutting down.");
}
