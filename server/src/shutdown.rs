//! Shutdown-Signale (Ctrl-C, SIGTERM)

/// Wartet auf Ctrl-C oder (unter Unix) SIGTERM
pub async fn signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(fehler = %e, "Ctrl-C-Handler konnte nicht registriert werden");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::warn!(fehler = %e, "SIGTERM-Handler konnte nicht registriert werden");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl-C empfangen, Server wird beendet"),
        _ = sigterm => tracing::info!("SIGTERM empfangen, Server wird beendet"),
    }
}
