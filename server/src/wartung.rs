//! Periodische Wartungsaufgaben im Hintergrund

use std::time::Duration;

use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};

use nexablog_auth::TokenAussteller;

/// Intervall fuer das Entfernen abgelaufener Tokens
pub const BEREINIGUNG_INTERVALL: Duration = Duration::from_secs(15 * 60);

/// Startet den Task, der abgelaufene Tokens loescht
///
/// Der erste Durchlauf erfolgt sofort. Der Task endet, sobald `stopp`
/// sich aendert oder der Sender verworfen wird.
pub fn token_bereinigung_starten(
    tokens: TokenAussteller,
    intervall: Duration,
    mut stopp: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut takt = tokio::time::interval(intervall);
        takt.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = takt.tick() => {
                    if let Err(e) = tokens.abgelaufene_bereinigen().await {
                        tracing::warn!(fehler = %e, "Token-Bereinigung fehlgeschlagen");
                    }
                }
                _ = stopp.changed() => break,
            }
        }
        tracing::debug!("Token-Bereinigung beendet");
    })
}
