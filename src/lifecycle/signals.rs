//! Reload signal handling.

use crate::config::reload::ReloadHandle;

/// Spawn a task translating SIGHUP into fire-and-forget reload triggers.
///
/// The coordinator logs each outcome; there is no caller to notify on this
/// path. No-op on non-unix targets.
pub fn spawn_reload_on_sighup(reload: ReloadHandle) {
    #[cfg(unix)]
    tokio::spawn(async move {
        let mut hangup = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup())
        {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGHUP handler");
                return;
            }
        };

        while hangup.recv().await.is_some() {
            tracing::info!("SIGHUP received, triggering config reload");
            reload.trigger().await;
        }
    });

    #[cfg(not(unix))]
    let _ = reload;
}
