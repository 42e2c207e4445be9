// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGUSR1: Toggle access logging

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

/// Signal handler state
pub struct SignalHandler {
    /// Shutdown signal (SIGTERM, SIGINT)
    pub shutdown: Arc<Notify>,
    /// Whether shutdown has been requested
    pub shutdown_requested: AtomicBool,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
            shutdown_requested: AtomicBool::new(false),
        }
    }

    /// Record the request and wake every listener loop
    pub fn request_shutdown(&self, reason: &str) {
        if !self.shutdown_requested.swap(true, Ordering::SeqCst) {
            logger::log_shutdown(reason);
        }
        self.shutdown.notify_waiters();
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Flip access logging and report the new setting
pub fn toggle_access_log(state: &AppState) -> bool {
    let enabled = !state.access_log();
    state.set_access_log(enabled);
    logger::log_info(&format!(
        "Access logging {}",
        if enabled { "enabled" } else { "disabled" }
    ));
    enabled
}

/// Start signal handlers (Unix)
///
/// | Signal  | Action                |
/// |---------|-----------------------|
/// | SIGTERM | Graceful stop         |
/// | SIGINT  | Graceful stop         |
/// | SIGUSR1 | Toggle access logging |
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>, state: Arc<AppState>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let (mut sigterm, mut sigint, mut sigusr1) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
            signal(SignalKind::user_defined1()),
        ) {
            (Ok(term), Ok(int), Ok(usr1)) => (term, int, usr1),
            (term, int, usr1) => {
                for err in [term.err(), int.err(), usr1.err()].into_iter().flatten() {
                    logger::log_error(&format!("Failed to register signal handler: {err}"));
                }
                return;
            }
        };

        logger::log_debug(&format!(
            "[Signal] Handlers registered for process {}",
            std::process::id()
        ));

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    handler.request_shutdown("SIGTERM received");
                    break;
                }
                _ = sigint.recv() => {
                    handler.request_shutdown("SIGINT received");
                    break;
                }
                _ = sigusr1.recv() => {
                    toggle_access_log(&state);
                }
            }
        }
    });
}

/// Non-unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>, _state: Arc<AppState>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            handler.request_shutdown("Ctrl+C received");
        }
    });
}
