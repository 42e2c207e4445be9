// Server loop module
// Accepts connections until the shutdown signal fires

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::handler::Service;
use crate::logger;

/// Run the accept loop for one listener
///
/// Returns once `shutdown` is notified. Connections already being served keep
/// running on the `LocalSet`; use [`drain_connections`] before leaving it.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    service: Service,
    shutdown: Arc<Notify>,
) {
    let shutdown_signal = shutdown.notified();
    tokio::pin!(shutdown_signal);
    // Register interest now so a notify_waiters between iterations is not lost
    shutdown_signal.as_mut().enable();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections, service);
                    }
                    Err(e) => {
                        logger::log_error(&format!(
                            "[{}] Failed to accept connection: {e}",
                            service.label()
                        ));
                    }
                }
            }

            () = &mut shutdown_signal => {
                logger::log_info(&format!("[{}] Listener stopped", service.label()));
                return;
            }
        }
    }
}

/// Wait for every counter to reach zero, polling until `grace` elapses
///
/// Returns `false` if connections were still open at the deadline. Must run
/// on the same `LocalSet` as the connection tasks.
pub async fn drain_connections(counters: &[&AtomicUsize], grace: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + grace;
    loop {
        let open: usize = counters.iter().map(|c| c.load(Ordering::SeqCst)).sum();
        if open == 0 {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "{open} connection(s) still open after {}s, closing",
                grace.as_secs()
            ));
            return false;
        }
        logger::log_debug(&format!("[Shutdown] Waiting for {open} connection(s)"));
        tokio::time::sleep(DRAIN_POLL).await;
    }
}

const DRAIN_POLL: Duration = Duration::from_millis(50);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_reusable_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    #[tokio::test]
    async fn test_serves_demo_and_stops_on_shutdown() {
        let mut cfg = Config::load_from("definitely-missing-config-file").unwrap();
        cfg.logging.access_log = false;
        let state = Arc::new(AppState::books(&cfg).unwrap());
        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let server = tokio::task::spawn_local(start_server_loop(
                    listener,
                    state,
                    Arc::new(AtomicUsize::new(0)),
                    Service::Demo,
                    Arc::clone(&shutdown),
                ));

                let mut stream = TcpStream::connect(addr).await.unwrap();
                stream
                    .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
                    .await
                    .unwrap();
                let mut response = String::new();
                stream.read_to_string(&mut response).await.unwrap();
                assert!(response.starts_with("HTTP/1.1 200"));
                assert!(response.ends_with("Welcome to LearnCodeOnline server"));

                shutdown.notify_waiters();
                server.await.unwrap();
            })
            .await;
    }

    #[tokio::test]
    async fn test_shutdown_drains_in_flight_request() {
        let mut cfg = Config::load_from("definitely-missing-config-file").unwrap();
        cfg.logging.access_log = false;
        let state = Arc::new(AppState::books(&cfg).unwrap());
        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let active = Arc::new(AtomicUsize::new(0));

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let server = tokio::task::spawn_local(start_server_loop(
                    listener,
                    state,
                    Arc::clone(&active),
                    Service::Demo,
                    Arc::clone(&shutdown),
                ));

                // Send the head and half the body, then stop the listener
                let mut stream = TcpStream::connect(addr).await.unwrap();
                stream
                    .write_all(
                        b"POST /post HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
                          Content-Type: application/json\r\nContent-Length: 9\r\n\r\n{\"a\":",
                    )
                    .await
                    .unwrap();
                tokio::time::sleep(Duration::from_millis(100)).await;
                assert_eq!(active.load(Ordering::SeqCst), 1);

                shutdown.notify_waiters();
                server.await.unwrap();

                let client = async {
                    stream.write_all(b"\"x\"}").await.unwrap();
                    let mut response = String::new();
                    stream.read_to_string(&mut response).await.unwrap();
                    response
                };
                let counters = [active.as_ref()];
                let (drained, response) =
                    tokio::join!(drain_connections(&counters, Duration::from_secs(5)), client);

                assert!(drained);
                assert!(response.starts_with("HTTP/1.1 200"));
                assert!(response.ends_with(r#"{"a":"x"}"#));
            })
            .await;
    }

    #[tokio::test]
    async fn test_drain_gives_up_at_deadline() {
        let stuck = AtomicUsize::new(1);
        assert!(!drain_connections(&[&stuck], Duration::from_millis(60)).await);
        assert!(drain_connections(&[&AtomicUsize::new(0)], Duration::ZERO).await);
    }
}
