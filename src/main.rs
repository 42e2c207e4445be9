use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use books_portal::config::{AppState, Config};
use books_portal::handler::Service;
use books_portal::logger;
use books_portal::server::{self, SignalHandler};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config file path without extension, e.g. `config` for config.toml
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let cfg = Config::load_from(&config_path)?;

    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let frontend_addr = cfg.get_socket_addr()?;
    let demo_addr = cfg.get_demo_socket_addr()?;

    let frontend_listener = server::create_reusable_listener(frontend_addr)?;
    let demo_listener = server::create_reusable_listener(demo_addr)?;

    let state = Arc::new(AppState::books(&cfg)?);
    let frontend_connections = Arc::new(AtomicUsize::new(0));
    let demo_connections = Arc::new(AtomicUsize::new(0));
    let grace = Duration::from_secs(std::cmp::max(
        cfg.performance.read_timeout,
        cfg.performance.write_timeout,
    ));
    let signals = Arc::new(SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals), Arc::clone(&state));

    logger::log_server_start(&frontend_addr, &demo_addr, &cfg);

    // spawn_local needs a LocalSet
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let demo = tokio::task::spawn_local(server::start_server_loop(
                demo_listener,
                Arc::clone(&state),
                Arc::clone(&demo_connections),
                Service::Demo,
                Arc::clone(&signals.shutdown),
            ));

            server::start_server_loop(
                frontend_listener,
                state,
                Arc::clone(&frontend_connections),
                Service::Frontend,
                Arc::clone(&signals.shutdown),
            )
            .await;

            demo.await?;

            // Dropping the LocalSet would cancel connections still being served
            server::drain_connections(&[frontend_connections.as_ref(), demo_connections.as_ref()], grace).await;
            Ok::<(), tokio::task::JoinError>(())
        })
        .await?;

    Ok(())
}
