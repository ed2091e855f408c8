use std::sync::Arc;

use cors_devserver::config::{self, AppState, Config};
use cors_devserver::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let port = config::parse_port_arg(args.as_slice()).map_err(|e| {
        logger::log_error(&e.to_string());
        e
    })?;

    let root_dir = config::default_root_dir()?;
    let cfg = Config::load(port, &root_dir)?;

    // Requests are served one at a time, a single thread is all we need
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr).map_err(|e| {
        logger::log_bind_failed(&addr, &e);
        e
    })?;

    let state = Arc::new(AppState::new(&cfg));

    logger::log_server_start(&cfg);
    server::start_server_loop(listener, state, server::shutdown_signal()).await;
    logger::log_server_stopped();

    Ok(())
}
