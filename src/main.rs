use std::sync::Arc;

use quitsmoke::config::{load_config, print_schema};
use quitsmoke::startup;
use quitsmoke::utils::logger::init_logging;
use tracing::error;

#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--schema") {
        if let Err(e) = print_schema() {
            eprintln!("Failed to render config schema: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let config = load_config();

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Failed to initialise logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = startup::run(Arc::new(config)).await {
        error!(
            event_name = "server.failed",
            event_domain = "server",
            error = %e,
            "server terminated with an error"
        );
        std::process::exit(1);
    }
}
