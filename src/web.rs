#![cfg(not(tarpaulin_include))]

use propsheet::{app, loader};

/// Main entry point for the proposal-export web server
///
/// Starts the REST layer over an in-memory proposal store. An optional
/// command-line argument names a JSON batch to preload into the store.
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let initial = if args.len() >= 2 {
        let batch = loader::load_proposals(&args[1])?;
        log::info!("Preloaded {} proposals from {}", batch.len(), args[1]);
        batch
    } else {
        Vec::new()
    };

    app::run("127.0.0.1:3000", initial).await
}
