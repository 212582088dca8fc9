use std::env;

use catex::app;
use catex::loader;

/// Main entry point for the web application
///
/// Loads the category spreadsheet once and starts the web server.
///
/// # Arguments
/// * First command line argument: path to the category file (default `categories.xlsx`)
/// * Second command line argument: bind address (default `127.0.0.1:3000`)
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let file_path = args.get(1).map(String::as_str).unwrap_or("categories.xlsx");
    let addr = args.get(2).map(String::as_str).unwrap_or("127.0.0.1:3000");

    // One-time dataset load; the dataset is immutable for the session
    let dataset = loader::load_dataset(file_path)?;
    if dataset.is_empty() {
        return Err(format!("No category rows found in {}", file_path).into());
    }
    log::info!("Loaded {} category rows from {}", dataset.len(), file_path);

    // Start the web application
    app::run(dataset, addr).await?;

    Ok(())
}
