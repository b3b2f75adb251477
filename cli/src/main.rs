use autograde_cli::cmd::{GlobalArgs, EXIT_FAILURE};
use clap::Parser;

#[tokio::main]
async fn main() {
    let app = GlobalArgs::parse();
    app.init_logger();
    app.exec_subcmd().await.unwrap_or_else(|e| {
        eprintln!("Error: {:?}", e);
        std::process::exit(EXIT_FAILURE);
    });
}
