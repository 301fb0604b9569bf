//! Interactive pipechat client.
//!
//! Connects to a chat server, sends each typed line (split in two when it
//! is longer than 40 characters) and shows every broadcast line. Your own
//! messages are shown with `<<` instead of `>>`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin pipechat-client -- --user alice
//! cargo run --bin pipechat-client -- -u bob -s 192.168.0.10 -p 8888
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use pipechat_client::{ClientConfig, TerminalRenderer};
use pipechat_shared::{
    logger::setup_logger,
    protocol::{SERVER_PORT, Username},
};

#[derive(Parser, Debug)]
#[command(name = "pipechat-client")]
#[command(about = "TCP chat client with split-message support", long_about = None)]
struct Args {
    /// Username shown next to your messages (1-5 characters)
    #[arg(short = 'u', long = "user", value_parser = parse_username)]
    username: Username,

    /// Server host name or IP address
    #[arg(short = 's', long, default_value = "127.0.0.1")]
    server: String,

    /// Server port
    #[arg(short = 'p', long, default_value_t = SERVER_PORT)]
    port: u16,

    /// IP to put in outgoing frames (default: the connection's local address)
    #[arg(long)]
    ip: Option<String>,

    /// Pause in milliseconds between the two halves of a split message
    #[arg(long, default_value_t = 50)]
    split_delay_ms: u64,
}

fn parse_username(value: &str) -> Result<Username, String> {
    Username::new(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    let mut config = ClientConfig::new(args.server, args.username);
    config.port = args.port;
    config.sender_ip = args.ip;
    config.split_delay = Duration::from_millis(args.split_delay_ms);

    let renderer = Arc::new(TerminalRenderer::new(format!("{}> ", config.username)));

    // Run the client
    if let Err(e) = pipechat_client::run_client(config, renderer).await {
        tracing::error!("Client error: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
