//! Pipe-delimited TCP chat server.
//!
//! Every frame a client sends is reformatted as `IP [USER] TEXT` and
//! broadcast to all connected clients, the sender included.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin pipechat-server
//! cargo run --bin pipechat-server -- --host 127.0.0.1 --port 9000 --max-clients 4
//! ```

use std::time::Duration;

use clap::Parser;
use pipechat_server::ui::{Server, ServerConfig};
use pipechat_shared::{logger::setup_logger, protocol::SERVER_PORT};

#[derive(Parser, Debug)]
#[command(name = "pipechat-server")]
#[command(about = "TCP chat server with broadcast support", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = SERVER_PORT)]
    port: u16,

    /// Maximum number of simultaneously connected clients
    #[arg(short = 'm', long, default_value_t = 10)]
    max_clients: usize,

    /// Close sessions that send nothing for this many seconds
    #[arg(long, default_value_t = 15 * 60)]
    idle_timeout_secs: u64,

    /// Give up on a client whose socket accepts no data for this many seconds
    #[arg(long, default_value_t = 5)]
    write_timeout_secs: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_clients: args.max_clients,
            idle_timeout: Duration::from_secs(args.idle_timeout_secs),
            write_timeout: Duration::from_secs(args.write_timeout_secs),
            ..ServerConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig::from(args);

    let server = match Server::bind(config).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Server error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = server.run_until_ctrl_c().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
