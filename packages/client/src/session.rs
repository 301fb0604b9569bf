//! Client session management.

use std::{sync::Arc, time::Duration};

use tokio::{io::BufReader, net::TcpStream, sync::mpsc, time::timeout};

use crate::{
    config::ClientConfig,
    error::ClientError,
    pump::{FrameSender, ReceiveEnd, ReceivePump},
    renderer::Renderer,
    ui::{UserInput, spawn_input_thread},
};

/// How long to keep rendering after our goodbye, so the server's last
/// lines and its close are still shown
const DRAIN_AFTER_QUIT: Duration = Duration::from_secs(1);

/// An established connection and the IP this client claims in its frames
pub struct Connection {
    pub stream: TcpStream,
    pub own_ip: String,
}

/// Connect to the configured server.
///
/// Renders `Connected to server.` or `Connect failed`.
pub async fn connect(
    config: &ClientConfig,
    renderer: &dyn Renderer,
) -> Result<Connection, ClientError> {
    let addr = config.server_addr();
    let stream = match timeout(config.connect_timeout, TcpStream::connect(&addr)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            renderer.render("Connect failed", false);
            return Err(ClientError::ConnectionError(format!("{addr}: {e}")));
        }
        Err(_) => {
            renderer.render("Connect failed", false);
            return Err(ClientError::ConnectionError(format!(
                "{addr}: timed out after {:?}",
                config.connect_timeout
            )));
        }
    };

    if let Err(e) = stream.set_nodelay(true) {
        tracing::warn!("Failed to set TCP_NODELAY: {}", e);
    }

    let own_ip = match &config.sender_ip {
        Some(ip) => ip.clone(),
        None => stream.local_addr()?.ip().to_string(),
    };

    tracing::info!("Connected to {} as '{}' from {}", addr, config.username, own_ip);
    renderer.render("Connected to server.", false);
    Ok(Connection { stream, own_ip })
}

/// Run a connected session until the user quits or the server goes away.
///
/// `input` delivers the user's lines; [`UserInput::Quit`] or a closed
/// channel sends the disconnect sentinel.
pub async fn run_session(
    connection: Connection,
    config: &ClientConfig,
    renderer: Arc<dyn Renderer>,
    mut input: mpsc::UnboundedReceiver<UserInput>,
) -> Result<(), ClientError> {
    let Connection { stream, own_ip } = connection;
    let (read_half, write_half) = stream.into_split();

    let pump = ReceivePump::new(own_ip.clone(), renderer.clone());
    let mut receive_task = tokio::spawn(async move {
        let mut reader = BufReader::new(read_half);
        pump.run(&mut reader).await
    });

    let mut sender = FrameSender::new(
        write_half,
        own_ip,
        config.username.clone(),
        config.split_delay,
    );
    let send_loop = async {
        while let Some(UserInput::Line(text)) = input.recv().await {
            match sender.send_text(&text).await {
                Ok(_) => {}
                Err(ClientError::Protocol(e)) => {
                    renderer.render(&format!("Message not sent: {e}"), false);
                }
                Err(e) => return Err(e),
            }
        }
        sender.send_disconnect().await
    };

    // If either side finishes first, the other is stopped
    tokio::select! {
        sent = send_loop => {
            if sent.is_ok() && timeout(DRAIN_AFTER_QUIT, &mut receive_task).await.is_ok() {
                return Ok(());
            }
            receive_task.abort();
            sent
        }
        received = &mut receive_task => match received {
            Ok(ReceiveEnd::ServerClosed) => Ok(()),
            Ok(ReceiveEnd::ReadFailed) => Err(ClientError::ConnectionError(
                "Connection lost".to_string(),
            )),
            Err(e) => Err(ClientError::ConnectionError(format!(
                "Receive task failed: {e}"
            ))),
        },
    }
}

/// Connect, read input from the terminal, and chat until either side quits.
pub async fn run_client(
    config: ClientConfig,
    renderer: Arc<dyn Renderer>,
) -> Result<(), ClientError> {
    let connection = connect(&config, renderer.as_ref()).await?;
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Type /quit or press Ctrl+C to exit.\n",
        config.username
    );
    let input = spawn_input_thread(format!("{}> ", config.username));
    run_session(connection, &config, renderer, input).await
}
