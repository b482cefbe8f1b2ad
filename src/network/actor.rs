//! Network actor - runs gateway round trips in the Tokio runtime

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::gateway::QuoteGateway;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::execute_command;

/// Network actor that owns the gateway and runs each command as its own task
pub struct NetworkActor<G: QuoteGateway> {
    gateway: Arc<G>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl<G: QuoteGateway> NetworkActor<G> {
    pub fn new(gateway: G, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            gateway: Arc::new(gateway),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            tracing::info!(in_flight = self.active_requests.len(), "Network actor shutting down");
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(command) => self.spawn(command),
                    }
                }

                // Clean up completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        if e.is_panic() {
                            tracing::error!("Gateway task panicked: {}", e);
                        }
                    }
                }
            }
        }
    }

    fn spawn(&mut self, command: NetworkCommand) {
        let gateway = Arc::clone(&self.gateway);
        let response_tx = self.response_tx.clone();

        self.active_requests.spawn(async move {
            if let Some(response) = execute_command(gateway.as_ref(), command).await {
                let _ = response_tx.send(response);
            }
        });
    }
}
