use std::{sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::events::{
    default_dispatcher, DispatchError, EventContext, EventDispatcher, GatewayEnvelope,
    GatewayEvent, SubmittedForm,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("transport failed to connect: {0}")]
    Connect(String),
    #[error("transport read failed: {0}")]
    Receive(String),
    #[error("transport ack failed: {0}")]
    Acknowledge(String),
    #[error("transport disconnect failed: {0}")]
    Disconnect(String),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self { max_retries: 5, base_delay_ms: 250, max_delay_ms: 5_000 }
    }
}

impl ReconnectPolicy {
    fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(16);
        let multiplier = 1_u64 << exponent;
        let delay_ms = self.base_delay_ms.saturating_mul(multiplier).min(self.max_delay_ms);
        Duration::from_millis(delay_ms)
    }
}

/// Event-delivery seam of the excluded platform client. A real transport
/// wraps the Discord gateway websocket; tests script it.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    async fn connect(&self) -> Result<(), TransportError>;
    async fn next_envelope(&self) -> Result<Option<GatewayEnvelope>, TransportError>;
    async fn acknowledge(&self, envelope_id: &str) -> Result<(), TransportError>;
    async fn disconnect(&self) -> Result<(), TransportError>;
}

#[derive(Default)]
pub struct NoopGatewayTransport;

#[async_trait]
impl GatewayTransport for NoopGatewayTransport {
    async fn connect(&self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn next_envelope(&self) -> Result<Option<GatewayEnvelope>, TransportError> {
        Ok(None)
    }

    async fn acknowledge(&self, _envelope_id: &str) -> Result<(), TransportError> {
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

pub struct GatewayRunner {
    transport: Arc<dyn GatewayTransport>,
    dispatcher: EventDispatcher,
    reconnect_policy: ReconnectPolicy,
    noop_transport: bool,
}

impl Default for GatewayRunner {
    fn default() -> Self {
        Self {
            transport: Arc::new(NoopGatewayTransport),
            dispatcher: default_dispatcher(),
            reconnect_policy: ReconnectPolicy::default(),
            noop_transport: true,
        }
    }
}

impl GatewayRunner {
    pub fn new(
        transport: Arc<dyn GatewayTransport>,
        dispatcher: EventDispatcher,
        reconnect_policy: ReconnectPolicy,
    ) -> Self {
        Self { transport, dispatcher, reconnect_policy, noop_transport: false }
    }

    /// Offline runner: real dispatcher, noop event delivery.
    pub fn noop(dispatcher: EventDispatcher) -> Self {
        Self {
            transport: Arc::new(NoopGatewayTransport),
            dispatcher,
            reconnect_policy: ReconnectPolicy::default(),
            noop_transport: true,
        }
    }

    pub fn is_noop_transport(&self) -> bool {
        self.noop_transport
    }

    pub async fn start(&self) -> Result<()> {
        for attempt in 0..=self.reconnect_policy.max_retries {
            match self.connect_and_pump(attempt).await {
                Ok(()) => return Ok(()),
                Err(transport_error) => {
                    warn!(
                        attempt,
                        max_retries = self.reconnect_policy.max_retries,
                        error = %transport_error,
                        "gateway transport failed"
                    );

                    if attempt >= self.reconnect_policy.max_retries {
                        warn!(
                            max_retries = self.reconnect_policy.max_retries,
                            "gateway retries exhausted; continuing process without crash"
                        );
                        return Ok(());
                    }

                    let delay = self.reconnect_policy.backoff(attempt);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Ok(())
    }

    async fn connect_and_pump(&self, attempt: u32) -> Result<(), TransportError> {
        info!(attempt, "opening gateway transport connection");
        self.transport.connect().await?;
        info!(attempt, "gateway transport connected");

        loop {
            let Some(envelope) = self.transport.next_envelope().await? else {
                info!(attempt, "gateway transport stream closed");
                self.transport.disconnect().await?;
                return Ok(());
            };
            let session_id = session_id_hint(&envelope);

            info!(
                event_name = "ingress.gateway.envelope_received",
                envelope_id = %envelope.envelope_id,
                event_type = ?envelope.event.event_type(),
                correlation_id = %envelope.envelope_id,
                session_id = session_id.as_deref().unwrap_or("unknown"),
                "received gateway envelope"
            );

            if let Err(error) = self.transport.acknowledge(&envelope.envelope_id).await {
                warn!(
                    event_name = "ingress.gateway.ack_sent",
                    envelope_id = %envelope.envelope_id,
                    correlation_id = %envelope.envelope_id,
                    session_id = session_id.as_deref().unwrap_or("unknown"),
                    error = %error,
                    "failed to acknowledge gateway envelope"
                );
            } else {
                debug!(
                    event_name = "ingress.gateway.ack_sent",
                    envelope_id = %envelope.envelope_id,
                    correlation_id = %envelope.envelope_id,
                    session_id = session_id.as_deref().unwrap_or("unknown"),
                    "acknowledged gateway envelope"
                );
            }

            let context = EventContext { correlation_id: envelope.envelope_id.clone() };
            if let Err(error) = self.dispatcher.dispatch(&envelope, &context).await {
                warn!(
                    envelope_id = %envelope.envelope_id,
                    correlation_id = %envelope.envelope_id,
                    session_id = session_id.as_deref().unwrap_or("unknown"),
                    error = %error,
                    "event dispatch failed; continuing gateway loop"
                );
            }
        }
    }
}

fn session_id_hint(envelope: &GatewayEnvelope) -> Option<String> {
    match &envelope.event {
        GatewayEvent::ComponentAction(event) => event.value.clone(),
        GatewayEvent::FormSubmit(event) => match &event.form {
            SubmittedForm::EditSession { session_id, .. } => Some(session_id.to_string()),
            SubmittedForm::CreateSession { .. } => None,
        },
        GatewayEvent::SlashCommand(_)
        | GatewayEvent::MessageCommand(_)
        | GatewayEvent::Unsupported { .. } => None,
    }
}
