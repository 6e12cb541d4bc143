// [libs/infra/broker/src/gateway.rs]
//! AMQP 0-9-1 gateway over a single topic exchange per environment (spec
//! §4.4). One `Gateway` owns one connection; channels are opened per
//! operation since lapin channels are cheap and publisher confirms are
//! scoped to a channel.

use std::sync::Arc;

use futures_util::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, BasicQosOptions,
    ConfirmSelectOptions, ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, ExchangeKind};
use serde::Serialize;
use tracing::{debug, error, warn};

use skirmish_domain_models::{HandlerOutcome, MessagePriority, QueueStep};

use crate::errors::BrokerError;

/// A worker processes one message at a time unless told otherwise (spec
/// §4.4 "Prefetch is 1 by default").
const DEFAULT_PREFETCH: u16 = 1;

/// Implemented by consumers of `Gateway::consume`/`batch_consume`. Handlers
/// decide success/failure; the gateway always acks without requeue (spec
/// §4.4 "a handler failure does not requeue").
#[async_trait::async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, payload: serde_json::Value) -> HandlerOutcome;
}

pub struct Gateway {
    connection: Connection,
    environment: String,
}

impl Gateway {
    pub async fn connect(amqp_url: &str, environment: impl Into<String>) -> Result<Self, BrokerError> {
        let properties = ConnectionProperties::default()
            .with_executor(tokio_executor_trait::Tokio::current())
            .with_reactor(tokio_reactor_trait::Tokio);
        let connection = Connection::connect(amqp_url, properties).await?;
        Ok(Self { connection, environment: environment.into() })
    }

    /// Declares the topic exchange, the step's durable queue, and the
    /// binding between them (spec §4.4 naming and durability).
    async fn declare_topology(&self, step: QueueStep) -> Result<Channel, BrokerError> {
        let channel = self.connection.create_channel().await?;
        let exchange = QueueStep::exchange_name(&self.environment);
        let queue = step.queue_name(&self.environment);

        channel
            .exchange_declare(
                &exchange,
                ExchangeKind::Topic,
                ExchangeDeclareOptions { durable: true, ..Default::default() },
                FieldTable::default(),
            )
            .await
            .map_err(|source| BrokerError::Topology { queue: queue.clone(), source })?;

        channel
            .queue_declare(
                &queue,
                QueueDeclareOptions { durable: true, ..Default::default() },
                FieldTable::default(),
            )
            .await
            .map_err(|source| BrokerError::Topology { queue: queue.clone(), source })?;

        channel
            .queue_bind(
                &queue,
                &exchange,
                &step.routing_key(),
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|source| BrokerError::Topology { queue, source })?;

        Ok(channel)
    }

    /// Serializes `payload` and routes it to `step`'s queue. A `false`
    /// return means the broker did not confirm the publish; the caller
    /// decides whether to retry since the ledger row remains authoritative
    /// (spec §4.4 "Publishing contract").
    pub async fn publish(
        &self,
        step: QueueStep,
        payload: &impl Serialize,
        priority: MessagePriority,
    ) -> Result<bool, BrokerError> {
        let channel = self.declare_topology(step).await?;
        channel.confirm_select(ConfirmSelectOptions::default()).await?;
        let body = serde_json::to_vec(payload)?;

        let properties = BasicProperties::default()
            .with_delivery_mode(2) // persistent
            .with_priority(priority.as_amqp_priority())
            .with_content_type("application/json".into());

        let confirm = channel
            .basic_publish(
                &QueueStep::exchange_name(&self.environment),
                &step.routing_key(),
                BasicPublishOptions::default(),
                &body,
                properties,
            )
            .await?
            .await?;

        let acked = confirm.is_ack();
        if !acked {
            warn!(queue = %step.queue_name(&self.environment), "broker did not acknowledge publish");
        }
        Ok(acked)
    }

    /// Consumes indefinitely, handing every delivery to `handler` and
    /// acking regardless of outcome (spec §4.4 "Consumption contract").
    pub async fn consume(&self, step: QueueStep, handler: Arc<dyn MessageHandler>) -> Result<(), BrokerError> {
        let channel = self.declare_topology(step).await?;
        channel
            .basic_qos(DEFAULT_PREFETCH, BasicQosOptions::default())
            .await?;

        let queue = step.queue_name(&self.environment);
        let mut consumer = channel
            .basic_consume(
                &queue,
                "skirmish-consumer",
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;

        while let Some(delivery) = consumer.next().await {
            let delivery = delivery?;
            dispatch_one(&delivery.data, handler.as_ref()).await;
            delivery.ack(BasicAckOptions::default()).await?;
        }
        Ok(())
    }

    /// Drains at most `max` messages then returns, for schedule-driven
    /// aggregators that are not long-running daemons (spec §4.4
    /// `BatchConsume`).
    pub async fn batch_consume(
        &self,
        step: QueueStep,
        handler: Arc<dyn MessageHandler>,
        max: usize,
    ) -> Result<usize, BrokerError> {
        let channel = self.declare_topology(step).await?;
        channel
            .basic_qos(DEFAULT_PREFETCH, BasicQosOptions::default())
            .await?;

        let queue = step.queue_name(&self.environment);
        let mut consumer = channel
            .basic_consume(
                &queue,
                "skirmish-batch-consumer",
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;

        let mut processed = 0;
        while processed < max {
            let Some(delivery) = consumer.next().await else { break };
            let delivery = delivery?;
            dispatch_one(&delivery.data, handler.as_ref()).await;
            delivery.ack(BasicAckOptions::default()).await?;
            processed += 1;
        }
        Ok(processed)
    }
}

async fn dispatch_one(body: &[u8], handler: &dyn MessageHandler) {
    let payload: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(parse_error) => {
            error!(%parse_error, "dropping malformed message body");
            return;
        }
    };

    match handler.handle(payload).await {
        HandlerOutcome::Ok => debug!("message handled"),
        HandlerOutcome::Error(message) => warn!(%message, "handler reported failure, not requeuing"),
    }
}
