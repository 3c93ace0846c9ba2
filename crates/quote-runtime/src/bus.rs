//! # Signal Bus
//!
//! The `select-plan` broadcast channel shared by every plan button on the
//! page and the simulator.
//!
//! ## Message Flow
//! ```text
//! ┌──────────────┐   publish_plan("premium")   ┌───────────────────────────┐
//! │ Pricing card │ ──────────────────────────► │                           │
//! └──────────────┘                             │  broadcast::Sender        │
//! ┌──────────────┐   publish_json(r#"{...}"#)  │  <SelectPlan>             │
//! │ Hero CTA     │ ──────────────────────────► │                           │
//! └──────────────┘                             └─────────────┬─────────────┘
//!                                                            │ subscribe()
//!                                                            ▼ (once, at mount)
//!                                               ┌───────────────────────────┐
//!                                               │ Simulator                 │
//!                                               │ select_plan(key, announce)│
//!                                               └───────────────────────────┘
//! ```
//!
//! The simulator does not know or care which producer sent a message.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::RuntimeResult;

/// Name of the plan selection channel.
pub const SELECT_PLAN_EVENT: &str = "select-plan";

/// Payload of the `select-plan` channel.
///
/// A missing `planKey` deserializes to an empty key, which the simulator
/// ignores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPlan {
    #[serde(default)]
    pub plan_key: String,
}

impl SelectPlan {
    pub fn new(plan_key: impl Into<String>) -> Self {
        SelectPlan {
            plan_key: plan_key.into(),
        }
    }

    /// Whether the message names a plan at all.
    pub fn is_empty(&self) -> bool {
        self.plan_key.trim().is_empty()
    }
}

/// Cloneable handle to the `select-plan` channel.
#[derive(Debug, Clone)]
pub struct SignalBus {
    tx: broadcast::Sender<SelectPlan>,
}

impl SignalBus {
    /// Creates a bus retaining up to `capacity` messages per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        SignalBus { tx }
    }

    /// Publishes a message.
    ///
    /// ## Returns
    /// Number of subscribers that will see it. Zero is not an error.
    pub fn publish(&self, msg: SelectPlan) -> usize {
        match self.tx.send(msg) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(msg)) => {
                debug!(
                    channel = SELECT_PLAN_EVENT,
                    plan_key = %msg.plan_key,
                    "No subscribers for select-plan message"
                );
                0
            }
        }
    }

    /// Publishes a plan key.
    pub fn publish_plan(&self, plan_key: impl Into<String>) -> usize {
        self.publish(SelectPlan::new(plan_key))
    }

    /// Parses and publishes a raw JSON payload such as `{"planKey":"standard"}`.
    pub fn publish_json(&self, payload: &str) -> RuntimeResult<usize> {
        let msg: SelectPlan = serde_json::from_str(payload)?;
        Ok(self.publish(msg))
    }

    /// Subscribes to messages published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SelectPlan> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        SignalBus::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    #[test]
    fn test_payload_wire_format() {
        let json = serde_json::to_string(&SelectPlan::new("standard")).unwrap();
        assert_eq!(json, r#"{"planKey":"standard"}"#);

        let missing: SelectPlan = serde_json::from_str("{}").unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = SignalBus::new(4);
        assert_eq!(bus.publish_plan("light"), 0);
    }

    #[test]
    fn test_publish_reaches_every_subscriber() {
        let bus = SignalBus::new(4);
        let mut a = bus.subscribe();
        let mut b = bus.clone().subscribe();

        assert_eq!(bus.publish_plan("premium"), 2);
        assert_eq!(a.try_recv().unwrap().plan_key, "premium");
        assert_eq!(b.try_recv().unwrap().plan_key, "premium");
    }

    #[test]
    fn test_publish_json() {
        let bus = SignalBus::new(4);
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish_json(r#"{"planKey":"light"}"#).unwrap(), 1);
        assert_eq!(rx.try_recv().unwrap(), SelectPlan::new("light"));

        let err = bus.publish_json(r#"{"planKey":"#).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidPayload(_)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let bus = SignalBus::new(0);
        let mut rx = bus.subscribe();
        bus.publish_plan("light");
        assert_eq!(rx.try_recv().unwrap().plan_key, "light");
    }
}
