// events/mod.rs
use dashmap::DashMap;

/// Published after every accepted control write; payload is a `ControlAck`.
pub const DEVICE_CONTROL: &str = "device_control";

type Callback = Box<dyn Fn(serde_json::Value) + Send + Sync>;

pub struct EventBus {
    subscribers: DashMap<String, Vec<Callback>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: DashMap::new(),
        }
    }

    pub fn publish(&self, event_type: &str, data: serde_json::Value) {
        if let Some(subscribers) = self.subscribers.get(event_type) {
            for callback in subscribers.iter() {
                (callback)(data.clone());
            }
        }
    }

    pub fn subscribe<F: Fn(serde_json::Value) + Send + Sync + 'static>(
        &self,
        event_type: &str,
        callback: F,
    ) {
        self.subscribers
            .entry(event_type.to_string())
            .or_default()
            .push(Box::new(callback));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn delivers_only_to_matching_subscribers() {
        let bus = EventBus::new();
        let controls = Arc::new(AtomicUsize::new(0));
        let others = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&controls);
        bus.subscribe(DEVICE_CONTROL, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&others);
        bus.subscribe("other", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(DEVICE_CONTROL, serde_json::json!({"device_id": "lamp1"}));
        bus.publish(DEVICE_CONTROL, serde_json::json!({"device_id": "lamp2"}));

        assert_eq!(controls.load(Ordering::SeqCst), 2);
        assert_eq!(others.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        EventBus::new().publish("nobody", serde_json::Value::Null);
    }
}
