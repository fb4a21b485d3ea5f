// commands/mod.rs
use crate::{error::AppError, models::{AppState, RequestAck}};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Fixed GET endpoint that runs a canned action and acknowledges it.
#[async_trait]
pub trait PredefinedRequest: Send + Sync {
    fn path(&self) -> &'static str;
    fn name(&self) -> &'static str;
    async fn execute(&self, state: Arc<AppState>) -> Result<RequestAck, AppError>;
}

inventory::collect!(&'static dyn PredefinedRequest);

pub fn registered() -> impl Iterator<Item = &'static dyn PredefinedRequest> {
    inventory::iter::<&'static dyn PredefinedRequest>
        .into_iter()
        .copied()
}

fn acknowledge(name: &str) -> RequestAck {
    info!("Executing {}", name);
    RequestAck {
        status: "success",
        message: format!("{name} executed"),
    }
}

pub struct Request1;

#[async_trait]
impl PredefinedRequest for Request1 {
    fn path(&self) -> &'static str {
        "/request1"
    }

    fn name(&self) -> &'static str {
        "Request 1"
    }

    async fn execute(&self, _state: Arc<AppState>) -> Result<RequestAck, AppError> {
        Ok(acknowledge(self.name()))
    }
}

pub struct Request2;

#[async_trait]
impl PredefinedRequest for Request2 {
    fn path(&self) -> &'static str {
        "/request2"
    }

    fn name(&self) -> &'static str {
        "Request 2"
    }

    async fn execute(&self, _state: Arc<AppState>) -> Result<RequestAck, AppError> {
        Ok(acknowledge(self.name()))
    }
}

inventory::submit! {
    &Request1 as &'static dyn PredefinedRequest
}

inventory::submit! {
    &Request2 as &'static dyn PredefinedRequest
}
