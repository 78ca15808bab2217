use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::client_method;
use crate::domain::{Toast, ToastKind};
use crate::error::ToastError;
use crate::messages::ToastRequest;

/// Client for the toast actor. `Expire` is internal to the service and has
/// no client method.
#[derive(Clone)]
pub struct ToastClient {
    sender: mpsc::Sender<ToastRequest>,
}

impl ToastClient {
    pub fn new(sender: mpsc::Sender<ToastRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), String> {
        debug!("Sending shutdown request");
        self.sender
            .send(ToastRequest::Shutdown)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

client_method!(ToastClient => fn push(kind: ToastKind, message: String, subject: Option<String>) -> String as ToastRequest::Push, Error = ToastError);
client_method!(ToastClient => fn dismiss(id: String) -> () as ToastRequest::Dismiss, Error = ToastError);
client_method!(ToastClient => fn list() -> Vec<Toast> as ToastRequest::List, Error = ToastError);
