use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::ToastClient;
use crate::domain::{Toast, ToastKind};
use crate::error::ToastError;
use crate::messages::{ServiceResponse, ToastRequest};

/// How long a toast stays up before it removes itself.
pub const TOAST_TTL: Duration = Duration::from_millis(3000);

/// Toast actor. Owns the insertion-ordered notification list; every pushed
/// toast schedules its own expiry, and an explicit dismiss simply beats the
/// timer to the removal.
pub struct ToastService {
    receiver: mpsc::Receiver<ToastRequest>,
    /// Handle back into our own mailbox, cloned into each expiry timer.
    sender: mpsc::Sender<ToastRequest>,
    toasts: Vec<Toast>,
}

impl ToastService {
    pub fn new(buffer_size: usize) -> (Self, ToastClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            sender: sender.clone(),
            toasts: Vec::new(),
        };
        let client = ToastClient::new(sender);
        (service, client)
    }

    #[instrument(name = "toast_service", skip(self))]
    pub async fn run(mut self) {
        info!("ToastService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ToastRequest::Push {
                    kind,
                    message,
                    subject,
                    respond_to,
                } => {
                    self.handle_push(kind, message, subject, respond_to);
                }
                ToastRequest::Dismiss { id, respond_to } => {
                    self.handle_dismiss(id, respond_to);
                }
                ToastRequest::Expire { id } => {
                    self.handle_expire(id);
                }
                ToastRequest::List { respond_to } => {
                    self.handle_list(respond_to);
                }
                ToastRequest::Shutdown => {
                    info!("ToastService shutting down");
                    break;
                }
            }
        }

        info!("ToastService stopped");
    }

    #[instrument(fields(kind = ?kind, message = %message), skip(self, respond_to))]
    fn handle_push(
        &mut self,
        kind: ToastKind,
        message: String,
        subject: Option<String>,
        respond_to: ServiceResponse<String, ToastError>,
    ) {
        debug!("Processing push request");

        let toast = Toast::new(kind, message, subject);
        let id = toast.id.clone();
        self.toasts.push(toast);
        info!(toast_id = %id, toast_count = self.toasts.len(), "Toast enqueued");

        // Each toast schedules its own removal, measured from enqueue time.
        let expire_sender = self.sender.clone();
        let expire_id = id.clone();
        tokio::spawn(async move {
            tokio::time::sleep(TOAST_TTL).await;
            let _ = expire_sender.send(ToastRequest::Expire { id: expire_id }).await;
        });

        let _ = respond_to.send(Ok(id));
    }

    #[instrument(fields(toast_id = %id), skip(self, respond_to))]
    fn handle_dismiss(&mut self, id: String, respond_to: ServiceResponse<(), ToastError>) {
        debug!("Processing dismiss request");

        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        if self.toasts.len() < before {
            info!("Toast dismissed");
        } else {
            debug!("Toast already gone, dismiss is a no-op");
        }

        let _ = respond_to.send(Ok(()));
    }

    /// The timer's half of the removal. Idempotent with `dismiss`.
    #[instrument(fields(toast_id = %id), skip(self))]
    fn handle_expire(&mut self, id: String) {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        if self.toasts.len() < before {
            debug!("Toast expired");
        }
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list(&self, respond_to: ServiceResponse<Vec<Toast>, ToastError>) {
        debug!("Processing list request");
        let _ = respond_to.send(Ok(self.toasts.clone()));
    }
}
