use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::client_method;
use crate::domain::{CategoryFilter, CheckoutForm, Product, SessionSnapshot};
use crate::error::SessionError;
use crate::messages::SessionRequest;

/// Client for the session actor: the operation set the rendering layer
/// drives.
#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
}

impl SessionClient {
    pub fn new(sender: mpsc::Sender<SessionRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), String> {
        debug!("Sending shutdown request");
        self.sender
            .send(SessionRequest::Shutdown)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

client_method!(SessionClient => fn browse() -> Vec<Product> as SessionRequest::Browse, Error = SessionError);
client_method!(SessionClient => fn set_search_query(query: String) -> () as SessionRequest::SetSearchQuery, Error = SessionError);
client_method!(SessionClient => fn set_category(filter: CategoryFilter) -> () as SessionRequest::SetCategory, Error = SessionError);
client_method!(SessionClient => fn clear_filters() -> () as SessionRequest::ClearFilters, Error = SessionError);
client_method!(SessionClient => fn open_cart_panel() -> () as SessionRequest::OpenCartPanel, Error = SessionError);
client_method!(SessionClient => fn close_cart_panel() -> () as SessionRequest::CloseCartPanel, Error = SessionError);
client_method!(SessionClient => fn add_to_cart(product_id: String) -> () as SessionRequest::AddToCart, Error = SessionError);
client_method!(SessionClient => fn remove_from_cart(product_id: String) -> () as SessionRequest::RemoveFromCart, Error = SessionError);
client_method!(SessionClient => fn proceed_to_checkout() -> () as SessionRequest::ProceedToCheckout, Error = SessionError);
client_method!(SessionClient => fn back_to_browsing() -> () as SessionRequest::BackToBrowsing, Error = SessionError);
client_method!(SessionClient => fn submit_order(form: CheckoutForm) -> () as SessionRequest::SubmitOrder, Error = SessionError);
client_method!(SessionClient => fn continue_shopping() -> () as SessionRequest::ContinueShopping, Error = SessionError);
client_method!(SessionClient => fn snapshot() -> SessionSnapshot as SessionRequest::Snapshot, Error = SessionError);
