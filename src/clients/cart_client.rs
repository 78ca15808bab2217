use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::client_method;
use crate::domain::{CartLine, CartSnapshot, Product};
use crate::error::CartError;
use crate::messages::CartRequest;

/// Client for the cart actor.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), String> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

client_method!(CartClient => fn add_item(product: Product) -> () as CartRequest::AddItem, Error = CartError);
client_method!(CartClient => fn remove_item(product_id: String) -> Option<CartLine> as CartRequest::RemoveItem, Error = CartError);
client_method!(CartClient => fn update_quantity(product_id: String, quantity: i32) -> () as CartRequest::UpdateQuantity, Error = CartError);
client_method!(CartClient => fn clear() -> () as CartRequest::Clear, Error = CartError);
client_method!(CartClient => fn snapshot() -> CartSnapshot as CartRequest::Snapshot, Error = CartError);

// Test-only method for internal state inspection
#[cfg(test)]
client_method!(CartClient => fn get_line_count() -> usize as CartRequest::GetLineCount, Error = CartError);
