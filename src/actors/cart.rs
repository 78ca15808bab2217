use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::CartClient;
use crate::domain::{Cart, CartLine, CartSnapshot, Product};
use crate::error::CartError;
use crate::messages::{CartRequest, ServiceResponse};

/// Cart actor. Owns the `Cart` domain value; every mutation flows through
/// this single writer, so one user action is atomic by construction.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
}

impl CartService {
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            cart: Cart::new(),
        };
        let client = CartClient::new(sender);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddItem { product, respond_to } => {
                    self.handle_add_item(product, respond_to);
                }
                CartRequest::RemoveItem {
                    product_id,
                    respond_to,
                } => {
                    self.handle_remove_item(product_id, respond_to);
                }
                CartRequest::UpdateQuantity {
                    product_id,
                    quantity,
                    respond_to,
                } => {
                    self.handle_update_quantity(product_id, quantity, respond_to);
                }
                CartRequest::Clear { respond_to } => {
                    self.handle_clear(respond_to);
                }
                CartRequest::Snapshot { respond_to } => {
                    self.handle_snapshot(respond_to);
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
                #[cfg(test)]
                CartRequest::GetLineCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.line_count()));
                }
            }
        }

        info!("CartService stopped");
    }

    #[instrument(fields(product_id = %product.id, product_name = %product.name), skip(self, product, respond_to))]
    fn handle_add_item(&mut self, product: Product, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing add_item request");

        self.cart.add_item(product);
        info!(line_count = self.cart.line_count(), "Item added to cart");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    fn handle_remove_item(
        &mut self,
        product_id: String,
        respond_to: ServiceResponse<Option<CartLine>, CartError>,
    ) {
        debug!("Processing remove_item request");

        let removed = self.cart.remove_item(&product_id);
        match &removed {
            Some(line) => info!(product_name = %line.product.name, "Item removed from cart"),
            None => debug!("Item not in cart, nothing removed"),
        }

        let _ = respond_to.send(Ok(removed));
    }

    #[instrument(fields(product_id = %product_id, quantity = quantity), skip(self, respond_to))]
    fn handle_update_quantity(
        &mut self,
        product_id: String,
        quantity: i32,
        respond_to: ServiceResponse<(), CartError>,
    ) {
        debug!("Processing update_quantity request");

        self.cart.update_quantity(&product_id, quantity);
        info!(total_items = self.cart.totals().total_items, "Quantity updated");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_clear(&mut self, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing clear request");

        self.cart.clear();
        info!("Cart cleared");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_snapshot(&self, respond_to: ServiceResponse<CartSnapshot, CartError>) {
        debug!("Processing snapshot request");
        let _ = respond_to.send(Ok(self.cart.snapshot()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    /// Demonstrates test-only messages for extracting internal actor state
    #[tokio::test]
    async fn cart_service_internal_state() -> Result<(), Box<dyn std::error::Error>> {
        let (cart_service, cart_client) = CartService::new(10);
        let _handle = tokio::spawn(cart_service.run());

        let count = cart_client.get_line_count().await?;
        assert_eq!(count, 0);

        let product = Product::new("p1", "Desk Lamp", 24.0, Category::Electronics);
        cart_client.add_item(product.clone()).await?;
        cart_client.add_item(product).await?;

        let count = cart_client.get_line_count().await?;
        assert_eq!(count, 1);

        let snapshot = cart_client.snapshot().await?;
        assert_eq!(snapshot.totals.total_items, 2);
        assert_eq!(snapshot.totals.total_price, 48.0);

        cart_client.update_quantity("p1".to_string(), 0).await?;
        let count = cart_client.get_line_count().await?;
        assert_eq!(count, 0);

        cart_client.shutdown().await?;
        Ok(())
    }
}
