//! Utilities for testing the session actor in isolation.
//!
//! Instead of spinning up the real sub-actors, tests create "mock clients"
//! whose channels they control, then assert on the requests the session
//! sends and script the responses deterministically.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::clients::{CartClient, CatalogClient, ToastClient};
use crate::domain::{CartLine, CartSnapshot, Product, ToastKind};
use crate::error::{CartError, CatalogError, PaymentError, ToastError};
use crate::messages::{CartRequest, CatalogRequest, ToastRequest};
use crate::payment::PaymentGateway;

pub fn mock_catalog_client(buffer_size: usize) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

pub fn mock_cart_client(buffer_size: usize) -> (CartClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CartClient::new(sender), receiver)
}

pub fn mock_toast_client(buffer_size: usize) -> (ToastClient, mpsc::Receiver<ToastRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ToastClient::new(sender), receiver)
}

/// Helper to verify that the next catalog message is a GetProduct request
pub async fn expect_get_product(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(String, oneshot::Sender<Result<Option<Product>, CatalogError>>)> {
    match receiver.recv().await {
        Some(CatalogRequest::GetProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next cart message is an AddItem request
pub async fn expect_add_item(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(Product, oneshot::Sender<Result<(), CartError>>)> {
    match receiver.recv().await {
        Some(CartRequest::AddItem { product, respond_to }) => Some((product, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next cart message is a RemoveItem request
pub async fn expect_remove_item(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(String, oneshot::Sender<Result<Option<CartLine>, CartError>>)> {
    match receiver.recv().await {
        Some(CartRequest::RemoveItem {
            product_id,
            respond_to,
        }) => Some((product_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next cart message is a Clear request
pub async fn expect_clear(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<oneshot::Sender<Result<(), CartError>>> {
    match receiver.recv().await {
        Some(CartRequest::Clear { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next cart message is a Snapshot request
pub async fn expect_cart_snapshot(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<oneshot::Sender<Result<CartSnapshot, CartError>>> {
    match receiver.recv().await {
        Some(CartRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next toast message is a Push request
pub async fn expect_push(
    receiver: &mut mpsc::Receiver<ToastRequest>,
) -> Option<(
    ToastKind,
    String,
    Option<String>,
    oneshot::Sender<Result<String, ToastError>>,
)> {
    match receiver.recv().await {
        Some(ToastRequest::Push {
            kind,
            message,
            subject,
            respond_to,
        }) => Some((kind, message, subject, respond_to)),
        _ => None,
    }
}

/// Gateway that declines every charge, exercising the failure branch the
/// fixed-delay gateway never takes.
pub struct DecliningGateway;

#[async_trait]
impl PaymentGateway for DecliningGateway {
    async fn charge(&self, _amount: f64) -> Result<(), PaymentError> {
        Err(PaymentError::Declined("card declined".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[tokio::test]
    async fn mock_client_round_trip() {
        let (client, mut receiver) = mock_cart_client(10);

        let product = Product::new("p1", "Test Product", 20.0, Category::Electronics);
        let add_task = tokio::spawn(async move { client.add_item(product).await });

        let (received, responder) = expect_add_item(&mut receiver)
            .await
            .expect("Expected AddItem request");
        assert_eq!(received.id, "p1");
        responder.send(Ok(())).unwrap();

        add_task.await.unwrap().unwrap();
    }
}
