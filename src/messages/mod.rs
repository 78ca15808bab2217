use tokio::sync::oneshot;

use crate::domain::{
    CartLine, CartSnapshot, CategoryFilter, CheckoutForm, OrderReceipt, Product, SessionSnapshot,
    Toast, ToastKind,
};
use crate::error::{CartError, CatalogError, PaymentError, SessionError, ToastError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enums for actor communication. Each variant includes
/// parameters and a oneshot channel for responses.

#[derive(Debug)]
pub enum CatalogRequest {
    GetProduct {
        id: String,
        respond_to: ServiceResponse<Option<Product>, CatalogError>,
    },
    ListProducts {
        respond_to: ServiceResponse<Vec<Product>, CatalogError>,
    },
    Search {
        query: String,
        filter: CategoryFilter,
        respond_to: ServiceResponse<Vec<Product>, CatalogError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum CartRequest {
    AddItem {
        product: Product,
        respond_to: ServiceResponse<(), CartError>,
    },
    RemoveItem {
        product_id: String,
        respond_to: ServiceResponse<Option<CartLine>, CartError>,
    },
    UpdateQuantity {
        product_id: String,
        quantity: i32,
        respond_to: ServiceResponse<(), CartError>,
    },
    Clear {
        respond_to: ServiceResponse<(), CartError>,
    },
    Snapshot {
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    Shutdown,
    #[cfg(test)]
    GetLineCount {
        respond_to: ServiceResponse<usize, CartError>,
    },
}

#[derive(Debug)]
pub enum ToastRequest {
    Push {
        kind: ToastKind,
        message: String,
        subject: Option<String>,
        respond_to: ServiceResponse<String, ToastError>,
    },
    Dismiss {
        id: String,
        respond_to: ServiceResponse<(), ToastError>,
    },
    /// Internal: sent by the per-toast expiry timer. A no-op when the toast
    /// was already dismissed.
    Expire { id: String },
    List {
        respond_to: ServiceResponse<Vec<Toast>, ToastError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum SessionRequest {
    Browse {
        respond_to: ServiceResponse<Vec<Product>, SessionError>,
    },
    SetSearchQuery {
        query: String,
        respond_to: ServiceResponse<(), SessionError>,
    },
    SetCategory {
        filter: CategoryFilter,
        respond_to: ServiceResponse<(), SessionError>,
    },
    ClearFilters {
        respond_to: ServiceResponse<(), SessionError>,
    },
    OpenCartPanel {
        respond_to: ServiceResponse<(), SessionError>,
    },
    CloseCartPanel {
        respond_to: ServiceResponse<(), SessionError>,
    },
    AddToCart {
        product_id: String,
        respond_to: ServiceResponse<(), SessionError>,
    },
    RemoveFromCart {
        product_id: String,
        respond_to: ServiceResponse<(), SessionError>,
    },
    ProceedToCheckout {
        respond_to: ServiceResponse<(), SessionError>,
    },
    BackToBrowsing {
        respond_to: ServiceResponse<(), SessionError>,
    },
    SubmitOrder {
        form: CheckoutForm,
        respond_to: ServiceResponse<(), SessionError>,
    },
    /// Internal: the spawned payment task settled; carries the receipt
    /// stamped at settlement time.
    PaymentSettled { receipt: OrderReceipt },
    /// Internal: the spawned payment task failed. Never produced by the
    /// fixed-delay gateway, but the interface models it.
    PaymentFailed { error: PaymentError },
    ContinueShopping {
        respond_to: ServiceResponse<(), SessionError>,
    },
    Snapshot {
        respond_to: ServiceResponse<SessionSnapshot, SessionError>,
    },
    Shutdown,
}
