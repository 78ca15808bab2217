use thiserror::Error;

use crate::domain::ViewState;

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Malformed catalog document: {0}")]
    Malformed(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error)]
pub enum CartError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error)]
pub enum ToastError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    #[error("Required field missing: {0}")]
    MissingField(&'static str),
    #[error("Cannot {action} from the {from:?} view")]
    InvalidTransition {
        from: ViewState,
        action: &'static str,
    },
    #[error("Checkout submission already processing")]
    CheckoutInProgress,
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),
    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),
}

#[derive(Debug, Clone, Error)]
pub enum ThemeError {
    #[error("Preference store error: {0}")]
    Store(String),
}
