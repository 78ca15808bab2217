use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actors::{CartService, CatalogService, SessionService, ToastService};
use crate::clients::{CartClient, CatalogClient, SessionClient, ToastClient};
use crate::domain::Product;
use crate::payment::PaymentGateway;

/// The main application system that wires all actors together.
///
/// Responsible for starting sub-actors first, injecting their clients into
/// the session actor, and shutting down in dependency order.
pub struct StorefrontSystem {
    pub catalog_client: CatalogClient,
    pub cart_client: CartClient,
    pub toast_client: ToastClient,
    pub session_client: SessionClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Create and start the entire actor system. `catalog` is the
    /// pre-loaded, ordered product list from the catalog provider.
    #[instrument(name = "storefront_system", skip(catalog, gateway))]
    pub fn new(catalog: Vec<Product>, gateway: Arc<dyn PaymentGateway>) -> Self {
        let mut handles = Vec::new();

        info!("Starting storefront system");

        // Start sub-actors first (no dependencies)
        let (catalog_service, catalog_client) = CatalogService::new(100, catalog);
        handles.push(tokio::spawn(catalog_service.run()));

        let (cart_service, cart_client) = CartService::new(100);
        handles.push(tokio::spawn(cart_service.run()));

        let (toast_service, toast_client) = ToastService::new(100);
        handles.push(tokio::spawn(toast_service.run()));

        // Start the root actor with sub-actor clients (dependency injection)
        let (session_service, session_client) = SessionService::new(
            100,
            catalog_client.clone(),
            cart_client.clone(),
            toast_client.clone(),
            gateway,
        );
        handles.push(tokio::spawn(session_service.run()));

        info!("Storefront system started successfully");

        Self {
            catalog_client,
            cart_client,
            toast_client,
            session_client,
            handles,
        }
    }

    /// Gracefully shutdown the entire actor system: the session actor
    /// first (it depends on the others), then the sub-actors, then wait
    /// for all tasks to finish.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront system");

        let _ = self.session_client.shutdown().await;
        let _ = self.catalog_client.shutdown().await;
        let _ = self.cart_client.shutdown().await;
        let _ = self.toast_client.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
            }
        }

        info!("Storefront system shutdown complete");
        Ok(())
    }
}
