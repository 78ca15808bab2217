use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::client_method;
use crate::domain::{CategoryFilter, Product};
use crate::error::CatalogError;
use crate::messages::CatalogRequest;

/// Client for the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), String> {
        debug!("Sending shutdown request");
        self.sender
            .send(CatalogRequest::Shutdown)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

client_method!(CatalogClient => fn get_product(id: String) -> Option<Product> as CatalogRequest::GetProduct, Error = CatalogError);
client_method!(CatalogClient => fn list_products() -> Vec<Product> as CatalogRequest::ListProducts, Error = CatalogError);
client_method!(CatalogClient => fn search(query: String, filter: CategoryFilter) -> Vec<Product> as CatalogRequest::Search, Error = CatalogError);
