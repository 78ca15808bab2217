use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::CatalogClient;
use crate::domain::{filter_products, CategoryFilter, Product};
use crate::error::CatalogError;
use crate::messages::{CatalogRequest, ServiceResponse};

/// Read-only catalog actor. Owns the immutable, insertion-ordered product
/// list handed to it at startup; there is no refresh or pagination.
pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    products: Vec<Product>,
}

impl CatalogService {
    pub fn new(buffer_size: usize, products: Vec<Product>) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, products };
        let client = CatalogClient::new(sender);
        (service, client)
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!(product_count = self.products.len(), "CatalogService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                CatalogRequest::ListProducts { respond_to } => {
                    self.handle_list_products(respond_to);
                }
                CatalogRequest::Search {
                    query,
                    filter,
                    respond_to,
                } => {
                    self.handle_search(query, filter, respond_to);
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
            }
        }

        info!("CatalogService stopped");
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get_product(&self, id: String, respond_to: ServiceResponse<Option<Product>, CatalogError>) {
        debug!("Processing get_product request");

        let product = self.products.iter().find(|p| p.id == id).cloned();

        match &product {
            Some(product) => debug!(product_name = %product.name, "Product found"),
            None => debug!("Product not found"),
        }

        let _ = respond_to.send(Ok(product));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_products(&self, respond_to: ServiceResponse<Vec<Product>, CatalogError>) {
        debug!("Processing list_products request");
        let _ = respond_to.send(Ok(self.products.clone()));
    }

    #[instrument(fields(query = %query, filter = ?filter), skip(self, respond_to))]
    fn handle_search(
        &self,
        query: String,
        filter: CategoryFilter,
        respond_to: ServiceResponse<Vec<Product>, CatalogError>,
    ) {
        debug!("Processing search request");

        let hits = filter_products(&self.products, &query, filter);
        info!(hit_count = hits.len(), "Catalog searched");

        let _ = respond_to.send(Ok(hits));
    }
}
