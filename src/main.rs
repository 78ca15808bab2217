mod actors;
mod app_system;
mod clients;
mod data;
mod domain;
mod error;
mod messages;
mod payment;
mod theme;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, StorefrontSystem};
use crate::domain::{Category, CategoryFilter, CheckoutForm, PaymentMethod, ViewState};
use crate::payment::FixedDelayGateway;
use crate::theme::{FilePreferences, Theme, ThemeManager};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting storefront session");

    // The theme flag is the only thing that survives the session.
    let mut theme = ThemeManager::new(
        Box::new(FilePreferences::new(".trivex-prefs.json")),
        Theme::Light,
    );
    info!(dark = theme.current().is_dark(), "Theme resolved");

    let catalog = data::demo_catalog().map_err(|e| e.to_string())?;
    let system = StorefrontSystem::new(catalog, Arc::new(FixedDelayGateway::default()));
    let session = system.session_client.clone();

    // Browse the catalog with a search and a category filter
    let span = tracing::info_span!("browsing");
    async {
        let everything = system
            .catalog_client
            .list_products()
            .await
            .map_err(|e| e.to_string())?;
        info!(product_count = everything.len(), "Catalog loaded");

        session
            .set_search_query("shirt".to_string())
            .await
            .map_err(|e| e.to_string())?;
        session
            .set_category(CategoryFilter::Only(Category::Clothing))
            .await
            .map_err(|e| e.to_string())?;
        let hits = session.browse().await.map_err(|e| e.to_string())?;
        info!(hit_count = hits.len(), "Filtered for clothing shirts");

        session.clear_filters().await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    // Fill the cart, change quantities, drop one product again
    let span = tracing::info_span!("cart");
    async {
        for product_id in ["1", "7", "7", "4"] {
            session
                .add_to_cart(product_id.to_string())
                .await
                .map_err(|e| e.to_string())?;
        }
        session
            .remove_from_cart("4".to_string())
            .await
            .map_err(|e| e.to_string())?;
        system
            .cart_client
            .update_quantity("1".to_string(), 2)
            .await
            .map_err(|e| e.to_string())?;

        session.open_cart_panel().await.map_err(|e| e.to_string())?;
        let cart = system.cart_client.snapshot().await.map_err(|e| e.to_string())?;
        info!(
            total_items = cart.totals.total_items,
            total_price = %cart.totals.total_price,
            total_savings = %cart.totals.total_savings,
            "Cart ready"
        );
        session.close_cart_panel().await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    // Check out; the simulated payment takes a fixed two seconds.
    let span = tracing::info_span!("checkout");
    async {
        // A quick look at the form, back to the products, then for real.
        session
            .proceed_to_checkout()
            .await
            .map_err(|e| e.to_string())?;
        session.back_to_browsing().await.map_err(|e| e.to_string())?;
        session
            .proceed_to_checkout()
            .await
            .map_err(|e| e.to_string())?;

        let form = CheckoutForm {
            name: "Alice Smith".to_string(),
            email: "alice@example.com".to_string(),
            address: "123 Main Street".to_string(),
            city: "Springfield".to_string(),
            zip_code: "10001".to_string(),
            phone: "+1 555 000 0000".to_string(),
            payment_method: PaymentMethod::Card,
        };
        session.submit_order(form).await.map_err(|e| e.to_string())?;
        info!("Order submitted, waiting for the simulated payment");

        tokio::time::sleep(FixedDelayGateway::DEFAULT_DELAY + Duration::from_millis(500)).await;

        let snapshot = session.snapshot().await.map_err(|e| e.to_string())?;
        match (snapshot.view, snapshot.receipt) {
            (ViewState::Success, Some(receipt)) => {
                info!(
                    order_number = %receipt.order_number,
                    total = %receipt.total_price,
                    "Order placed"
                );
                session.continue_shopping().await.map_err(|e| e.to_string())?;
            }
            (view, _) => {
                error!(view = ?view, "Checkout did not complete");
            }
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    let toasts = system.toast_client.list().await.map_err(|e| e.to_string())?;
    info!(toast_count = toasts.len(), "Toasts still on screen");
    if let Some(toast) = toasts.first() {
        system
            .toast_client
            .dismiss(toast.id.clone())
            .await
            .map_err(|e| e.to_string())?;
    }

    if let Err(e) = theme.toggle() {
        error!(error = %e, "Theme preference not persisted");
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Session completed successfully");
    Ok(())
}
