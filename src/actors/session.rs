use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::clients::{CartClient, CatalogClient, SessionClient, ToastClient};
use crate::domain::{
    order_number_now, CategoryFilter, CheckoutForm, OrderReceipt, Product, SessionSnapshot,
    ToastKind, ViewState,
};
use crate::error::{PaymentError, SessionError};
use crate::messages::{ServiceResponse, SessionRequest};
use crate::payment::PaymentGateway;

/// The view controller, written as the root actor. Owns the screen state
/// machine and the browsing sub-state, and orchestrates the catalog, cart
/// and toast actors the same way a user driving the page would.
///
/// The machine cycles Browsing -> Checkout -> Success -> Browsing for the
/// session lifetime; Success is only reachable through Checkout.
pub struct SessionService {
    receiver: mpsc::Receiver<SessionRequest>,
    /// Handle back into our own mailbox for payment settlement messages.
    sender: mpsc::Sender<SessionRequest>,
    catalog_client: CatalogClient,
    cart_client: CartClient,
    toast_client: ToastClient,
    gateway: Arc<dyn PaymentGateway>,
    view: ViewState,
    cart_panel_open: bool,
    search_query: String,
    category_filter: CategoryFilter,
    processing: bool,
    receipt: Option<OrderReceipt>,
}

impl SessionService {
    pub fn new(
        buffer_size: usize,
        catalog_client: CatalogClient,
        cart_client: CartClient,
        toast_client: ToastClient,
        gateway: Arc<dyn PaymentGateway>,
    ) -> (Self, SessionClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            sender: sender.clone(),
            catalog_client,
            cart_client,
            toast_client,
            gateway,
            view: ViewState::Browsing,
            cart_panel_open: false,
            search_query: String::new(),
            category_filter: CategoryFilter::All,
            processing: false,
            receipt: None,
        };
        let client = SessionClient::new(sender);
        (service, client)
    }

    #[instrument(name = "session_service", skip(self))]
    pub async fn run(mut self) {
        info!("SessionService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SessionRequest::Browse { respond_to } => {
                    self.handle_browse(respond_to).await;
                }
                SessionRequest::SetSearchQuery { query, respond_to } => {
                    self.handle_set_search_query(query, respond_to);
                }
                SessionRequest::SetCategory { filter, respond_to } => {
                    self.handle_set_category(filter, respond_to);
                }
                SessionRequest::ClearFilters { respond_to } => {
                    self.handle_clear_filters(respond_to);
                }
                SessionRequest::OpenCartPanel { respond_to } => {
                    self.handle_set_cart_panel(true, respond_to);
                }
                SessionRequest::CloseCartPanel { respond_to } => {
                    self.handle_set_cart_panel(false, respond_to);
                }
                SessionRequest::AddToCart {
                    product_id,
                    respond_to,
                } => {
                    self.handle_add_to_cart(product_id, respond_to).await;
                }
                SessionRequest::RemoveFromCart {
                    product_id,
                    respond_to,
                } => {
                    self.handle_remove_from_cart(product_id, respond_to).await;
                }
                SessionRequest::ProceedToCheckout { respond_to } => {
                    self.handle_proceed_to_checkout(respond_to);
                }
                SessionRequest::BackToBrowsing { respond_to } => {
                    self.handle_back_to_browsing(respond_to);
                }
                SessionRequest::SubmitOrder { form, respond_to } => {
                    self.handle_submit_order(form, respond_to).await;
                }
                SessionRequest::PaymentSettled { receipt } => {
                    self.handle_payment_settled(receipt).await;
                }
                SessionRequest::PaymentFailed { error } => {
                    self.handle_payment_failed(error).await;
                }
                SessionRequest::ContinueShopping { respond_to } => {
                    self.handle_continue_shopping(respond_to);
                }
                SessionRequest::Snapshot { respond_to } => {
                    self.handle_snapshot(respond_to);
                }
                SessionRequest::Shutdown => {
                    info!("SessionService shutting down");
                    break;
                }
            }
        }

        info!("SessionService stopped");
    }

    /// Applies the current query and category to the catalog.
    #[instrument(skip(self, respond_to))]
    async fn handle_browse(&self, respond_to: ServiceResponse<Vec<Product>, SessionError>) {
        debug!("Processing browse request");

        let result = self
            .catalog_client
            .search(self.search_query.clone(), self.category_filter)
            .await
            .map_err(SessionError::from);

        let _ = respond_to.send(result);
    }

    #[instrument(fields(query = %query), skip(self, respond_to))]
    fn handle_set_search_query(&mut self, query: String, respond_to: ServiceResponse<(), SessionError>) {
        debug!("Processing set_search_query request");
        self.search_query = query;
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(filter = ?filter), skip(self, respond_to))]
    fn handle_set_category(
        &mut self,
        filter: CategoryFilter,
        respond_to: ServiceResponse<(), SessionError>,
    ) {
        debug!("Processing set_category request");
        self.category_filter = filter;
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_clear_filters(&mut self, respond_to: ServiceResponse<(), SessionError>) {
        debug!("Processing clear_filters request");
        self.search_query.clear();
        self.category_filter = CategoryFilter::All;
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(open = open), skip(self, respond_to))]
    fn handle_set_cart_panel(&mut self, open: bool, respond_to: ServiceResponse<(), SessionError>) {
        debug!("Processing cart panel request");
        self.cart_panel_open = open;
        let _ = respond_to.send(Ok(()));
    }

    /// Resolves the product against the catalog, forwards to the cart and
    /// announces the addition. Unknown ids are the only failure a real
    /// catalog can never produce.
    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    async fn handle_add_to_cart(
        &mut self,
        product_id: String,
        respond_to: ServiceResponse<(), SessionError>,
    ) {
        debug!("Processing add_to_cart request");

        let product = match self.catalog_client.get_product(product_id.clone()).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                warn!("Product not in catalog");
                let _ = respond_to.send(Err(SessionError::UnknownProduct(product_id)));
                return;
            }
            Err(e) => {
                error!(error = %e, "Catalog lookup failed");
                let _ = respond_to.send(Err(e.into()));
                return;
            }
        };

        let product_name = product.name.clone();
        if let Err(e) = self.cart_client.add_item(product).await {
            error!(error = %e, "Cart update failed");
            let _ = respond_to.send(Err(e.into()));
            return;
        }

        self.push_toast(ToastKind::Success, "Added to cart", Some(product_name))
            .await;
        let _ = respond_to.send(Ok(()));
    }

    /// Forwards the removal to the cart; only an actual removal is
    /// announced.
    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    async fn handle_remove_from_cart(
        &mut self,
        product_id: String,
        respond_to: ServiceResponse<(), SessionError>,
    ) {
        debug!("Processing remove_from_cart request");

        match self.cart_client.remove_item(product_id).await {
            Ok(Some(line)) => {
                self.push_toast(ToastKind::Info, "Removed from cart", Some(line.product.name))
                    .await;
                let _ = respond_to.send(Ok(()));
            }
            Ok(None) => {
                let _ = respond_to.send(Ok(()));
            }
            Err(e) => {
                error!(error = %e, "Cart update failed");
                let _ = respond_to.send(Err(e.into()));
            }
        }
    }

    #[instrument(skip(self, respond_to))]
    fn handle_proceed_to_checkout(&mut self, respond_to: ServiceResponse<(), SessionError>) {
        debug!("Processing proceed_to_checkout request");

        if self.view != ViewState::Browsing {
            let _ = respond_to.send(Err(SessionError::InvalidTransition {
                from: self.view,
                action: "proceed to checkout",
            }));
            return;
        }

        self.cart_panel_open = false;
        self.view = ViewState::Checkout;
        info!("Entered checkout");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_back_to_browsing(&mut self, respond_to: ServiceResponse<(), SessionError>) {
        debug!("Processing back_to_browsing request");

        if self.view != ViewState::Checkout {
            let _ = respond_to.send(Err(SessionError::InvalidTransition {
                from: self.view,
                action: "go back to browsing",
            }));
            return;
        }
        if self.processing {
            // Once submitted the simulated payment cannot be cancelled.
            let _ = respond_to.send(Err(SessionError::CheckoutInProgress));
            return;
        }

        self.view = ViewState::Browsing;
        info!("Left checkout, cart untouched");

        let _ = respond_to.send(Ok(()));
    }

    /// Validates the form, flips the processing flag and hands the charge
    /// to the gateway in a spawned task. The response goes out before the
    /// gateway runs so the rendering layer can disable the submit control.
    #[instrument(fields(payment_method = ?form.payment_method), skip(self, form, respond_to))]
    async fn handle_submit_order(
        &mut self,
        form: CheckoutForm,
        respond_to: ServiceResponse<(), SessionError>,
    ) {
        debug!("Processing submit_order request");

        if self.view != ViewState::Checkout {
            let _ = respond_to.send(Err(SessionError::InvalidTransition {
                from: self.view,
                action: "submit an order",
            }));
            return;
        }
        if self.processing {
            let _ = respond_to.send(Err(SessionError::CheckoutInProgress));
            return;
        }
        if let Err(e) = form.validate() {
            warn!(error = %e, "Checkout form rejected");
            let _ = respond_to.send(Err(e));
            return;
        }

        let totals = match self.cart_client.snapshot().await {
            Ok(snapshot) => snapshot.totals,
            Err(e) => {
                error!(error = %e, "Cart snapshot failed");
                let _ = respond_to.send(Err(e.into()));
                return;
            }
        };

        self.processing = true;
        info!(total = %totals.total_price, "Order submitted, charging");
        let _ = respond_to.send(Ok(()));

        let gateway = Arc::clone(&self.gateway);
        let settle = self.sender.clone();
        let payment_method = form.payment_method;
        tokio::spawn(async move {
            match gateway.charge(totals.total_price).await {
                Ok(()) => {
                    let receipt = OrderReceipt {
                        order_number: order_number_now(),
                        total_items: totals.total_items,
                        total_price: totals.total_price,
                        payment_method,
                    };
                    let _ = settle.send(SessionRequest::PaymentSettled { receipt }).await;
                }
                Err(error) => {
                    let _ = settle.send(SessionRequest::PaymentFailed { error }).await;
                }
            }
        });
    }

    #[instrument(fields(order_number = %receipt.order_number), skip(self, receipt))]
    async fn handle_payment_settled(&mut self, receipt: OrderReceipt) {
        if !self.processing {
            warn!("Settlement without a pending submission, ignoring");
            return;
        }

        if let Err(e) = self.cart_client.clear().await {
            error!(error = %e, "Cart clear failed after settlement");
        }

        self.processing = false;
        self.receipt = Some(receipt);
        self.view = ViewState::Success;
        info!("Order confirmed");
    }

    #[instrument(fields(error = %error), skip(self, error))]
    async fn handle_payment_failed(&mut self, error: PaymentError) {
        if !self.processing {
            warn!("Failure report without a pending submission, ignoring");
            return;
        }

        self.processing = false;
        error!("Payment failed, staying on checkout");
        self.push_toast(ToastKind::Error, "Payment failed", None).await;
    }

    #[instrument(skip(self, respond_to))]
    fn handle_continue_shopping(&mut self, respond_to: ServiceResponse<(), SessionError>) {
        debug!("Processing continue_shopping request");

        if self.view != ViewState::Success {
            let _ = respond_to.send(Err(SessionError::InvalidTransition {
                from: self.view,
                action: "continue shopping",
            }));
            return;
        }

        self.receipt = None;
        self.view = ViewState::Browsing;
        info!("Back to browsing");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_snapshot(&self, respond_to: ServiceResponse<SessionSnapshot, SessionError>) {
        debug!("Processing snapshot request");

        let snapshot = SessionSnapshot {
            view: self.view,
            cart_panel_open: self.cart_panel_open,
            search_query: self.search_query.clone(),
            category_filter: self.category_filter,
            processing: self.processing,
            receipt: self.receipt.clone(),
        };

        let _ = respond_to.send(Ok(snapshot));
    }

    /// Notifications are best-effort; a failed push never fails the user
    /// action that triggered it.
    async fn push_toast(&self, kind: ToastKind, message: &str, subject: Option<String>) {
        if let Err(e) = self.toast_client.push(kind, message.to_string(), subject).await {
            warn!(error = %e, "Toast push failed");
        }
    }
}
