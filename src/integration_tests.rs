#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::actors::{SessionService, TOAST_TTL};
    use crate::app_system::StorefrontSystem;
    use crate::domain::{
        Cart, Category, CategoryFilter, CheckoutForm, PaymentMethod, Product, ToastKind, ViewState,
    };
    use crate::error::SessionError;
    use crate::mock_framework::{
        expect_add_item, expect_cart_snapshot, expect_clear, expect_get_product,
        expect_push, expect_remove_item, mock_cart_client, mock_catalog_client,
        mock_toast_client, DecliningGateway,
    };
    use crate::payment::FixedDelayGateway;

    fn demo_products() -> Vec<Product> {
        vec![
            Product::new("a", "Desk Lamp", 10.0, Category::Electronics),
            Product::new("b", "Canvas Shirt", 20.0, Category::Clothing).with_original_price(25.0),
            Product::new("c", "Linen Shirt", 35.0, Category::Clothing),
            Product::new("d", "Shirt-print Sneakers", 45.0, Category::Shoes),
        ]
    }

    fn demo_system() -> StorefrontSystem {
        StorefrontSystem::new(demo_products(), Arc::new(FixedDelayGateway::default()))
    }

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            name: "Alice Smith".to_string(),
            email: "alice@example.com".to_string(),
            address: "123 Main Street".to_string(),
            city: "Springfield".to_string(),
            zip_code: "10001".to_string(),
            phone: "+1 555 000 0000".to_string(),
            payment_method: PaymentMethod::Paypal,
        }
    }

    #[tokio::test]
    async fn session_orchestrates_add_to_cart() {
        // 1. Setup mocks around a real session actor
        let (catalog_client, mut catalog_rx) = mock_catalog_client(10);
        let (cart_client, mut cart_rx) = mock_cart_client(10);
        let (toast_client, mut toast_rx) = mock_toast_client(10);

        let (session_service, session_client) = SessionService::new(
            10,
            catalog_client,
            cart_client,
            toast_client,
            Arc::new(FixedDelayGateway::default()),
        );
        tokio::spawn(session_service.run());

        // 2. Execute the add in the background
        let add_task =
            tokio::spawn(async move { session_client.add_to_cart("p1".to_string()).await });

        // 3. Verify interactions

        // Expect a catalog lookup
        let (id, responder) = expect_get_product(&mut catalog_rx)
            .await
            .expect("Expected GetProduct");
        assert_eq!(id, "p1");
        let product = Product::new("p1", "Trail Tent", 199.0, Category::Electronics);
        responder.send(Ok(Some(product))).unwrap();

        // Expect the cart update
        let (product, responder) = expect_add_item(&mut cart_rx)
            .await
            .expect("Expected AddItem");
        assert_eq!(product.id, "p1");
        responder.send(Ok(())).unwrap();

        // Expect the announcement toast
        let (kind, message, subject, responder) =
            expect_push(&mut toast_rx).await.expect("Expected Push");
        assert_eq!(kind, ToastKind::Success);
        assert_eq!(message, "Added to cart");
        assert_eq!(subject.as_deref(), Some("Trail Tent"));
        responder.send(Ok("toast_1".to_string())).unwrap();

        // 4. Verify the result
        assert!(add_task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn unknown_products_are_rejected_by_the_session() {
        let (catalog_client, mut catalog_rx) = mock_catalog_client(10);
        let (cart_client, _cart_rx) = mock_cart_client(10);
        let (toast_client, _toast_rx) = mock_toast_client(10);

        let (session_service, session_client) = SessionService::new(
            10,
            catalog_client,
            cart_client,
            toast_client,
            Arc::new(FixedDelayGateway::default()),
        );
        tokio::spawn(session_service.run());

        let add_task =
            tokio::spawn(async move { session_client.add_to_cart("ghost".to_string()).await });

        let (_, responder) = expect_get_product(&mut catalog_rx)
            .await
            .expect("Expected GetProduct");
        responder.send(Ok(None)).unwrap();

        match add_task.await.unwrap() {
            Err(SessionError::UnknownProduct(id)) => assert_eq!(id, "ghost"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn session_announces_only_real_removals() {
        let (catalog_client, _catalog_rx) = mock_catalog_client(10);
        let (cart_client, mut cart_rx) = mock_cart_client(10);
        let (toast_client, mut toast_rx) = mock_toast_client(10);

        let (session_service, session_client) = SessionService::new(
            10,
            catalog_client,
            cart_client,
            toast_client,
            Arc::new(FixedDelayGateway::default()),
        );
        tokio::spawn(session_service.run());

        let remove_task =
            tokio::spawn(async move { session_client.remove_from_cart("a".to_string()).await });

        let (product_id, responder) = expect_remove_item(&mut cart_rx)
            .await
            .expect("Expected RemoveItem");
        assert_eq!(product_id, "a");

        let mut cart = Cart::new();
        cart.add_item(Product::new("a", "Desk Lamp", 10.0, Category::Electronics));
        let line = cart.remove_item("a");
        responder.send(Ok(line)).unwrap();

        let (kind, message, subject, responder) =
            expect_push(&mut toast_rx).await.expect("Expected Push");
        assert_eq!(kind, ToastKind::Info);
        assert_eq!(message, "Removed from cart");
        assert_eq!(subject.as_deref(), Some("Desk Lamp"));
        responder.send(Ok("toast_1".to_string())).unwrap();

        assert!(remove_task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn settlement_clears_the_cart_through_the_session() {
        let (catalog_client, _catalog_rx) = mock_catalog_client(10);
        let (cart_client, mut cart_rx) = mock_cart_client(10);
        let (toast_client, _toast_rx) = mock_toast_client(10);

        let (session_service, session_client) = SessionService::new(
            10,
            catalog_client,
            cart_client,
            toast_client,
            Arc::new(FixedDelayGateway::new(Duration::ZERO)),
        );
        tokio::spawn(session_service.run());

        session_client.proceed_to_checkout().await.unwrap();

        let submit_client = session_client.clone();
        let submit_task =
            tokio::spawn(async move { submit_client.submit_order(valid_form()).await });

        // The session prices the order from a cart snapshot...
        let responder = expect_cart_snapshot(&mut cart_rx)
            .await
            .expect("Expected Snapshot");
        let mut cart = Cart::new();
        cart.add_item(Product::new("a", "Desk Lamp", 10.0, Category::Electronics));
        responder.send(Ok(cart.snapshot())).unwrap();

        submit_task.await.unwrap().unwrap();

        // ...and clears the cart once the zero-delay payment settles.
        let responder = expect_clear(&mut cart_rx).await.expect("Expected Clear");
        responder.send(Ok(())).unwrap();

        let mut view = ViewState::Checkout;
        for _ in 0..50 {
            let snapshot = session_client.snapshot().await.unwrap();
            view = snapshot.view;
            if view == ViewState::Success {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(view, ViewState::Success);
    }

    #[tokio::test]
    async fn browse_applies_the_session_filters() {
        let system = demo_system();
        let session = &system.session_client;

        session.set_search_query("shirt".to_string()).await.unwrap();
        session
            .set_category(CategoryFilter::Only(Category::Clothing))
            .await
            .unwrap();
        let hits = session.browse().await.unwrap();
        let ids: Vec<&str> = hits.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);

        session.clear_filters().await.unwrap();
        let all = session.browse().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn cart_flow_matches_the_reference_scenario() {
        let system = demo_system();
        let session = &system.session_client;

        session.add_to_cart("a".to_string()).await.unwrap();
        session.add_to_cart("b".to_string()).await.unwrap();
        session.add_to_cart("b".to_string()).await.unwrap();

        let cart = system.cart_client.snapshot().await.unwrap();
        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.totals.total_items, 3);
        assert_eq!(cart.totals.total_price, 50.0);
        assert_eq!(cart.totals.total_savings, 10.0);

        // Only an actual removal is announced.
        session.remove_from_cart("a".to_string()).await.unwrap();
        session.remove_from_cart("ghost".to_string()).await.unwrap();

        let toasts = system.toast_client.list().await.unwrap();
        assert_eq!(toasts.len(), 4);
        assert_eq!(toasts[3].kind, ToastKind::Info);
        assert_eq!(toasts[3].subject.as_deref(), Some("Desk Lamp"));

        system.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn checkout_happy_path_ends_in_success_with_an_empty_cart() {
        let system = demo_system();
        let session = &system.session_client;

        session.add_to_cart("b".to_string()).await.unwrap();
        session.open_cart_panel().await.unwrap();
        session.proceed_to_checkout().await.unwrap();

        // Entering checkout closes the cart panel.
        let snapshot = session.snapshot().await.unwrap();
        assert_eq!(snapshot.view, ViewState::Checkout);
        assert!(!snapshot.cart_panel_open);

        session.submit_order(valid_form()).await.unwrap();

        // The submission is accepted immediately; the payment is still
        // simulating.
        let snapshot = session.snapshot().await.unwrap();
        assert!(snapshot.processing);
        assert_eq!(snapshot.view, ViewState::Checkout);

        tokio::time::sleep(FixedDelayGateway::DEFAULT_DELAY + Duration::from_millis(100)).await;

        let snapshot = session.snapshot().await.unwrap();
        assert_eq!(snapshot.view, ViewState::Success);
        assert!(!snapshot.processing);
        let receipt = snapshot.receipt.expect("receipt retained for the success screen");
        assert!(receipt.order_number.starts_with("ORD-"));
        assert_eq!(receipt.total_items, 1);
        assert_eq!(receipt.total_price, 20.0);
        assert_eq!(receipt.payment_method, PaymentMethod::Paypal);

        let cart = system.cart_client.snapshot().await.unwrap();
        assert!(cart.lines.is_empty());

        session.continue_shopping().await.unwrap();
        let snapshot = session.snapshot().await.unwrap();
        assert_eq!(snapshot.view, ViewState::Browsing);
        assert!(snapshot.receipt.is_none());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn incomplete_forms_block_submission() {
        let system = demo_system();
        let session = &system.session_client;

        session.proceed_to_checkout().await.unwrap();

        let mut form = valid_form();
        form.zip_code = String::new();
        match session.submit_order(form).await {
            Err(SessionError::MissingField(field)) => assert_eq!(field, "zip_code"),
            other => panic!("unexpected result: {other:?}"),
        }

        let snapshot = session.snapshot().await.unwrap();
        assert_eq!(snapshot.view, ViewState::Checkout);
        assert!(!snapshot.processing);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn undefined_transitions_are_rejected() {
        let system = demo_system();
        let session = &system.session_client;

        // Browsing is the initial state.
        let snapshot = session.snapshot().await.unwrap();
        assert_eq!(snapshot.view, ViewState::Browsing);

        assert!(matches!(
            session.continue_shopping().await,
            Err(SessionError::InvalidTransition { .. })
        ));
        assert!(matches!(
            session.back_to_browsing().await,
            Err(SessionError::InvalidTransition { .. })
        ));
        assert!(matches!(
            session.submit_order(valid_form()).await,
            Err(SessionError::InvalidTransition { .. })
        ));

        session.proceed_to_checkout().await.unwrap();
        assert!(matches!(
            session.proceed_to_checkout().await,
            Err(SessionError::InvalidTransition { .. })
        ));

        // Leaving checkout keeps the cart and returns to browsing.
        session.back_to_browsing().await.unwrap();
        let snapshot = session.snapshot().await.unwrap();
        assert_eq!(snapshot.view, ViewState::Browsing);

        system.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn back_is_blocked_while_the_payment_simulates() {
        let system = demo_system();
        let session = &system.session_client;

        session.add_to_cart("a".to_string()).await.unwrap();
        session.proceed_to_checkout().await.unwrap();
        session.submit_order(valid_form()).await.unwrap();

        assert!(matches!(
            session.back_to_browsing().await,
            Err(SessionError::CheckoutInProgress)
        ));
        assert!(matches!(
            session.submit_order(valid_form()).await,
            Err(SessionError::CheckoutInProgress)
        ));

        tokio::time::sleep(FixedDelayGateway::DEFAULT_DELAY + Duration::from_millis(100)).await;
        let snapshot = session.snapshot().await.unwrap();
        assert_eq!(snapshot.view, ViewState::Success);

        system.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn declined_payment_stays_on_checkout() {
        let system = StorefrontSystem::new(demo_products(), Arc::new(DecliningGateway));
        let session = &system.session_client;

        session.add_to_cart("a".to_string()).await.unwrap();
        session.proceed_to_checkout().await.unwrap();
        session.submit_order(valid_form()).await.unwrap();

        // Let the decline propagate through the session mailbox.
        tokio::time::sleep(Duration::from_millis(10)).await;

        let snapshot = session.snapshot().await.unwrap();
        assert_eq!(snapshot.view, ViewState::Checkout);
        assert!(!snapshot.processing);
        assert!(snapshot.receipt.is_none());

        // The cart is untouched and the failure was announced.
        let cart = system.cart_client.snapshot().await.unwrap();
        assert_eq!(cart.lines.len(), 1);

        let toasts = system.toast_client.list().await.unwrap();
        assert!(toasts
            .iter()
            .any(|t| t.kind == ToastKind::Error && t.message == "Payment failed"));

        system.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn toasts_from_the_session_expire_on_their_own() {
        let system = demo_system();
        let session = &system.session_client;

        session.add_to_cart("a".to_string()).await.unwrap();
        assert_eq!(system.toast_client.list().await.unwrap().len(), 1);

        tokio::time::sleep(TOAST_TTL + Duration::from_millis(10)).await;
        assert!(system.toast_client.list().await.unwrap().is_empty());

        system.shutdown().await.unwrap();
    }
}
