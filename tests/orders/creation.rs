use grocery_orders::{Actor, Decimal, NewOrder, OrderConfig, OrderError, OrderStatus};

use crate::support::*;

const ADDRESS: &str = "12 Le Loi, District 1";

#[test]
fn places_pending_order_and_decrements_stock() {
    let market = market();

    let order = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, ADDRESS).line(PORK_PACK, 2),
        )
        .unwrap();

    assert_eq!(order.status(), OrderStatus::Pending);
    assert_eq!(order.customer_id(), ALICE);
    assert_eq!(order.store_id(), STORE);
    assert_eq!(order.shipper_id(), None);
    assert_eq!(order.delivery_address(), ADDRESS);
    assert_eq!(order.total_amount(), Decimal::from(70_000));
    assert_eq!(order.shipping_fee(), Decimal::from(15_000));
    assert_eq!(order.grand_total(), Decimal::from(85_000));
    assert_eq!(order.items().len(), 1);
    assert_eq!(order.items()[0].unit_price, Decimal::from(35_000));
    assert_eq!(market.stock(PORK_PACK), 8);

    let stored = market.service.get_order(order.id()).unwrap();
    assert_eq!(stored, order);
}

#[test]
fn multi_line_order_sums_all_lines() {
    let market = market();

    let order = market
        .service
        .create_order(
            &Actor::customer(BOB),
            NewOrder::new(STORE, ADDRESS)
                .line(PORK_PACK, 1)
                .line(PORK_TRAY, 2)
                .line(RICE, 3),
        )
        .unwrap();

    assert_eq!(
        order.total_amount(),
        Decimal::from(35_000 + 2 * 110_000 + 3 * 20_000)
    );
    assert_eq!(market.stock(PORK_PACK), 9);
    assert_eq!(market.stock(PORK_TRAY), 1);
    assert_eq!(market.stock(RICE), 997);
}

#[test]
fn insufficient_stock_names_the_unit_and_changes_nothing() {
    let market = market();

    let err = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, ADDRESS)
                .line(PORK_PACK, 2)
                .line(PORK_TRAY, 4),
        )
        .unwrap_err();

    match err {
        OrderError::InsufficientStock {
            product,
            unit,
            available,
            requested,
        } => {
            assert_eq!(product, "Pork belly");
            assert_eq!(unit, "1kg tray");
            assert_eq!(available, 3);
            assert_eq!(requested, 4);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    // the first line's decrement was rolled back with the rest
    assert_eq!(market.stock(PORK_PACK), 10);
    assert_eq!(market.stock(PORK_TRAY), 3);
    assert!(market.service.orders_for_customer(ALICE).unwrap().is_empty());
}

#[test]
fn repeated_lines_for_one_unit_are_checked_together() {
    let market = market();

    let err = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, ADDRESS)
                .line(PORK_TRAY, 2)
                .line(PORK_TRAY, 2),
        )
        .unwrap_err();

    // reported against the stock on the shelf and the whole request
    assert!(matches!(
        err,
        OrderError::InsufficientStock { available: 3, requested: 4, .. }
    ));
    assert_eq!(market.stock(PORK_TRAY), 3);
}

#[test]
fn repeated_lines_within_stock_are_accepted() {
    let market = market();

    let order = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, ADDRESS)
                .line(PORK_TRAY, 2)
                .line(PORK_TRAY, 1),
        )
        .unwrap();

    assert_eq!(order.items().len(), 2);
    assert_eq!(market.stock(PORK_TRAY), 0);
}

#[test]
fn delivery_address_is_stored_as_given() {
    let market = market();
    let address = "  Floor 3, 12 Le Loi\n(ring twice)  ";

    let order = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, address).line(RICE, 1),
        )
        .unwrap();

    assert_eq!(order.delivery_address(), address);
    assert_eq!(
        market.service.get_order(order.id()).unwrap().delivery_address(),
        address
    );
}

#[test]
fn overflowing_total_is_invalid_input_and_changes_nothing() {
    let market = market();
    market.set_price(PORK_PACK, Decimal::MAX / Decimal::from(2));

    let err = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, ADDRESS).line(PORK_PACK, 3),
        )
        .unwrap_err();

    assert!(matches!(err, OrderError::InvalidInput { field: "items", .. }));
    assert_eq!(market.stock(PORK_PACK), 10);
    assert!(market.service.orders_for_customer(ALICE).unwrap().is_empty());

    // the rows were released with the failed transaction
    market.set_price(PORK_PACK, Decimal::from(35_000));
    market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, ADDRESS).line(PORK_PACK, 3),
        )
        .unwrap();
    assert_eq!(market.stock(PORK_PACK), 7);
}

#[test]
fn exact_stock_can_be_ordered() {
    let market = market();

    market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, ADDRESS).line(PORK_TRAY, 3),
        )
        .unwrap();

    assert_eq!(market.stock(PORK_TRAY), 0);

    let err = market
        .service
        .create_order(
            &Actor::customer(BOB),
            NewOrder::new(STORE, ADDRESS).line(PORK_TRAY, 1),
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::InsufficientStock { available: 0, .. }));
}

#[test]
fn closed_store_rejects_orders() {
    let market = market();

    let err = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(CLOSED_STORE, ADDRESS).line(EGGS, 1),
        )
        .unwrap_err();

    assert!(matches!(err, OrderError::InvalidState(_)));
    assert_eq!(market.stock(EGGS), 20);
}

#[test]
fn units_from_another_store_are_rejected() {
    let market = market();

    let err = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, ADDRESS)
                .line(PORK_PACK, 1)
                .line(FISH_SAUCE, 1),
        )
        .unwrap_err();

    assert!(matches!(err, OrderError::InvalidInput { field: "items", .. }));
    assert_eq!(market.stock(PORK_PACK), 10);
    assert_eq!(market.stock(FISH_SAUCE), 20);
}

#[test]
fn only_active_customers_may_order() {
    let market = market();
    let request = || NewOrder::new(STORE, ADDRESS).line(PORK_PACK, 1);

    for actor in [
        Actor::shipper(SHIPPER),
        Actor::store_owner(OWNER),
        Actor::customer(BANNED),
        // claiming the customer role does not help a user who is not one
        Actor::customer(SHIPPER),
    ] {
        let err = market.service.create_order(&actor, request()).unwrap_err();
        assert!(
            matches!(err, OrderError::Forbidden(_)),
            "{} should be forbidden, got {err:?}",
            actor.id
        );
    }
    assert_eq!(market.stock(PORK_PACK), 10);
}

#[test]
fn unknown_references_are_not_found() {
    let market = market();

    let err = market
        .service
        .create_order(
            &Actor::customer("ghost"),
            NewOrder::new(STORE, ADDRESS).line(PORK_PACK, 1),
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound { entity: "user", .. }));

    let err = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new("nowhere", ADDRESS).line(PORK_PACK, 1),
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound { entity: "store", .. }));

    let err = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, ADDRESS)
                .line(PORK_PACK, 1)
                .line("u-missing", 1),
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound { entity: "product unit", .. }));
    assert_eq!(market.stock(PORK_PACK), 10);
}

#[test]
fn malformed_requests_are_invalid_input() {
    let market = market();
    let alice = Actor::customer(ALICE);

    let cases = [
        (NewOrder::new(STORE, "   ").line(PORK_PACK, 1), "delivery_address"),
        (NewOrder::new(STORE, ADDRESS), "items"),
        (NewOrder::new(STORE, ADDRESS).line(PORK_PACK, 0), "quantity"),
    ];

    for (request, expected) in cases {
        match market.service.create_order(&alice, request) {
            Err(OrderError::InvalidInput { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected InvalidInput on {expected}, got {other:?}"),
        }
    }
    assert_eq!(market.stock(PORK_PACK), 10);
}

#[test]
fn line_limit_comes_from_config() {
    let market = market_with(OrderConfig {
        max_items_per_order: 2,
        ..OrderConfig::default()
    });

    let err = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, ADDRESS)
                .line(PORK_PACK, 1)
                .line(PORK_TRAY, 1)
                .line(RICE, 1),
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidInput { field: "items", .. }));
}

#[test]
fn shipping_fee_comes_from_config() {
    let market = market_with(OrderConfig {
        shipping_fee: Decimal::new(2_000_050, 2),
        ..OrderConfig::default()
    });

    let order = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, ADDRESS).line(RICE, 2),
        )
        .unwrap();

    assert_eq!(order.shipping_fee(), Decimal::new(2_000_050, 2));
    assert_eq!(order.grand_total(), Decimal::new(6_000_050, 2));
}

#[test]
fn later_price_changes_do_not_touch_placed_orders() {
    let market = market();

    let order = market
        .service
        .create_order(
            &Actor::customer(ALICE),
            NewOrder::new(STORE, ADDRESS).line(PORK_PACK, 2),
        )
        .unwrap();

    market.set_price(PORK_PACK, Decimal::from(99_000));

    let stored = market.service.get_order(order.id()).unwrap();
    assert_eq!(stored.items()[0].unit_price, Decimal::from(35_000));
    assert_eq!(stored.total_amount(), Decimal::from(70_000));

    let next = market
        .service
        .create_order(
            &Actor::customer(BOB),
            NewOrder::new(STORE, ADDRESS).line(PORK_PACK, 1),
        )
        .unwrap();
    assert_eq!(next.items()[0].unit_price, Decimal::from(99_000));
}
