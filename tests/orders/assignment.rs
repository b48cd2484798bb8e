use grocery_orders::{Actor, OrderError, OrderStatus};

use crate::support::*;

#[test]
fn shipper_claims_confirmed_order() {
    let market = market();
    let order = market.order_at(OrderStatus::Confirmed);

    let claimed = market
        .service
        .assign_shipper(&Actor::shipper(SHIPPER), order.id())
        .unwrap();

    assert_eq!(claimed.status(), OrderStatus::PickingUp);
    assert_eq!(claimed.shipper_id(), Some(SHIPPER));
    assert_eq!(market.service.get_order(order.id()).unwrap(), claimed);
}

#[test]
fn second_claim_fails_and_keeps_first_shipper() {
    let market = market();
    let order = market.order_at(OrderStatus::Confirmed);

    market
        .service
        .assign_shipper(&Actor::shipper(SHIPPER), order.id())
        .unwrap();

    for shipper in [OTHER_SHIPPER, SHIPPER] {
        let err = market
            .service
            .assign_shipper(&Actor::shipper(shipper), order.id())
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidState(_)), "{shipper}: {err:?}");
    }

    let stored = market.service.get_order(order.id()).unwrap();
    assert_eq!(stored.shipper_id(), Some(SHIPPER));
    assert_eq!(stored.status(), OrderStatus::PickingUp);
}

#[test]
fn only_confirmed_orders_can_be_claimed() {
    let market = market();

    for status in [
        OrderStatus::Pending,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ] {
        let order = market.order_at(status);
        let err = market
            .service
            .assign_shipper(&Actor::shipper(OTHER_SHIPPER), order.id())
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidState(_)), "{status}: {err:?}");
        assert_eq!(market.service.get_order(order.id()).unwrap().status(), status);
    }
}

#[test]
fn non_shippers_cannot_claim() {
    let market = market();
    let order = market.order_at(OrderStatus::Confirmed);

    for actor in [
        Actor::customer(ALICE),
        Actor::store_owner(OWNER),
        // role claimed by the caller does not override the stored user
        Actor::shipper(ALICE),
        Actor::shipper(BANNED_SHIPPER),
    ] {
        let err = market
            .service
            .assign_shipper(&actor, order.id())
            .unwrap_err();
        assert!(matches!(err, OrderError::Forbidden(_)), "{}: {err:?}", actor.id);
    }

    let stored = market.service.get_order(order.id()).unwrap();
    assert_eq!(stored.status(), OrderStatus::Confirmed);
    assert_eq!(stored.shipper_id(), None);
}

#[test]
fn unknown_shipper_or_order_is_not_found() {
    let market = market();
    let order = market.order_at(OrderStatus::Confirmed);

    let err = market
        .service
        .assign_shipper(&Actor::shipper("ghost"), order.id())
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound { entity: "user", .. }));

    let err = market
        .service
        .assign_shipper(&Actor::shipper(SHIPPER), "missing")
        .unwrap_err();
    assert!(matches!(err, OrderError::NotFound { entity: "order", .. }));
}
