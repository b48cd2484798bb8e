//! Seeded marketplace shared by the order tests.

#![allow(dead_code)]

use grocery_orders::{
    init_tracing, Actor, Decimal, InMemoryModelStore, InMemoryStorage, ModelsExt, NewOrder,
    Order, OrderConfig, OrderService, OrderStatus, Product, ProductUnit, Role, StatusChange, Store,
    User, UserStatus,
};

pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";
pub const BANNED: &str = "mallory";
pub const OWNER: &str = "owner-1";
pub const OTHER_OWNER: &str = "owner-2";
pub const CLOSED_OWNER: &str = "owner-3";
pub const OWNER_WITHOUT_STORE: &str = "owner-4";
pub const SHIPPER: &str = "ship-1";
pub const OTHER_SHIPPER: &str = "ship-2";
pub const BANNED_SHIPPER: &str = "ship-3";

pub const STORE: &str = "s1";
pub const OTHER_STORE: &str = "s2";
pub const CLOSED_STORE: &str = "s3";

/// Pork belly, 300g pack: 35 000, stock 10.
pub const PORK_PACK: &str = "u1";
/// Pork belly, 1kg tray: 110 000, stock 3.
pub const PORK_TRAY: &str = "u2";
/// Rice, 5kg bag: 20 000, stock 1000.
pub const RICE: &str = "u-rice";
/// Fish sauce from the other store.
pub const FISH_SAUCE: &str = "u3";
/// Eggs from the closed store.
pub const EGGS: &str = "u4";

pub struct Market {
    pub service: OrderService<InMemoryStorage>,
}

pub fn market() -> Market {
    market_with(OrderConfig::default())
}

pub fn market_with(config: OrderConfig) -> Market {
    init_tracing();

    let storage = InMemoryStorage::in_memory();
    seed(storage.models());
    Market {
        service: OrderService::new(storage, config),
    }
}

fn seed(models: &InMemoryModelStore) {
    let users = models.models::<User>();
    for (id, name, role) in [
        (ALICE, "Alice", Role::Customer),
        (BOB, "Bob", Role::Customer),
        (OWNER, "Co Ba", Role::StoreOwner),
        (OTHER_OWNER, "Hoang Anh", Role::StoreOwner),
        (CLOSED_OWNER, "Chu Tu", Role::StoreOwner),
        (OWNER_WITHOUT_STORE, "Minh", Role::StoreOwner),
        (SHIPPER, "Tuan", Role::Shipper),
        (OTHER_SHIPPER, "Hung", Role::Shipper),
    ] {
        users.save(&User::new(id, name, role)).unwrap();
    }
    let mut banned = User::new(BANNED, "Mallory", Role::Customer);
    banned.status = UserStatus::Banned;
    users.save(&banned).unwrap();
    let mut banned_shipper = User::new(BANNED_SHIPPER, "Khoa", Role::Shipper);
    banned_shipper.status = UserStatus::Banned;
    users.save(&banned_shipper).unwrap();

    let stores = models.models::<Store>();
    stores.save(&Store::new(STORE, OWNER, "Tap hoa co Ba")).unwrap();
    stores
        .save(&Store::new(OTHER_STORE, OTHER_OWNER, "Sieu thi mini Hoang Anh"))
        .unwrap();
    let mut closed = Store::new(CLOSED_STORE, CLOSED_OWNER, "Cho dem");
    closed.is_open = false;
    stores.save(&closed).unwrap();

    let products = models.models::<Product>();
    products.save(&Product::new("p1", STORE, "Pork belly")).unwrap();
    products.save(&Product::new("p-rice", STORE, "Rice")).unwrap();
    products.save(&Product::new("p2", OTHER_STORE, "Fish sauce")).unwrap();
    products.save(&Product::new("p3", CLOSED_STORE, "Eggs")).unwrap();

    let units = models.models::<ProductUnit>();
    for unit in [
        ProductUnit::new(PORK_PACK, "p1", "300g pack", Decimal::from(35_000), 10),
        ProductUnit::new(PORK_TRAY, "p1", "1kg tray", Decimal::from(110_000), 3),
        ProductUnit::new(RICE, "p-rice", "5kg bag", Decimal::from(20_000), 1_000),
        ProductUnit::new(FISH_SAUCE, "p2", "1L bottle", Decimal::from(45_000), 20),
        ProductUnit::new(EGGS, "p3", "10 pack", Decimal::from(30_000), 20),
    ] {
        units.save(&unit).unwrap();
    }
}

impl Market {
    pub fn models(&self) -> &InMemoryModelStore {
        self.service.storage().models()
    }

    pub fn stock(&self, unit_id: &str) -> u32 {
        self.unit(unit_id).stock_quantity
    }

    pub fn unit(&self, unit_id: &str) -> ProductUnit {
        self.models()
            .models::<ProductUnit>()
            .get(unit_id)
            .unwrap()
            .unwrap()
            .data
    }

    pub fn set_price(&self, unit_id: &str, price: Decimal) {
        let mut unit = self.unit(unit_id);
        unit.price = price;
        self.models().models::<ProductUnit>().save(&unit).unwrap();
    }

    /// Alice orders one bag of rice from the main store.
    pub fn place(&self) -> Order {
        self.service
            .create_order(
                &Actor::customer(ALICE),
                NewOrder::new(STORE, "12 Le Loi, District 1").line(RICE, 1),
            )
            .unwrap()
    }

    /// A fresh order driven through the normal flow until it reaches `status`.
    pub fn order_at(&self, status: OrderStatus) -> Order {
        let order = self.place();
        let id = order.id().to_string();
        let owner = Actor::store_owner(OWNER);
        let shipper = Actor::shipper(SHIPPER);

        let path: &[OrderStatus] = match status {
            OrderStatus::Pending => &[],
            OrderStatus::Confirmed => &[OrderStatus::Confirmed],
            OrderStatus::PickingUp => &[OrderStatus::Confirmed, OrderStatus::PickingUp],
            OrderStatus::Delivering => &[
                OrderStatus::Confirmed,
                OrderStatus::PickingUp,
                OrderStatus::Delivering,
            ],
            OrderStatus::Delivered => &[
                OrderStatus::Confirmed,
                OrderStatus::PickingUp,
                OrderStatus::Delivering,
                OrderStatus::Delivered,
            ],
            OrderStatus::Cancelled => &[OrderStatus::Cancelled],
        };

        let mut current = order;
        for step in path {
            current = match step {
                OrderStatus::Confirmed => self
                    .service
                    .update_status(&owner, &id, StatusChange::to(OrderStatus::Confirmed)),
                OrderStatus::PickingUp => self.service.assign_shipper(&shipper, &id),
                OrderStatus::Delivering => self
                    .service
                    .update_status(&shipper, &id, StatusChange::to(OrderStatus::Delivering)),
                OrderStatus::Delivered => {
                    self.service
                        .update_status(&shipper, &id, StatusChange::deliver("https://pod/1.jpg"))
                }
                OrderStatus::Cancelled => self.service.update_status(
                    &Actor::customer(ALICE),
                    &id,
                    StatusChange::cancel("ordered by mistake"),
                ),
                OrderStatus::Pending => unreachable!("no transition into PENDING"),
            }
            .unwrap();
        }

        assert_eq!(current.status(), status);
        current
    }
}
