use super::resource::Resource;
use crate::models::{
    Client, ClientCreate, ClientUpdate, Delivery, DeliveryCreate, DeliveryUpdate, Order,
    OrderCreate, OrderUpdate, Transaction, TransactionCreate, TransactionUpdate, User, UserCreate,
    UserUpdate,
};

pub const PENDING_SCOPE: &str = "pending";
pub const COMPLETED_SCOPE: &str = "completed";

pub struct Clients;

impl Resource for Clients {
    type Item = Client;
    type Create = ClientCreate;
    type Update = ClientUpdate;
    const PATH: &'static str = "/clients";
    const NOUN: &'static str = "client";
}

pub struct Orders;

impl Resource for Orders {
    type Item = Order;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    const PATH: &'static str = "/orders";
    const NOUN: &'static str = "order";
}

pub struct Deliveries;

impl Resource for Deliveries {
    type Item = Delivery;
    type Create = DeliveryCreate;
    type Update = DeliveryUpdate;
    const PATH: &'static str = "/deliveries";
    const NOUN: &'static str = "delivery";
}

pub struct Transactions;

impl Resource for Transactions {
    type Item = Transaction;
    type Create = TransactionCreate;
    type Update = TransactionUpdate;
    const PATH: &'static str = "/transactions";
    const NOUN: &'static str = "transaction";
}

pub struct Users;

impl Resource for Users {
    type Item = User;
    type Create = UserCreate;
    type Update = UserUpdate;
    const PATH: &'static str = "/users";
    const NOUN: &'static str = "user";
}
