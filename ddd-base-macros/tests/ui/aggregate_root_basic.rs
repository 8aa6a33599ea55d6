use ddd_base::aggregate_root::AggregateRoot;
use ddd_base::identifier::IntegerId;
use ddd_base_macros::entity;
use serde::{Deserialize, Serialize};

#[entity(id = IntegerId, aggregate_root = true)]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Account {
    name: String,
}

fn requires_root<R: AggregateRoot>(_: &R) {}

fn main() {
    let account = Account::default();
    requires_root(&account);
    let _ = account.name.len();
}
