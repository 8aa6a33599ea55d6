use ddd_base::entity::Entity;
use ddd_base::identifier::IntegerId;
use ddd_base_macros::entity;
use serde::{Deserialize, Serialize};

#[entity(id = IntegerId)]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Line {
    sku: String,
    quantity: u32,
}

// 已存在的 id 字段会被复用并前置
#[entity(id = IntegerId, debug = false)]
struct Memo {
    text: String,
    id: Option<IntegerId>,
}

impl std::fmt::Debug for Memo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memo({})", self.text)
    }
}

fn main() {
    let line = Line::default();
    let _ = line.id().is_none();
    let _ = format!("{} {:?} {}", line, line.clone(), line.quantity + line.sku.len() as u32);
    let _ = line == Line::default();

    let memo = Memo::default();
    let _ = format!("{:?}", memo);
    let _ = <Memo as Entity>::TYPE;
}
