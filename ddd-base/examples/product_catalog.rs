/// 商品目录示例
/// 演示标识、值对象、聚合根与内存仓储的配合：新增、恢复、按规约查询与更新
use ddd_base::entity::Entity;
use ddd_base::error::DomainResult;
use ddd_base::identifier::{Identifier, IntegerIdentifier};
use ddd_base::inmemory::InMemoryRepository;
use ddd_base::repository::Repository;
use ddd_base::specification::predicate;
use ddd_base::{entity, entity_id, value_object};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

// ============================================================================
// 领域模型定义
// ============================================================================

#[entity_id(integer)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(i64);

#[value_object]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    cents: i64,
    currency: String,
}

#[entity(id = ProductId, aggregate_root = true)]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    name: String,
    price: Option<Money>,
}

impl Product {
    fn create(id: i64, name: &str, cents: i64) -> DomainResult<Self> {
        let mut product = Product::with_id(ProductId::try_new(id)?);
        product.name = name.to_string();
        product.price = Some(Money {
            cents,
            currency: "BRL".to_string(),
        });
        Ok(product)
    }

    fn reprice(&mut self, cents: i64) {
        if let Some(price) = self.price.as_mut() {
            price.cents = cents;
        }
    }
}

// ============================================================================
// 演示
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    let repo = InMemoryRepository::<Product>::new();

    repo.add(Product::create(1, "Café", 1_890)?, None).await?;
    repo.add(Product::create(2, "Pão de queijo", 650)?, None).await?;

    // 非法标识在构造阶段即被拒绝
    if let Err(err) = Product::create(0, "Fantasma", 100) {
        println!("rejected: {err}");
    }

    // 映射层恢复：先填充字段，再设置标识
    let restored = Product::restoring()
        .with(|p| {
            p.name = "Bolo de rolo".to_string();
            p.price = Some(Money {
                cents: 2_400,
                currency: "BRL".to_string(),
            });
        })
        .finish("3".parse::<ProductId>()?)?;
    println!("restored: {restored}");
    repo.add(restored, None).await?;

    let expensive = predicate(|p: &Product| p.price.as_ref().is_some_and(|m| m.cents > 1_000));
    for product in repo.get_by_predicate(&expensive, None).await? {
        println!("expensive: {product} {}", product.name);
    }

    let id = ProductId::try_new(2)?;
    if let Some(mut product) = repo.get_by_id(&id, None).await? {
        product.reprice(1_250);
        repo.update(product, None).await?;
    }
    println!(
        "expensive after reprice: {}",
        repo.count_by_predicate(&expensive, None).await?
    );

    let removed = repo.remove_by_id(&id, None).await?;
    println!(
        "removed product {}: {removed}, remaining {}",
        id.integer_value(),
        repo.count(None).await?
    );

    Ok(())
}
