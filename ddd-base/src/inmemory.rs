//! 内存仓储（InMemoryRepository）
//!
//! 进程内的 `Repository` 参考实现，便于测试与示例验证仓储契约：
//! - 以 `DashMap<E::Id, E>` 保存聚合根副本；
//! - 每个操作先检查取消令牌；
//! - 标识未设置的实体一律拒绝（`NullReference`）。
//!
use crate::aggregate_root::AggregateRoot;
use crate::error::{DomainError, DomainResult};
use crate::repository::{Repository, ensure_not_cancelled};
use crate::specification::Specification;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// 基于内存的仓储实现
pub struct InMemoryRepository<E>
where
    E: AggregateRoot,
{
    items: DashMap<E::Id, E>,
}

impl<E> Default for InMemoryRepository<E>
where
    E: AggregateRoot,
{
    fn default() -> Self {
        Self {
            items: DashMap::new(),
        }
    }
}

impl<E> InMemoryRepository<E>
where
    E: AggregateRoot + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn require_id(entity: &E) -> DomainResult<E::Id> {
        entity
            .id()
            .cloned()
            .ok_or(DomainError::NullReference { name: "id" })
    }

    fn filtered(&self, filter: &dyn Specification<E>) -> Vec<E> {
        self.items
            .iter()
            .filter(|item| filter.is_satisfied_by(item.value()))
            .map(|item| item.value().clone())
            .collect()
    }
}

#[async_trait]
impl<E> Repository<E> for InMemoryRepository<E>
where
    E: AggregateRoot + Clone,
{
    async fn get_by_id(
        &self,
        id: &E::Id,
        cancel: Option<&CancellationToken>,
    ) -> DomainResult<Option<E>> {
        ensure_not_cancelled(cancel)?;
        let found = self.items.get(id).map(|item| item.value().clone());
        trace!(entity = E::TYPE, %id, found = found.is_some(), "get_by_id");
        Ok(found)
    }

    async fn get_all(&self, cancel: Option<&CancellationToken>) -> DomainResult<Vec<E>> {
        ensure_not_cancelled(cancel)?;
        Ok(self.items.iter().map(|item| item.value().clone()).collect())
    }

    async fn get_by_predicate(
        &self,
        filter: &dyn Specification<E>,
        cancel: Option<&CancellationToken>,
    ) -> DomainResult<Vec<E>> {
        ensure_not_cancelled(cancel)?;
        let matched = self.filtered(filter);
        trace!(entity = E::TYPE, matched = matched.len(), "get_by_predicate");
        Ok(matched)
    }

    async fn add(&self, entity: E, cancel: Option<&CancellationToken>) -> DomainResult<E> {
        ensure_not_cancelled(cancel)?;
        let id = Self::require_id(&entity)?;

        match self.items.entry(id.clone()) {
            Entry::Occupied(_) => {
                debug!(entity = E::TYPE, %id, "add rejected: id already present");
                Err(DomainError::conflict(format!(
                    "{} with id {} already exists",
                    E::TYPE,
                    id
                )))
            }
            Entry::Vacant(slot) => {
                slot.insert(entity.clone());
                debug!(entity = E::TYPE, %id, "added");
                Ok(entity)
            }
        }
    }

    async fn update(&self, entity: E, cancel: Option<&CancellationToken>) -> DomainResult<E> {
        ensure_not_cancelled(cancel)?;
        let id = Self::require_id(&entity)?;

        let Some(mut current) = self.items.get_mut(&id) else {
            debug!(entity = E::TYPE, %id, "update rejected: id not found");
            return Err(DomainError::not_found(format!("{} with id {}", E::TYPE, id)));
        };
        *current = entity.clone();
        debug!(entity = E::TYPE, %id, "updated");
        Ok(entity)
    }

    async fn remove_by_id(
        &self,
        id: &E::Id,
        cancel: Option<&CancellationToken>,
    ) -> DomainResult<bool> {
        ensure_not_cancelled(cancel)?;
        let removed = self.items.remove(id).is_some();
        debug!(entity = E::TYPE, %id, removed, "remove");
        Ok(removed)
    }

    async fn remove(&self, entity: &E, cancel: Option<&CancellationToken>) -> DomainResult<bool> {
        ensure_not_cancelled(cancel)?;
        let id = Self::require_id(entity)?;
        self.remove_by_id(&id, cancel).await
    }

    async fn exists(&self, id: &E::Id, cancel: Option<&CancellationToken>) -> DomainResult<bool> {
        ensure_not_cancelled(cancel)?;
        Ok(self.items.contains_key(id))
    }

    async fn count(&self, cancel: Option<&CancellationToken>) -> DomainResult<usize> {
        ensure_not_cancelled(cancel)?;
        Ok(self.items.len())
    }

    async fn count_by_predicate(
        &self,
        filter: &dyn Specification<E>,
        cancel: Option<&CancellationToken>,
    ) -> DomainResult<usize> {
        ensure_not_cancelled(cancel)?;
        Ok(self
            .items
            .iter()
            .filter(|item| filter.is_satisfied_by(item.value()))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::identifier::{Identifier, IntegerId};
    use crate::specification::predicate;
    use ddd_base_macros::entity;

    #[entity(id = IntegerId, aggregate_root = true)]
    #[derive(Clone)]
    struct Customer {
        name: String,
        active: bool,
    }

    fn customer(id: i64, name: &str, active: bool) -> Customer {
        Customer {
            name: name.to_string(),
            active,
            ..Customer::with_id(IntegerId::try_new(id).unwrap())
        }
    }

    fn id(value: i64) -> IntegerId {
        IntegerId::try_new(value).unwrap()
    }

    // 测试新增、读取与存在性
    #[tokio::test]
    async fn add_then_get_and_exists() {
        let repo = InMemoryRepository::new();
        let saved = repo.add(customer(1, "Ana", true), None).await.unwrap();

        assert_eq!(saved.id(), Some(&id(1)));
        let loaded = repo.get_by_id(&id(1), None).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Ana");
        assert!(repo.exists(&id(1), None).await.unwrap());
        assert!(!repo.exists(&id(2), None).await.unwrap());
        assert!(repo.get_by_id(&id(2), None).await.unwrap().is_none());
    }

    // 测试重复新增返回冲突
    #[tokio::test]
    async fn duplicate_add_is_a_conflict() {
        let repo = InMemoryRepository::new();
        repo.add(customer(1, "Ana", true), None).await.unwrap();

        let err = repo.add(customer(1, "Bia", true), None).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));

        let kept = repo.get_by_id(&id(1), None).await.unwrap().unwrap();
        assert_eq!(kept.name, "Ana");
    }

    // 测试更新不存在的实体返回 NotFound
    #[tokio::test]
    async fn update_requires_existing_entity() {
        let repo = InMemoryRepository::new();
        let err = repo.update(customer(9, "Ghost", true), None).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        repo.add(customer(9, "Ghost", true), None).await.unwrap();
        repo.update(customer(9, "Visible", false), None).await.unwrap();
        let loaded = repo.get_by_id(&id(9), None).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Visible");
        assert!(!loaded.active);
    }

    // 测试两种删除方式
    #[tokio::test]
    async fn remove_by_id_and_by_entity() {
        let repo = InMemoryRepository::new();
        let a = repo.add(customer(1, "A", true), None).await.unwrap();
        repo.add(customer(2, "B", true), None).await.unwrap();

        assert!(repo.remove(&a, None).await.unwrap());
        assert!(!repo.remove(&a, None).await.unwrap());
        assert!(repo.remove_by_id(&id(2), None).await.unwrap());
        assert_eq!(repo.count(None).await.unwrap(), 0);
    }

    // 测试按规约查询与计数
    #[tokio::test]
    async fn filters_with_specifications() {
        let repo = InMemoryRepository::new();
        repo.add(customer(1, "Ana", true), None).await.unwrap();
        repo.add(customer(2, "Bia", false), None).await.unwrap();
        repo.add(customer(3, "Caio", true), None).await.unwrap();

        let active = predicate(|c: &Customer| c.active);
        let mut found = repo.get_by_predicate(&active, None).await.unwrap();
        found.sort_by_key(|c| c.id().map(|id| *id.value()));

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Ana");
        assert_eq!(found[1].name, "Caio");
        assert_eq!(repo.count_by_predicate(&active, None).await.unwrap(), 2);
        assert_eq!(repo.count(None).await.unwrap(), 3);
        assert_eq!(repo.get_all(None).await.unwrap().len(), 3);
    }

    // 测试取消令牌
    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let repo = InMemoryRepository::new();
        let token = CancellationToken::new();
        token.cancel();

        let err = repo
            .add(customer(1, "Ana", true), Some(&token))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Cancelled));
        assert_eq!(repo.count(None).await.unwrap(), 0);
        assert!(matches!(
            repo.count(Some(&token)).await,
            Err(DomainError::Cancelled)
        ));
    }

    // 测试拒绝未设置标识的实体
    #[tokio::test]
    async fn entities_without_id_are_rejected() {
        let repo: InMemoryRepository<Customer> = InMemoryRepository::new();
        let err = repo.add(Customer::default(), None).await.unwrap_err();
        assert!(matches!(err, DomainError::NullReference { name: "id" }));
    }
}
