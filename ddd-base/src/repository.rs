//! 仓储契约（Repository）
//!
//! 面向聚合根的通用 CRUD 与查询接口，只定义契约，不绑定存储实现。
//! - 类型约束 `E: AggregateRoot`：非聚合根实体无法直接使用仓储；
//! - 每个操作均为异步，并接收可选的取消令牌（`None` 表示调用方不取消）；
//! - “未找到”以 `Ok(None)`/`Ok(false)` 表达，错误通道只用于约束冲突与基础设施失败。
//!
use crate::aggregate_root::AggregateRoot;
use crate::error::{DomainError, DomainResult};
use crate::specification::Specification;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: AggregateRoot,
{
    /// 按标识读取；不存在时返回 `Ok(None)`
    async fn get_by_id(
        &self,
        id: &E::Id,
        cancel: Option<&CancellationToken>,
    ) -> DomainResult<Option<E>>;

    /// 读取全部
    async fn get_all(&self, cancel: Option<&CancellationToken>) -> DomainResult<Vec<E>>;

    /// 读取满足规约的实体
    async fn get_by_predicate(
        &self,
        filter: &dyn Specification<E>,
        cancel: Option<&CancellationToken>,
    ) -> DomainResult<Vec<E>>;

    /// 新增，返回已保存的实体；标识冲突时返回 `Conflict`
    async fn add(&self, entity: E, cancel: Option<&CancellationToken>) -> DomainResult<E>;

    /// 更新，返回已保存的实体；不存在时返回 `NotFound`
    async fn update(&self, entity: E, cancel: Option<&CancellationToken>) -> DomainResult<E>;

    /// 按标识删除，返回是否确有删除
    async fn remove_by_id(
        &self,
        id: &E::Id,
        cancel: Option<&CancellationToken>,
    ) -> DomainResult<bool>;

    /// 按实体删除（以实体标识为准）
    async fn remove(&self, entity: &E, cancel: Option<&CancellationToken>) -> DomainResult<bool>;

    async fn exists(&self, id: &E::Id, cancel: Option<&CancellationToken>) -> DomainResult<bool>;

    async fn count(&self, cancel: Option<&CancellationToken>) -> DomainResult<usize>;

    async fn count_by_predicate(
        &self,
        filter: &dyn Specification<E>,
        cancel: Option<&CancellationToken>,
    ) -> DomainResult<usize>;
}

#[async_trait]
impl<E, T> Repository<E> for Arc<T>
where
    E: AggregateRoot,
    T: Repository<E> + ?Sized,
{
    async fn get_by_id(
        &self,
        id: &E::Id,
        cancel: Option<&CancellationToken>,
    ) -> DomainResult<Option<E>> {
        (**self).get_by_id(id, cancel).await
    }

    async fn get_all(&self, cancel: Option<&CancellationToken>) -> DomainResult<Vec<E>> {
        (**self).get_all(cancel).await
    }

    async fn get_by_predicate(
        &self,
        filter: &dyn Specification<E>,
        cancel: Option<&CancellationToken>,
    ) -> DomainResult<Vec<E>> {
        (**self).get_by_predicate(filter, cancel).await
    }

    async fn add(&self, entity: E, cancel: Option<&CancellationToken>) -> DomainResult<E> {
        (**self).add(entity, cancel).await
    }

    async fn update(&self, entity: E, cancel: Option<&CancellationToken>) -> DomainResult<E> {
        (**self).update(entity, cancel).await
    }

    async fn remove_by_id(
        &self,
        id: &E::Id,
        cancel: Option<&CancellationToken>,
    ) -> DomainResult<bool> {
        (**self).remove_by_id(id, cancel).await
    }

    async fn remove(&self, entity: &E, cancel: Option<&CancellationToken>) -> DomainResult<bool> {
        (**self).remove(entity, cancel).await
    }

    async fn exists(&self, id: &E::Id, cancel: Option<&CancellationToken>) -> DomainResult<bool> {
        (**self).exists(id, cancel).await
    }

    async fn count(&self, cancel: Option<&CancellationToken>) -> DomainResult<usize> {
        (**self).count(cancel).await
    }

    async fn count_by_predicate(
        &self,
        filter: &dyn Specification<E>,
        cancel: Option<&CancellationToken>,
    ) -> DomainResult<usize> {
        (**self).count_by_predicate(filter, cancel).await
    }
}

/// 取消检查：令牌已触发时返回 `Cancelled`
pub fn ensure_not_cancelled(cancel: Option<&CancellationToken>) -> DomainResult<()> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(DomainError::Cancelled),
        _ => Ok(()),
    }
}
