//! 实体（Entity）基础抽象
//!
//! 实体以标识区分，而非以属性：
//! - 具体类型不同的实体永不相等；
//! - 同一实例与自身相等；
//! - 任一方标识未设置时不相等，否则按标识相等；
//! - 哈希取标识哈希，标识未设置时为 0；
//! - 文本表示为 `<类型名> [Id=<标识>]`。
//!
//! 标识只在“恢复窗口”（`Rehydration`）内允许为空，正常构造路径必须提供标识。
//!
use crate::error::{DomainError, DomainResult};
use crate::identifier::Identifier;
use crate::value_object::ValueObject;
use std::any::Any;

/// 以标识区分的实体抽象
///
/// 实体创建后标识不可被改写，外部代码无法取得标识槽位：
///
/// ```compile_fail
/// use ddd_base::entity;
/// use ddd_base::entity::{Entity, SlotToken};
/// use ddd_base::identifier::{Identifier, IntegerId};
///
/// #[entity(id = IntegerId)]
/// struct Customer {
///     name: String,
/// }
///
/// let mut c = Customer::with_id(IntegerId::try_new(1).unwrap());
/// *c.id_slot(SlotToken(())) = IntegerId::try_new(2).ok();
/// ```
pub trait Entity: Any + Send + Sync {
    /// 具体类型名，用于文本表示
    const TYPE: &'static str;

    /// 实体标识类型
    type Id: Identifier;

    /// 获取实体标识；仅在恢复过程中为 `None`
    fn id(&self) -> Option<&Self::Id>;

    /// 标识槽位；只有持有 `SlotToken` 的本 crate 代码（`with_id`/`Rehydration`）能够写入
    #[doc(hidden)]
    fn id_slot(&mut self, token: SlotToken) -> &mut Option<Self::Id>;

    /// 使用给定标识创建实体，其余字段取默认值
    fn with_id(id: Self::Id) -> Self
    where
        Self: Default,
    {
        let mut entity = Self::default();
        *entity.id_slot(SlotToken::new()) = Some(id);
        entity
    }

    /// 使用可空标识创建实体：`None` 视为空引用
    fn try_with_id(id: Option<Self::Id>) -> DomainResult<Self>
    where
        Self: Default,
    {
        id.map(Self::with_id)
            .ok_or(DomainError::NullReference { name: "id" })
    }

    /// 开始无标识恢复（供持久化/序列化重建使用）
    fn restoring() -> Rehydration<Self>
    where
        Self: Default,
    {
        Rehydration::begin()
    }

    /// 标识相等判断
    fn same_identity(&self, other: &dyn Any) -> bool
    where
        Self: Sized,
    {
        let Some(other) = other.downcast_ref::<Self>() else {
            return false;
        };
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self.id(), other.id()) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    /// 标识哈希；标识未设置时为 0
    fn identity_hash(&self) -> u64 {
        self.id().map_or(0, |id| id.value_hash())
    }

    /// 文本表示：`<TYPE> [Id=<id>]`
    fn describe(&self) -> String {
        let id = self.id().map(ToString::to_string).unwrap_or_default();
        format!("{} [Id={}]", Self::TYPE, id)
    }
}

/// 标识槽位的访问凭证（字段私有，外部无法构造）
#[doc(hidden)]
pub struct SlotToken(());

impl SlotToken {
    pub(crate) fn new() -> Self {
        SlotToken(())
    }
}

/// 反序列化标识槽位：缺失或为 `null` 的标识一律拒绝
#[doc(hidden)]
pub fn deserialize_id<'de, D, I>(deserializer: D) -> Result<Option<I>, D::Error>
where
    D: serde::Deserializer<'de>,
    I: Identifier + serde::Deserialize<'de>,
{
    match <Option<I> as serde::Deserialize>::deserialize(deserializer)? {
        Some(id) => Ok(Some(id)),
        None => Err(serde::de::Error::custom(DomainError::NullReference {
            name: "id",
        })),
    }
}

/// 可空实体的相等判断：两侧都为空时相等，仅一侧为空时不等
pub fn entity_eq<E: Entity>(left: Option<&E>, right: Option<&E>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => left.same_identity(right),
        _ => false,
    }
}

/// `entity_eq` 的取反
pub fn entity_ne<E: Entity>(left: Option<&E>, right: Option<&E>) -> bool {
    !entity_eq(left, right)
}

/// 恢复守卫
///
/// 持有一个标识尚未设置的实体，允许逐步填充字段；
/// 只有在标识设置之后，实体才能通过 `complete`/`finish` 离开守卫。
pub struct Rehydration<E: Entity> {
    entity: E,
}

impl<E: Entity + Default> Rehydration<E> {
    pub fn begin() -> Self {
        Self {
            entity: E::default(),
        }
    }
}

impl<E: Entity> Rehydration<E> {
    /// 填充字段
    pub fn with(mut self, populate: impl FnOnce(&mut E)) -> Self {
        populate(&mut self.entity);
        self
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut E {
        &mut self.entity
    }

    /// 设置标识；已设置的标识不可替换
    pub fn assign_id(&mut self, id: E::Id) -> DomainResult<()> {
        let slot = self.entity.id_slot(SlotToken::new());
        if let Some(existing) = slot.as_ref() {
            return Err(DomainError::InvalidState {
                reason: format!("{} already has id {}", E::TYPE, existing),
            });
        }
        *slot = Some(id);
        Ok(())
    }

    /// 结束恢复；标识必须已设置
    pub fn complete(self) -> DomainResult<E> {
        if self.entity.id().is_none() {
            return Err(DomainError::InvalidState {
                reason: format!("{} restored without an id", E::TYPE),
            });
        }
        Ok(self.entity)
    }

    /// 设置标识并结束恢复
    pub fn finish(mut self, id: E::Id) -> DomainResult<E> {
        self.assign_id(id)?;
        self.complete()
    }

    pub fn finish_nullable(self, id: Option<E::Id>) -> DomainResult<E> {
        match id {
            Some(id) => self.finish(id),
            None => Err(DomainError::NullReference { name: "id" }),
        }
    }
}
