//! 聚合根（AggregateRoot）标记
//!
//! 聚合根是一致性边界，也是仓储的唯一入口。
//! 未标记的实体只能经由所属聚合根访问，无法直接交给 `Repository`。
//!
use crate::entity::Entity;

/// 聚合根能力标记（无方法）
///
/// 一般通过 `#[entity(id = ..., aggregate_root = true)]` 实现。
pub trait AggregateRoot: Entity {}
