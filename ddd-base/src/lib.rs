//! DDD 领域层基础构件（ddd-base）
//!
//! 提供领域建模最基础的几类抽象：
//! - 值对象（`value_object`）：按“相等分量”判断结构相等；
//! - 标识符（`identifier`）：包装单个值的强类型标识，整数标识必须大于零；
//! - 实体（`entity`）：以标识区分，支持无标识的受控恢复；
//! - 聚合根（`aggregate_root`）：仓储入口的能力标记；
//! - 仓储契约（`repository`）与规约（`specification`）：只定义接口，不绑定存储；
//! - 内存仓储（`inmemory`，feature `inmemory`）：契约的进程内参考实现。
//!
//! 典型用法：
//! 1. 用 `#[entity_id]` 定义标识，用 `#[value_object]` 定义值对象；
//! 2. 用 `#[entity(id = ..., aggregate_root = true)]` 定义聚合根；
//! 3. 为聚合根实现 `Repository`，或在测试中直接使用 `InMemoryRepository`。
//!
pub mod aggregate_root;
pub mod entity;
pub mod error;
pub mod identifier;
#[cfg(feature = "inmemory")]
pub mod inmemory;
pub mod repository;
pub mod specification;
pub mod value_object;

pub use ddd_base_macros::{entity, entity_id, value_object};

// 允许在本 crate 内部通过 ::ddd_base 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::ddd_base 路径。
extern crate self as ddd_base;
