//! 标识符（Identifier）
//!
//! 标识符是只包含一个不透明值的值对象，用于唯一命名实体：
//! - 相等分量恰为内部值；
//! - 构造时拒绝空值（`from_nullable(None)` 返回 `NullReference`）；
//! - `Display` 仅输出内部值。
//!
//! 整数标识（`IntegerIdentifier`）额外要求值大于零。
//!
use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;
use ddd_base_macros::entity_id;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// 标识符抽象（值对象的特化）
pub trait Identifier:
    ValueObject + Clone + Eq + Hash + Display + Debug + Send + Sync + 'static
{
    /// 内部值类型
    type Value: PartialEq + Hash + Display + Clone + Send + Sync + 'static;

    /// 获取内部值
    fn value(&self) -> &Self::Value;

    #[doc(hidden)]
    fn wrap(value: Self::Value) -> Self;

    /// 领域约束校验，默认不做限制
    fn validate(value: &Self::Value) -> DomainResult<()> {
        let _ = value;
        Ok(())
    }

    /// 校验后构造
    fn try_new(value: Self::Value) -> DomainResult<Self> {
        Self::validate(&value)?;
        Ok(Self::wrap(value))
    }

    /// 从可空值构造：`None` 视为空引用
    fn from_nullable(value: Option<Self::Value>) -> DomainResult<Self> {
        match value {
            Some(value) => Self::try_new(value),
            None => Err(DomainError::NullReference { name: "value" }),
        }
    }
}

/// 整数标识：内部值为 `i64` 且必须大于零
pub trait IntegerIdentifier: Identifier<Value = i64> {
    fn integer_value(&self) -> i64 {
        *self.value()
    }
}

/// 整数标识的取值约束
pub fn ensure_positive(value: i64) -> DomainResult<()> {
    if value <= 0 {
        return Err(DomainError::invalid_argument(
            "value",
            format!("identifier must be greater than zero, got {value}"),
        ));
    }
    Ok(())
}

/// 通用整数标识
///
/// 不需要专属标识类型时可直接使用；需要区分实体时请以
/// `#[entity_id(integer)]` 定义独立类型，不同类型的标识互不相等。
#[entity_id(integer)]
#[derive(Copy)]
pub struct IntegerId(i64);
