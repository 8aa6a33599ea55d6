//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的不可变对象。相等由类型自身声明的“相等分量”决定：
//! - 两个实例相等，当且仅当具体类型相同，且分量序列按声明顺序逐一相等；
//! - 分量可为空（`None`），两侧同为空视为相等；
//! - 哈希为各分量哈希的异或折叠（空分量贡献 0）。
//!
//! 异或折叠与分量顺序无关：交换两个分量得到的实例哈希相同（但并不相等）。
//! 这是既有的可观测行为，调用方可能依赖它，因此保持不变。
//!
//! 一般通过 `#[value_object]` 宏生成实现：
//!
//! ```
//! use ddd_base::value_object::ValueObject;
//! use ddd_base::value_object;
//!
//! #[value_object]
//! struct Money {
//!     amount: i64,
//!     currency: String,
//! }
//!
//! let a = Money { amount: 10, currency: "BRL".into() };
//! let b = Money { amount: 10, currency: "BRL".into() };
//! assert_eq!(a, b);
//! assert_eq!(a.value_hash(), b.value_hash());
//! ```
//!
use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// 获取 `&dyn Any` 视图，用于比较具体类型
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 单个相等分量（异构）
///
/// 对任意 `PartialEq + Hash + 'static` 类型自动实现。
pub trait EqualityComponent: Any {
    /// 与另一分量比较；类型不同时返回 false
    fn component_eq(&self, other: &dyn EqualityComponent) -> bool;

    /// 分量自身的哈希
    fn component_hash(&self) -> u64;

    #[doc(hidden)]
    fn component_any(&self) -> &dyn Any;
}

impl<T> EqualityComponent for T
where
    T: PartialEq + Hash + Any,
{
    fn component_eq(&self, other: &dyn EqualityComponent) -> bool {
        other
            .component_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn component_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn component_any(&self) -> &dyn Any {
        self
    }
}

/// 可空分量：`None` 表示空值
pub type Component<'a> = Option<&'a dyn EqualityComponent>;

/// 值对象抽象
pub trait ValueObject: AsAny {
    /// 按声明顺序返回参与相等判断的分量
    fn equality_components(&self) -> Vec<Component<'_>>;

    /// 结构相等：具体类型相同且分量序列逐一相等
    fn value_eq(&self, other: &dyn ValueObject) -> bool {
        if self.as_any().type_id() != other.as_any().type_id() {
            return false;
        }
        components_eq(&self.equality_components(), &other.equality_components())
    }

    /// 分量哈希的异或折叠
    fn value_hash(&self) -> u64 {
        fold_hash(&self.equality_components())
    }
}

/// 逐一比较两个分量序列（长度不同视为不等）
pub fn components_eq(left: &[Component<'_>], right: &[Component<'_>]) -> bool {
    left.len() == right.len()
        && left.iter().zip(right).all(|pair| match pair {
            (None, None) => true,
            (Some(a), Some(b)) => a.component_eq(*b),
            _ => false,
        })
}

/// 以异或折叠分量哈希，空分量贡献 0
pub fn fold_hash(components: &[Component<'_>]) -> u64 {
    components
        .iter()
        .map(|c| c.map_or(0, |c| c.component_hash()))
        .fold(0, |acc, h| acc ^ h)
}
