//! 规约（Specification）
//!
//! 仓储按条件查询与计数时使用的过滤表达式。
//! 规约可组合（and/or/not），闭包可通过 `predicate` 直接作为规约使用。
//!

/// 规约模式的核心 trait
///
/// 用于封装业务规则，使其可复用、可组合和可测试
pub trait Specification<T>: Send + Sync {
    /// 检查候选对象是否满足规约
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// 与另一个规约进行 AND 组合
    fn and<S>(self, other: S) -> AndSpecification<T>
    where
        Self: Sized + 'static,
        S: Specification<T> + 'static,
    {
        AndSpecification::new(Box::new(self), Box::new(other))
    }

    /// 与另一个规约进行 OR 组合
    fn or<S>(self, other: S) -> OrSpecification<T>
    where
        Self: Sized + 'static,
        S: Specification<T> + 'static,
    {
        OrSpecification::new(Box::new(self), Box::new(other))
    }

    /// 对规约进行 NOT 操作
    fn not(self) -> NotSpecification<T>
    where
        Self: Sized + 'static,
    {
        NotSpecification::new(Box::new(self))
    }
}

/// 为 Box<dyn Specification<T>> 实现 Specification trait
impl<T> Specification<T> for Box<dyn Specification<T>> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.as_ref().is_satisfied_by(candidate)
    }
}

/// AND 组合规约
pub struct AndSpecification<T> {
    left: Box<dyn Specification<T>>,
    right: Box<dyn Specification<T>>,
}

impl<T> AndSpecification<T> {
    pub fn new(left: Box<dyn Specification<T>>, right: Box<dyn Specification<T>>) -> Self {
        Self { left, right }
    }
}

impl<T> Specification<T> for AndSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) && self.right.is_satisfied_by(candidate)
    }
}

/// OR 组合规约
pub struct OrSpecification<T> {
    left: Box<dyn Specification<T>>,
    right: Box<dyn Specification<T>>,
}

impl<T> OrSpecification<T> {
    pub fn new(left: Box<dyn Specification<T>>, right: Box<dyn Specification<T>>) -> Self {
        Self { left, right }
    }
}

impl<T> Specification<T> for OrSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) || self.right.is_satisfied_by(candidate)
    }
}

/// NOT 规约
pub struct NotSpecification<T> {
    inner: Box<dyn Specification<T>>,
}

impl<T> NotSpecification<T> {
    pub fn new(inner: Box<dyn Specification<T>>) -> Self {
        Self { inner }
    }
}

impl<T> Specification<T> for NotSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.inner.is_satisfied_by(candidate)
    }
}

/// 闭包规约
pub struct Predicate<F> {
    f: F,
}

impl<T, F> Specification<T> for Predicate<F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (self.f)(candidate)
    }
}

/// 以闭包构造规约
pub fn predicate<T, F>(f: F) -> Predicate<F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    Predicate { f }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysTrueSpec;
    impl Specification<i32> for AlwaysTrueSpec {
        fn is_satisfied_by(&self, _: &i32) -> bool {
            true
        }
    }

    struct AlwaysFalseSpec;
    impl Specification<i32> for AlwaysFalseSpec {
        fn is_satisfied_by(&self, _: &i32) -> bool {
            false
        }
    }

    #[test]
    fn test_and_specification() {
        let spec = AlwaysTrueSpec.and(AlwaysTrueSpec);
        assert!(spec.is_satisfied_by(&42));

        let spec = AlwaysTrueSpec.and(AlwaysFalseSpec);
        assert!(!spec.is_satisfied_by(&42));
    }

    #[test]
    fn test_or_specification() {
        let spec = AlwaysTrueSpec.or(AlwaysFalseSpec);
        assert!(spec.is_satisfied_by(&42));

        let spec = AlwaysFalseSpec.or(AlwaysFalseSpec);
        assert!(!spec.is_satisfied_by(&42));
    }

    #[test]
    fn test_not_specification() {
        assert!(!AlwaysTrueSpec.not().is_satisfied_by(&42));
        assert!(AlwaysFalseSpec.not().is_satisfied_by(&42));
    }

    // 测试闭包规约与组合
    #[test]
    fn test_predicate_combination() {
        let even = predicate(|n: &i32| n % 2 == 0);
        let positive = predicate(|n: &i32| *n > 0);
        let spec: AndSpecification<i32> = even.and(positive);

        assert!(spec.is_satisfied_by(&4));
        assert!(!spec.is_satisfied_by(&-4));
        assert!(!spec.is_satisfied_by(&3));
    }

    #[test]
    fn test_boxed_specification() {
        let boxed: Box<dyn Specification<i32>> = Box::new(predicate(|n: &i32| *n < 10));
        assert!(boxed.is_satisfied_by(&1));
        assert!(!boxed.not().is_satisfied_by(&1));
    }
}
