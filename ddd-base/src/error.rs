//! 领域层统一错误定义
//!
//! 聚焦构造校验（空值/非法参数）、状态约束与仓储契约的最小必要集合，
//! 便于在各实现层统一转换为 `DomainError`。
//!
//! 相等比较从不返回错误；“未找到”在仓储契约中以 `Ok(None)`/`Ok(false)` 表达，
//! 只有基础设施失败才走错误通道。
//!
use std::fmt::Display;
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 构造校验 ---
    #[error("null reference: {name} must not be null")]
    NullReference { name: &'static str },
    #[error("invalid argument: {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
    #[error("parse error: {reason}")]
    Parse { reason: String },

    // --- 领域规则/状态 ---
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    // --- 仓储/持久化 ---
    #[error("not found: {reason}")]
    NotFound { reason: String },
    #[error("conflict: {reason}")]
    Conflict { reason: String },
    #[error("operation cancelled")]
    Cancelled,
    #[error("database error: {reason}")]
    Database { reason: String },
}

impl DomainError {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub fn parse(err: impl Display) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        DomainError::NotFound {
            reason: reason.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        DomainError::Conflict {
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

// ---- Cross-crate conversions for infrastructure convenience ----
// 允许在仓储适配层直接使用 `?` 将 sqlx 等错误转换为 DomainError

#[cfg(feature = "infra-sqlx")]
impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DomainError::NotFound {
                reason: "row not found".to_string(),
            },
            other => DomainError::Database {
                reason: other.to_string(),
            },
        }
    }
}

impl From<std::num::ParseIntError> for DomainError {
    fn from(err: std::num::ParseIntError) -> Self {
        DomainError::parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_argument() {
        let err = DomainError::NullReference { name: "id" };
        assert_eq!(err.to_string(), "null reference: id must not be null");

        let err = DomainError::invalid_argument("value", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid argument: value: must be greater than zero"
        );
    }

    // 测试仓储侧错误的文本
    #[test]
    fn repository_outcomes_render_reason() {
        assert_eq!(
            DomainError::not_found("Order with id 1").to_string(),
            "not found: Order with id 1"
        );
        assert_eq!(
            DomainError::conflict("Order with id 1 already exists").to_string(),
            "conflict: Order with id 1 already exists"
        );
        assert_eq!(DomainError::Cancelled.to_string(), "operation cancelled");
        let db = DomainError::Database {
            reason: "connection reset".into(),
        };
        assert_eq!(db.to_string(), "database error: connection reset");
    }

    #[test]
    fn parse_int_error_converts_to_parse() {
        let err: DomainError = "abc".parse::<i64>().unwrap_err().into();
        assert!(matches!(err, DomainError::Parse { .. }));
    }
}
