//! ddd-base 过程宏
//!
//! - `#[value_object]`：按字段声明顺序生成结构相等（`ValueObject`/`PartialEq`/`Eq`/`Hash`）
//! - `#[entity_id]`：为单字段 tuple struct 生成标识符实现（`Identifier` 及转换）
//! - `#[entity]`：为具名字段结构体注入 `id` 槽位并生成基于标识的相等实现
//!
//! 生成代码统一通过 `::ddd_base` 路径引用基础库。
mod derive_utils;
mod entity;
mod entity_id;
mod field_utils;
mod value_object;

use proc_macro::TokenStream;

/// 值对象宏
/// - 支持结构体（具名或 tuple）与枚举
/// - 结构体：每个字段按声明顺序作为相等分量，`Option<T>` 字段为可空分量，
///   `#[value_object(skip)]` 标记的字段不参与相等
/// - 枚举：派生 `PartialEq/Eq/Hash`，整体作为唯一分量
/// - 参数：`#[value_object(debug = true|false)]`，默认 true
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}

/// 实体 ID 宏
/// 用于单字段 tuple struct（如 `struct OrderId(Uuid);`、`struct ProductId(i64);`）：
/// - 实现 `Identifier`（分量即内部值）、`Display`、`FromStr`、`AsRef` 与双向转换
/// - `#[entity_id(integer)]`：内部值必须为 `i64`，要求大于零并实现 `IntegerIdentifier`
/// - `#[entity_id(validate = path::to_fn)]`：附加自定义校验 `fn(&Inner) -> DomainResult<()>`
/// - `#[entity_id(debug = false)]`：不派生 Debug
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 实体宏
/// - 在字段最前注入 `id: Option<IdType>`（若已存在则复用并前置）
/// - 自动实现 `::ddd_base::entity::Entity`，以及基于标识的 `PartialEq/Eq/Hash/Display`
/// - 参数：`#[entity(id = IdType, aggregate_root = true|false, debug = true|false)]`
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}
