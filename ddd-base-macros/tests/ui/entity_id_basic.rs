use ddd_base::error::{DomainError, DomainResult};
use ddd_base::identifier::{Identifier, IntegerIdentifier};
use ddd_base_macros::entity_id;
use uuid::Uuid;

#[entity_id]
struct UserId(Uuid);

#[entity_id(debug = false)]
struct ProfileId(Uuid);

impl std::fmt::Debug for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProfileId(..)")
    }
}

#[entity_id(integer)]
#[derive(Copy)]
struct TicketId(i64);

fn short(value: &String) -> DomainResult<()> {
    if value.len() > 8 {
        return Err(DomainError::invalid_argument("value", "too long"));
    }
    Ok(())
}

#[entity_id(validate = short)]
struct Code(String);

fn main() {
    let id = UserId::new(Uuid::new_v4());
    let _ = format!("{:?} {}", id, id); // 默认启用 Debug

    let pid = ProfileId::new(Uuid::new_v4());
    let _ = format!("{:?}", pid); // 手写 Debug

    let ticket: DomainResult<TicketId> = TicketId::try_from(5);
    let _ = ticket.map(|t| t.integer_value());
    let _: i64 = TicketId::try_new(1).map(i64::from).unwrap_or_default();

    let _ = Code::try_from("ABC".to_string());
    let _: Result<Code, DomainError> = "ABC".parse();
}
