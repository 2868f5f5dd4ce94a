use serde::{Deserialize, Deserializer};

mod comment;
mod priority;
mod ticket;
mod user;

pub use comment::{Comment, NewComment};
pub use priority::Priority;
pub use ticket::{NewTicket, Ticket, TicketStatus, TicketUpdate};
pub use user::{User, UserInput};

/// Treat an explicit JSON `null` like a missing field. The backend's
/// embedded DTOs send `null` for collections it did not fill in.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
