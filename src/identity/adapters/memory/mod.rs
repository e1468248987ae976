//! In-memory identity adapters.

mod session;
mod users;

pub use session::InMemorySessionStore;
pub use users::InMemoryUserRepository;
