pub mod commands;
pub mod dispatcher;
pub mod prompts;
pub mod session;
pub mod store;

pub use commands::Command;
pub use dispatcher::{Dispatcher, Handled};
pub use session::{Session, Step, Transition};
pub use store::{InMemorySessionStore, SessionStore};
