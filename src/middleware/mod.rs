//! Request middleware: session resolution and the protected-route gate

pub mod gate;
pub mod session;

pub use gate::require_roles;
pub use session::{session_layer, DbConn, Principal, SessionState};
