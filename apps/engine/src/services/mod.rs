//! Service layer: session orchestration over the pure domain plus the
//! external collaborator ports.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::session::Session;

pub mod conversation;
pub mod events;
pub mod interpretation;
pub mod monologue;
pub mod rate_limit;
pub mod reveal;
pub mod scheduler;
pub mod session_flow;

/// Shared session handle.
///
/// Single-threaded cooperative model: the lock is only ever held for short
/// synchronous sections and never across an await point.
pub type SharedSession = Arc<Mutex<Session>>;
