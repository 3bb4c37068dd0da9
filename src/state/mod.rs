// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod session_store;
pub mod app_state;

pub use reactivity::*;
pub use session_store::*;
pub use app_state::*;
