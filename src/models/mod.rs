// ============================================================================
// MODELS - Estructuras compartidas con el backend
// ============================================================================

pub mod auth;
pub mod booking;
pub mod finance;
pub mod session;

pub use auth::*;
pub use booking::*;
pub use finance::*;
pub use session::*;
