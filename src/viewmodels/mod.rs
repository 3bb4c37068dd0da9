// ============================================================================
// VIEWMODELS - Lógica de pantallas (sin DOM)
// ============================================================================

pub mod query_cache;
pub mod mutations;
pub mod booking_list_viewmodel;
pub mod auth_viewmodel;

pub use query_cache::{QueryCache, QueryKey, QueryStatus, BOOKINGS};
pub use mutations::Mutation;
pub use booking_list_viewmodel::{BookingListViewModel, ListState, MutationOutcome};
pub use auth_viewmodel::{FormStatus, LoginForm, LoginViewModel, RegisterForm, RegisterViewModel};
