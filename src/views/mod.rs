pub mod app;
pub mod form;
pub mod login;
pub mod register;
pub mod dashboard;
pub mod booking_list;

pub use app::render_app;
pub use login::render_login;
pub use register::render_register;
pub use dashboard::render_dashboard;
pub use booking_list::render_booking_list;
