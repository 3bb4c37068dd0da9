// ============================================================================
// DASHBOARD VIEW - Cabecera con logout + sección de bookings
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{on_click, ElementBuilder};
use crate::state::AppState;
use crate::utils::constants::{APP_TAGLINE, APP_TITLE};
use crate::views::render_booking_list;

pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [DASHBOARD] render_dashboard()");

    let logout_btn = ElementBuilder::new("button")?
        .class("btn-outline btn-danger")
        .attr("type", "button")?
        .text("Logout")
        .build();
    {
        let state = state.clone();
        on_click(&logout_btn, move |_| state.logout())?;
    }

    let title = ElementBuilder::new("h1")?
        .class("brand-title")
        .text(&format!("{} Dashboard", APP_TITLE))
        .build();
    let header = ElementBuilder::new("header")?
        .class("app-header")
        .children([title, logout_btn])?
        .build();

    let welcome = ElementBuilder::new("section")?
        .class("welcome")
        .children([
            ElementBuilder::new("h2")?.text(&format!("Welcome to {}", APP_TITLE)).build(),
            ElementBuilder::new("p")?
                .text(&format!("{} - Manage your bookings and financing below.", APP_TAGLINE))
                .build(),
        ])?
        .build();

    let list = match state.booking_list() {
        Some(vm) => render_booking_list(&vm)?,
        None => ElementBuilder::new("div")?.class("booking-list").build(),
    };
    let bookings = ElementBuilder::new("section")?
        .class("bookings-card")
        .children([ElementBuilder::new("h3")?.text("Your Bookings").build(), list])?
        .build();

    let main = ElementBuilder::new("main")?
        .class("dashboard-content")
        .children([welcome, bookings])?
        .build();

    ElementBuilder::new("div")?
        .class("dashboard")
        .children([header, main])
        .map(ElementBuilder::build)
}
