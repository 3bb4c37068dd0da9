// ============================================================================
// BOOKING LIST VIEW - Loading / error / vacío / tarjetas
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::Booking;
use crate::viewmodels::{BookingListViewModel, ListState};

pub fn render_booking_list(vm: &Rc<BookingListViewModel>) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?.class("booking-list").build();

    match vm.list_state() {
        ListState::Loading => {
            let spinner = ElementBuilder::new("div")?
                .class("spinner")
                .attr("aria-busy", "true")?
                .text("Loading bookings...")
                .build();
            append_child(&container, &spinner)?;
        }
        ListState::Error(message) => {
            let error = ElementBuilder::new("div")?
                .class("alert alert-error")
                .attr("role", "alert")?
                .text(&message)
                .build();
            let retry = ElementBuilder::new("button")?
                .class("btn-outline btn-sm")
                .attr("type", "button")?
                .text("Retry")
                .build();
            {
                let vm = vm.clone();
                on_click(&retry, move |_| {
                    let vm = vm.clone();
                    spawn_local(async move {
                        vm.load(true).await;
                    });
                })?;
            }
            append_child(&container, &error)?;
            append_child(&container, &retry)?;
        }
        ListState::Empty(message) => {
            let empty = ElementBuilder::new("div")?.class("empty-state").text(message).build();
            append_child(&container, &empty)?;
        }
        ListState::Items(bookings) => {
            for booking in bookings.iter() {
                append_child(&container, &render_booking_card(vm, booking)?)?;
            }
        }
    }

    Ok(container)
}

fn labeled(label: &str, value: &str, value_class: &str) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("booking-field")
        .children([
            ElementBuilder::new("span")?.class("field-label").text(label).build(),
            ElementBuilder::new("span")?.class(value_class).text(value).build(),
        ])
        .map(ElementBuilder::build)
}

fn render_booking_card(vm: &Rc<BookingListViewModel>, booking: &Booking) -> Result<Element, JsValue> {
    let badge = ElementBuilder::new("span")?
        .class(&format!("badge badge-{}", booking.status.badge_color()))
        .text(&booking.status.label())
        .build();
    let status = ElementBuilder::new("div")?
        .class("booking-field")
        .children([
            ElementBuilder::new("span")?.class("field-label").text("Status").build(),
            badge,
        ])?
        .build();

    let pending = vm.is_pending(booking.id);
    let button = ElementBuilder::new("button")?
        .class(if pending { "btn-primary btn-sm btn-loading" } else { "btn-primary btn-sm" })
        .attr("type", "button")?
        .disabled(pending)?
        .text("Request Financing")
        .build();
    {
        let vm = vm.clone();
        let booking_id = booking.id;
        on_click(&button, move |_| {
            let vm = vm.clone();
            spawn_local(async move {
                vm.request_financing(booking_id).await;
            });
        })?;
    }

    let card = ElementBuilder::new("article")?
        .class("booking-card")
        .attr("data-booking-id", &booking.id.to_string())?
        .children([
            labeled("Reference Number", &booking.reference_number, "field-value strong")?,
            labeled("Carrier", &booking.carrier_name, "field-value")?,
            labeled("Client ID", &booking.client_id.to_string(), "field-value")?,
            status,
            button,
        ])?
        .build();

    if let Some(message) = vm.mutation_error(booking.id) {
        let error = ElementBuilder::new("p")?
            .class("inline-error")
            .attr("role", "alert")?
            .text(&message)
            .build();
        append_child(&card, &error)?;
    }

    Ok(card)
}
