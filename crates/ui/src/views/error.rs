use dioxus::prelude::*;

use crate::views::layout::{Page, render_document};

#[component]
pub fn ErrorPage(status: u16, message: String) -> Element {
    rsx! {
        Page { heading: format!("Error {status}"),
            p { class: "error", "{message}" }
            a { href: "/", "Back" }
        }
    }
}

/// Renders a minimal error page.
#[must_use]
pub fn render_error(status: u16, message: impl Into<String>) -> String {
    render_document(VirtualDom::new_with_props(
        ErrorPage,
        ErrorPageProps {
            status,
            message: message.into(),
        },
    ))
}
