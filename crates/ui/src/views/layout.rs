use dioxus::prelude::*;

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 34rem; margin: 2rem auto; padding: 0 1rem; }
.stats dt { font-weight: bold; }
.stats dd { margin: 0 0 0.5rem 0; }
progress { width: 100%; height: 1.25rem; }
.combo { color: #b35c00; }
.presets { display: flex; gap: 0.5rem; margin-top: 1rem; }
.presets form { display: inline; }
";

/// Full HTML document around a page body.
#[component]
pub fn Page(heading: String, children: Element) -> Element {
    rsx! {
        html { lang: "en",
            head {
                meta { charset: "utf-8" }
                meta { name: "viewport", content: "width=device-width, initial-scale=1" }
                title { "{heading}" }
                style { {STYLE} }
            }
            body {
                h1 { "{heading}" }
                {children}
            }
        }
    }
}

/// Renders a root component and prefixes the doctype.
pub(crate) fn render_document(mut dom: VirtualDom) -> String {
    dom.rebuild_in_place();
    format!("<!DOCTYPE html>{}", dioxus_ssr::render(&dom))
}
