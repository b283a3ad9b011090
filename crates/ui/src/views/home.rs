use dioxus::prelude::*;

use crate::views::layout::{Page, render_document};
use crate::vm::ProgressionVm;

/// Amounts offered as one-click buttons.
pub const PRESET_AMOUNTS: [u32; 4] = [1, 10, 100, 1000];

#[component]
pub fn IndexPage(vm: ProgressionVm) -> Element {
    let combo = vm.combo();

    rsx! {
        Page { heading: "Clicker".to_string(),
            p { class: "player", "{vm.username}" }

            dl { class: "stats",
                dt { "Level" }
                dd { "{vm.level}" }

                dt { "XP" }
                dd { "{vm.xp_str} / {vm.xp_required_str} ({vm.percent_str}%)" }

                dt { "Total XP" }
                dd { "{vm.total_xp_str}" }
            }

            progress { max: "100", value: "{vm.percent}" }

            if combo > 1 {
                p { class: "combo",
                    "Combo x{combo} (repeat x{vm.multiplier}, speed x{vm.time_multiplier}, last {vm.last_amount_str})"
                }
            }

            form { method: "post", action: "/add_xp",
                input {
                    id: "amount",
                    r#type: "number",
                    name: "amount",
                    min: "0",
                    step: "any",
                    value: "1",
                    placeholder: "Amount",
                }
                button { r#type: "submit", "Add XP" }
            }

            div { class: "presets",
                for amount in PRESET_AMOUNTS {
                    form { method: "post", action: "/add_xp",
                        input { r#type: "hidden", name: "amount", value: "{amount}" }
                        button { r#type: "submit", "+{amount}" }
                    }
                }
            }
        }
    }
}

/// Renders the progression page as a complete HTML document.
#[must_use]
pub fn render_index(vm: ProgressionVm) -> String {
    render_document(VirtualDom::new_with_props(IndexPage, IndexPageProps { vm }))
}
