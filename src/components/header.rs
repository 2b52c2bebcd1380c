use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    rsx! {
        div { class: "header",
            h1 { "Capacity Scheduler Queues" }
        }
    }
}
