use dioxus::prelude::*;

use queue_badge::Flag;

use super::queue_row::QueueProp;

#[component]
pub fn FlagToggle(queue: QueueProp, flag: Flag, checked: bool) -> Element {
    rsx! {
        label { class: "flag-toggle",
            input {
                r#type: "checkbox",
                checked,
                onchange: move |_| queue.0.toggle(flag),
            }
            {flag.name()}
        }
    }
}
