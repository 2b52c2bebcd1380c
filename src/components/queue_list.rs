use dioxus::prelude::*;

use crate::{Queues, components::queue_row::QueueRow};

#[component]
pub fn QueueList() -> Element {
    let Queues(queues) = use_context::<Queues>();

    rsx! {
        h2 { "Queues" }
        ol { class: "queue-list",

            for queue in queues.iter() {
                QueueRow { key: "{queue.name()}", queue: queue.clone() }
            }
        }
    }
}
