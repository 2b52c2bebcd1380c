use std::sync::Arc;

use dioxus::prelude::*;

use queue_badge::{Flag, QueueState, QueueStatus};

use crate::components::{flag_toggle::FlagToggle, status_badge::QueueBadge, save_button::SaveButton};

#[derive(Clone)]
pub struct QueueProp(pub Arc<QueueState>);

#[component]
pub fn QueueRow(#[props(into)] queue: QueueProp) -> Element {
    // NOTE: Re-render the row (and so its toggles) on any flag change; the badge keeps itself current separately
    let subscription = use_hook(|| {
        let update = schedule_update();
        queue.0.subscribe(Arc::new(move |_| update()))
    });
    use_drop({
        let queue = Arc::clone(&queue.0);
        move || queue.unsubscribe(subscription)
    });

    let flags = queue.0.flags();
    let name = queue.0.name().to_owned();

    rsx! {
        li { class: "queue-row",
            QueueBadge { queue: queue.clone() }
            div { class: "queue-name", {name} }

            for flag in Flag::ALL {
                FlagToggle {
                    queue: queue.clone(),
                    flag,
                    checked: flags.get(flag),
                }
            }

            SaveButton { queue: queue.clone(), saving: flags.is_saving }
        }
    }
}

impl From<Arc<QueueState>> for QueueProp {
    fn from(value: Arc<QueueState>) -> Self {
        Self(value)
    }
}

// NOTE: Two props are equal only if they point at the same `QueueState`. The flags inside can change without the prop
// changing, so anything rendered from them has to arrive as a separate prop (or subscribe itself)
impl PartialEq for QueueProp {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
