use std::{sync::Arc, time::Duration};

use dioxus::prelude::*;
use tokio::time::sleep;
use tracing::info;

use queue_badge::{Flag, Flags, QueueState, QueueStatus};

use super::queue_row::QueueProp;

const SAVE_DURATION: Duration = Duration::from_millis(1500);

#[component]
pub fn SaveButton(queue: QueueProp, saving: bool) -> Element {
    rsx! {
        button {
            class: "btn",
            disabled: saving,
            onclick: move |_| {
                let queue = Arc::clone(&queue.0);
                spawn(async move { save(&queue).await });
            },

            "Save"
        }
    }
}

// Stands in for the persistence layer: flips `isSaving` on, waits, then leaves the queue clean
async fn save(queue: &QueueState) {
    info!(queue = queue.name(), "saving queue");
    queue.set(Flag::Saving, true);

    sleep(SAVE_DURATION).await;

    queue.set_flags(Flags {
        is_saving: false,
        is_any_dirty: false,
        is_new_queue: false,
        ..queue.flags()
    });
    info!(queue = queue.name(), "queue saved");
}
