use std::{rc::Rc, sync::Arc};

use dioxus::prelude::*;
use tracing::error;

use queue_badge::{Badge, QueueStatus, StatusIndicator};

use super::queue_row::QueueProp;

#[component]
pub fn QueueBadge(queue: QueueProp) -> Element {
    let indicator = use_hook(|| {
        let indicator = StatusIndicator::attached(Arc::clone(&queue.0) as Arc<dyn QueueStatus>);
        let update = schedule_update();
        indicator.subscribe(Arc::new(move |_| update()));
        Rc::new(indicator)
    });

    let badge = match indicator.badge() {
        Ok(badge) => badge,
        Err(report) => {
            error!("{report:#}");
            return rsx! {};
        }
    };

    let Badge {
        loaded,
        tooltip_visible,
        warning_active,
        color,
        icon,
    } = badge;

    let tooltip_class = if tooltip_visible { "tooltip" } else { "" };
    let tooltip = badge.tooltip();
    let spin_class = if icon.spins() { "fa-spin" } else { "" };
    let icon_class = icon.class();
    let busy = !loaded;

    rsx! {
        span {
            class: "queue-badge badge-{color} {tooltip_class}",
            "data-tip": tooltip,
            "aria-busy": "{busy}",

            i { class: "fa fa-fw {icon_class} {spin_class}" }

            if warning_active {
                i {
                    class: "fa fa-fw fa-exclamation-triangle capacity-warning",
                    title: "Over capacity",
                }
            }
        }
    }
}
