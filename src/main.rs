mod components;

// Standard Library Imports
use std::{env, sync::Arc};

// External Crate Imports
use color_eyre::Result;
use dioxus::{
    desktop::{self, WindowBuilder},
    prelude::*,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// Local Crate Imports
use components::{Header, QueueList};
use queue_badge::{QueueState, queues::QueuesConfig};

const MAIN_CSS: Asset = asset!("/assets/main.css");
const FONT_AWESOME_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.7.0/css/font-awesome.min.css";

const DEFAULT_QUEUES: &str = include_str!("../assets/queues.json");

/// Every queue shown in the console, shared with the components through the root context
#[derive(Clone)]
struct Queues(Arc<[Arc<QueueState>]>);

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: FONT_AWESOME_CSS }

        Header {}

        main { class: "card",
            div { class: "card-body", QueueList {} }
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config = match env::args_os().nth(1) {
        Some(path) => QueuesConfig::from_path(path)?,
        None => QueuesConfig::from_reader(DEFAULT_QUEUES.as_bytes())?,
    };
    let queues: Arc<[_]> = config.into_queues().into();
    info!(queues = queues.len(), "starting the queue console");

    dioxus::LaunchBuilder::new()
        .with_cfg(
            desktop::Config::default()
                .with_menu(None)
                .with_window(WindowBuilder::new().with_title("Queue Badges")),
        )
        .with_context(Queues(queues))
        .launch(App);

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
