mod flag_toggle;
mod header;
mod queue_list;
mod queue_row;
mod save_button;
mod status_badge;

pub use header::Header;
pub use queue_list::QueueList;
