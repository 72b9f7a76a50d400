pub mod progress_queue;
pub mod reactive_cell;
