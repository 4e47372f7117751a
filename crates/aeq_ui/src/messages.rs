//! Messages driving the harness application.

use aeq_core::links::MimeData;
use aeq_core::sim::SimEvent;

/// Messages for the harness application.
#[derive(Debug)]
pub enum AppMsg {
    /// Fill the queue with the configured mock items.
    LoadQueue,
    /// Start simulating a render of the loaded items.
    Render,
    /// A drag moved over the queue.
    DragEntered(MimeData),
    /// A payload was dropped onto the queue.
    Dropped(MimeData),
    /// Event from the running simulation.
    Sim(SimEvent),
}
