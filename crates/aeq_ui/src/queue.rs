//! Render queue state model.
//!
//! Headless stand-in for the queue list widget: one row per item,
//! looked up by label. Labels are unique; re-adding a label replaces
//! its row in place.

use aeq_core::models::ItemStatus;

/// One row of the render queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRow {
    /// Item label, unique within the queue.
    pub label: String,
    /// Current pipeline status.
    pub status: ItemStatus,
    /// Completion percentage shown next to the status.
    pub percent: u32,
}

/// Render queue state.
#[derive(Debug, Default)]
pub struct QueueModel {
    rows: Vec<QueueRow>,
}

impl QueueModel {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row, replacing any existing row with the same label.
    pub fn add_item(&mut self, label: impl Into<String>, status: ItemStatus, percent: u32) {
        let label = label.into();
        if let Some(row) = self.rows.iter_mut().find(|r| r.label == label) {
            row.status = status;
            row.percent = percent;
        } else {
            self.rows.push(QueueRow {
                label,
                status,
                percent,
            });
        }
    }

    /// Update an existing row. Returns false if the label is unknown.
    pub fn update_item(&mut self, label: &str, status: ItemStatus, percent: u32) -> bool {
        match self.rows.iter_mut().find(|r| r.label == label) {
            Some(row) => {
                row.status = status;
                row.percent = percent;
                true
            }
            None => false,
        }
    }

    /// Remove a row. Returns false if the label is unknown.
    pub fn remove_item(&mut self, label: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.label != label);
        self.rows.len() != before
    }

    /// Remove every row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Look up a row by label.
    pub fn get(&self, label: &str) -> Option<&QueueRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// All rows in queue order.
    pub fn rows(&self) -> &[QueueRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
