//! Drag-and-drop payload and drop-target rules.

use leptos::ev::DragEvent;
use thiserror::Error;

/// `DataTransfer` format carrying the dragged names.
pub const DRAG_DATA_FORMAT: &str = "text/plain";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failures reading or writing a drag payload.
pub enum DragPayloadError {
    /// The event carried no `DataTransfer`.
    #[error("drag event has no data transfer")]
    MissingTransfer,
    /// The browser refused to read or write the payload.
    #[error("data transfer failed: {0}")]
    Transfer(String),
    /// The payload was not a JSON array of names.
    #[error("malformed drag payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Names of the entries being dragged, all from the current directory.
pub struct DragPayload {
    /// Entry names.
    pub names: Vec<String>,
}

impl DragPayload {
    /// Payload for a single dragged entry.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
        }
    }

    /// Serializes the names as a JSON array.
    pub fn encode(&self) -> String {
        serde_json::Value::from(self.names.clone()).to_string()
    }

    /// Parses a JSON array of names. An empty array is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DragPayloadError::Malformed`] when `raw` is not a non-empty array of strings.
    pub fn decode(raw: &str) -> Result<Self, DragPayloadError> {
        let names: Vec<String> =
            serde_json::from_str(raw).map_err(|e| DragPayloadError::Malformed(e.to_string()))?;
        if names.is_empty() {
            return Err(DragPayloadError::Malformed("no entries".to_string()));
        }
        Ok(Self { names })
    }

    /// Stores the payload on a `dragstart` event.
    ///
    /// # Errors
    ///
    /// Returns [`DragPayloadError`] when the event has no writable `DataTransfer`.
    pub fn write_to(&self, ev: &DragEvent) -> Result<(), DragPayloadError> {
        let transfer = ev
            .data_transfer()
            .ok_or(DragPayloadError::MissingTransfer)?;
        transfer.set_effect_allowed("move");
        transfer
            .set_data(DRAG_DATA_FORMAT, &self.encode())
            .map_err(|e| DragPayloadError::Transfer(format!("{e:?}")))
    }

    /// Reads the payload from a `drop` event.
    ///
    /// # Errors
    ///
    /// Returns [`DragPayloadError`] when the transfer is missing or does not hold a payload.
    pub fn read_from(ev: &DragEvent) -> Result<Self, DragPayloadError> {
        let transfer = ev
            .data_transfer()
            .ok_or(DragPayloadError::MissingTransfer)?;
        let raw = transfer
            .get_data(DRAG_DATA_FORMAT)
            .map_err(|e| DragPayloadError::Transfer(format!("{e:?}")))?;
        Self::decode(&raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Tile facts that decide whether it may receive a drop.
pub struct DropCandidate {
    /// Tile is disabled.
    pub disabled: bool,
    /// Tile is a directory (the parent entry counts as one).
    pub is_directory: bool,
    /// Tile is the entry being dragged.
    pub dragged: bool,
    /// Tile is the selected entry.
    pub selected: bool,
    /// A drop callback is wired.
    pub has_drop_handler: bool,
}

/// Returns `true` when a tile should act as a drop target.
pub fn accepts_drop(candidate: DropCandidate) -> bool {
    !candidate.disabled
        && candidate.is_directory
        && !candidate.dragged
        && !candidate.selected
        && candidate.has_drop_handler
}
