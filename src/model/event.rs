//! Realtime change events.

/// A change notification pushed by a realtime event source.
///
/// This is the message-passing form of the vendor payload
/// (`{eventType, new, old}`): inserts and updates carry the full new record,
/// deletes carry only the removed id.
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent<E> {
    /// Another client inserted a record.
    Insert(E),
    /// Another client updated a record.
    Update(E),
    /// Another client deleted the record with this id.
    Delete(String),
}

impl<E> RealtimeEvent<E> {
    /// Event kind as a static label, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
        }
    }
}
