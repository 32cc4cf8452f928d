//! Bündelt die Mutationen einer Geste zu genau einem Undo-Eintrag.
//!
//! Die Undo-Mechanik selbst liegt in [`EditHistory`]; der Coalescer
//! entscheidet nur, wann eine Folge von Mutationen versiegelt wird.

use super::history::{EditHistory, Snapshot};
use crate::core::SplineNetwork;
use std::sync::Arc;
use thiserror::Error;

/// ID einer laufenden Zeiger-Geste.
pub type GestureId = u64;

/// Fehlbenutzung der Transaktions-API (Programmierfehler).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// Es ist bereits eine Transaktion einer anderen Geste bzw. eine diskrete Transaktion offen
    #[error("Transaktion '{open}' ist bereits offen, '{requested}' abgelehnt")]
    AlreadyOpen { open: String, requested: String },
    /// Es ist keine Transaktion offen
    #[error("keine Transaktion offen")]
    NotOpen,
}

#[derive(Debug)]
struct OpenTransaction {
    gesture: Option<GestureId>,
    before: Snapshot,
}

/// Öffnet Transaktionen lazy und versiegelt sie zu einem History-Eintrag.
#[derive(Debug, Default)]
pub struct TransactionCoalescer {
    open: Option<OpenTransaction>,
    last_gesture: GestureId,
}

impl TransactionCoalescer {
    /// Erstellt einen Coalescer ohne offene Transaktion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vergibt eine neue Gesten-ID.
    pub fn next_gesture(&mut self) -> GestureId {
        self.last_gesture += 1;
        self.last_gesture
    }

    /// Prüft ob eine Transaktion offen ist
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Geste der offenen Transaktion (None = keine oder diskret)
    pub fn open_gesture(&self) -> Option<GestureId> {
        self.open.as_ref().and_then(|t| t.gesture)
    }

    /// Beschriftung der offenen Transaktion
    pub fn open_label(&self) -> Option<&str> {
        self.open.as_ref().map(|t| t.before.label.as_str())
    }

    /// Öffnet eine Transaktion und merkt sich den Zustand vor der Mutation.
    ///
    /// Innerhalb derselben Geste ist der Aufruf idempotent (`Ok(false)`, kein
    /// neuer Snapshot). `gesture = None` steht für eine diskrete Aktion, die
    /// nie mit anderen verschmilzt.
    pub fn begin(
        &mut self,
        label: &str,
        gesture: Option<GestureId>,
        current: &Arc<SplineNetwork>,
    ) -> Result<bool, TransactionError> {
        match &self.open {
            None => {
                self.open = Some(OpenTransaction {
                    gesture,
                    before: Snapshot::new(current, label),
                });
                log::debug!("Transaktion '{}' geöffnet", label);
                Ok(true)
            }
            Some(open) if gesture.is_some() && open.gesture == gesture => Ok(false),
            Some(open) => Err(TransactionError::AlreadyOpen {
                open: open.before.label.clone(),
                requested: label.to_string(),
            }),
        }
    }

    /// Verwirft die offene Transaktion ohne History-Eintrag.
    ///
    /// Nur nach externem Undo/Redo, wenn der Host den Zustand bereits ersetzt hat.
    pub fn abandon(&mut self) -> bool {
        self.open.take().is_some()
    }

    /// Versiegelt die offene Transaktion als genau einen Undo-Eintrag.
    ///
    /// Gibt die Beschriftung der versiegelten Transaktion zurück.
    pub fn commit(&mut self, history: &mut EditHistory) -> Result<String, TransactionError> {
        let open = self.open.take().ok_or(TransactionError::NotOpen)?;
        let label = open.before.label.clone();
        history.record_snapshot(open.before);
        log::debug!("Transaktion '{}' versiegelt", label);
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> Arc<SplineNetwork> {
        Arc::new(SplineNetwork::default())
    }

    #[test]
    fn begin_within_same_gesture_is_idempotent() {
        let mut coalescer = TransactionCoalescer::new();
        let mut history = EditHistory::new_with_capacity(10);
        let current = network();
        let gesture = coalescer.next_gesture();

        assert_eq!(coalescer.begin("Nodes Moved", Some(gesture), &current), Ok(true));
        assert_eq!(coalescer.begin("Nodes Moved", Some(gesture), &current), Ok(false));
        assert_eq!(coalescer.begin("Nodes Moved", Some(gesture), &current), Ok(false));

        assert_eq!(coalescer.commit(&mut history).as_deref(), Ok("Nodes Moved"));
        assert_eq!(history.undo_len(), 1);
        assert!(!coalescer.is_open());
    }

    #[test]
    fn second_top_level_transaction_is_rejected() {
        let mut coalescer = TransactionCoalescer::new();
        let current = network();
        let first = coalescer.next_gesture();
        let second = coalescer.next_gesture();

        assert_eq!(coalescer.begin("A", Some(first), &current), Ok(true));
        assert!(matches!(
            coalescer.begin("B", Some(second), &current),
            Err(TransactionError::AlreadyOpen { .. })
        ));
        assert!(matches!(
            coalescer.begin("C", None, &current),
            Err(TransactionError::AlreadyOpen { .. })
        ));
        assert_eq!(coalescer.open_label(), Some("A"));
    }

    #[test]
    fn discrete_transactions_never_merge() {
        let mut coalescer = TransactionCoalescer::new();
        let current = network();
        assert_eq!(coalescer.begin("Remove Node", None, &current), Ok(true));
        assert!(coalescer.begin("Remove Node", None, &current).is_err());
    }

    #[test]
    fn commit_without_open_transaction_fails() {
        let mut coalescer = TransactionCoalescer::new();
        let mut history = EditHistory::new_with_capacity(10);
        assert_eq!(coalescer.commit(&mut history), Err(TransactionError::NotOpen));
        assert!(!history.can_undo());
    }
}
