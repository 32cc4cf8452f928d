//! Use-Case-Funktionen: je eine Funktion pro mutierender Session-Operation.
//!
//! Alle Funktionen nehmen den expliziten [`SessionState`](crate::app::SessionState)
//! und mutieren das Netzwerk ausschließlich über dessen Transaktions-Helfer.

pub mod editing;
pub mod extensions;
pub mod gesture;
pub mod history;
pub mod manipulation;
pub mod network;
pub mod selection;
