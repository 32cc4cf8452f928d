//! Use-Case-Funktionen für strukturelle Änderungen am Netzwerk.
//!
//! Aufgeteilt nach Operation:
//! - `add_node` - Node per Raycast-Treffer anlegen (mit Auto-Connect)
//! - `connect` - Selektierte Nodes mit einem Ziel verbinden
//! - `delete_nodes` - Selektierte Nodes löschen

mod add_node;
mod connect;
mod delete_nodes;

pub use add_node::add_node_at_position;
pub use connect::connect_selected_to;
pub use delete_nodes::delete_selected_nodes;
