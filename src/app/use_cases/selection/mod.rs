//! Use-Case-Funktionen für Selektion, Modus und Kamera-Fokus.

mod frame;
mod mode;
mod pick;

pub use frame::frame_selection;
pub use mode::{set_host_tool, set_mode};
pub use pick::{
    collapse_selection, select_all, select_node, select_tangent, select_up_handle, select_vertex,
};
