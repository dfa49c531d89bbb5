//! The keyword results panel: view model, panel state and HTML adapter.

pub mod html;
pub mod results_panel;
pub mod view;

pub use results_panel::*;
pub use view::*;
