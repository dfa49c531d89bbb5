pub mod broadcast;
pub mod health;
pub mod page;
pub mod panel;

pub use broadcast::*;
pub use health::*;
pub use page::*;
pub use panel::*;
