pub mod batch;
pub mod messages;
pub mod responses;

pub use batch::*;
pub use messages::*;
pub use responses::*;
