pub mod ip;
pub mod project;
pub mod scan;
pub mod worker;

pub use ip::*;
pub use project::*;
pub use scan::*;
pub use worker::*;
