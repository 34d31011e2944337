// Shared utilities module
pub mod errors;
pub mod identifiers;
pub mod logging;
pub mod paths;

pub use errors::*;
pub use identifiers::*;
pub use logging::*;
pub use paths::*;
