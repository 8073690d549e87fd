// Operations
mod operations;
pub use operations::*;

mod errors;
pub use errors::*;

// Models
mod clubs;
pub use clubs::*;

mod members;
pub use members::*;

mod charges;
pub use charges::*;
