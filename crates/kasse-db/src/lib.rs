pub mod connection;
pub use connection::Connection;

pub mod results;
pub mod schema;

pub mod clubs;
pub mod members;
pub mod recurring_charges;
pub mod custom_charges;
