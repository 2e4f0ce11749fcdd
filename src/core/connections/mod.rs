pub mod connection;
pub mod connection_validator;
pub mod port_validator;

pub use connection::{Connection, FanoutEntry};
pub use connection_validator::ConnectionValidator;
pub use port_validator::PortValidator;
