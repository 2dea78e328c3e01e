pub mod chassis;
pub mod credentials;
pub mod environment;
pub mod nodes;
pub mod ports;
