pub mod client;
pub mod decoder;
pub mod request_builder;
pub mod transport;
