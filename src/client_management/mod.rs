use std::{fmt::Debug, future::Future};

use log::warn;

use crate::DataProvider;
pub mod rest_api;

/// Hosts the sessions of a [`DataProvider`] on a socket.
pub trait Server<T: DataProvider + Default>: Sized {
    type ErrorKind: Debug;
    const DEFAULT_PORT: u16 = 3000;
    const DEFAULT_HOST: &'static str = "127.0.0.1";
    /// environment variable holding the host to bind to
    const HOST_VAR: &'static str;
    /// environment variable holding the port to bind to
    const PORT_VAR: &'static str;

    fn new(host: String, port: u16, data_provider: T) -> Self;

    fn start(&mut self) -> impl Future<Output = Result<(), Self::ErrorKind>> + Send;

    fn get_address(&self) -> String;

    fn with_data_provider(data_provider: T) -> Self {
        Self::new(
            Self::DEFAULT_HOST.to_string(),
            Self::DEFAULT_PORT,
            data_provider,
        )
    }

    // loads environment variables or uses default values if not set
    fn from_env(data_provider: T) -> Self {
        let host = std::env::var(Self::HOST_VAR).unwrap_or_else(|_| Self::DEFAULT_HOST.to_string());
        let port = match std::env::var(Self::PORT_VAR) {
            Ok(port) => port.parse::<u16>().unwrap_or_else(|_| {
                warn!(
                    "{}={:?} is not a port, using {}",
                    Self::PORT_VAR,
                    port,
                    Self::DEFAULT_PORT
                );
                Self::DEFAULT_PORT
            }),
            Err(_) => Self::DEFAULT_PORT,
        };
        Self::new(host, port, data_provider)
    }
}
