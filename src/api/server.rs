use crate::api::routes;
use crate::config::SharedConfig;
use crate::error::Error;
use crate::message::Formatter;
use crate::notifier::DynNotifier;
use std::future::Future;
use std::net::TcpListener;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub formatter: Formatter,
    pub notifier: DynNotifier,
}

impl AppState {
    fn new(config: SharedConfig, notifier: DynNotifier) -> Result<Self, Error> {
        let formatter = config.formatter()?;
        Ok(Self {
            config,
            formatter,
            notifier,
        })
    }
}

/// Serve the relay API on [`Config::api_bind_addr`][`crate::config::Config::api_bind_addr`].
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if the config doesn't describe a usable formatter.
pub fn new(
    config: SharedConfig,
    notifier: DynNotifier,
) -> Result<impl Future<Output = hyper::Result<()>>, Error> {
    let addr = config.api_bind_addr;
    let state = AppState::new(config, notifier)?;
    Ok(axum::Server::bind(&addr).serve(routes::new(state).into_make_service()))
}

/// Serve the relay API on an already bound listener.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if the config doesn't describe a usable formatter, or
/// [`Error::IO`] if the listener can't be handed to the server.
pub fn from_listener(
    listener: TcpListener,
    config: SharedConfig,
    notifier: DynNotifier,
) -> Result<impl Future<Output = hyper::Result<()>>, Error> {
    let state = AppState::new(config, notifier)?;
    let server = axum::Server::from_tcp(listener)
        .map_err(|err| Error::IO(std::io::Error::new(std::io::ErrorKind::Other, err)))?;
    Ok(server.serve(routes::new(state).into_make_service()))
}
