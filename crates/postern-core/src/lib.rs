//! Core Postern library (session contracts, session store, config, logging).

pub mod config;
pub mod logging;
pub mod routes;
pub mod session;
