//! ConnectAPI search page controller (connectapi)
//!
//! The search/trending view-state machine behind the directory's search
//! page, plus the shell that issues backend requests for it.
//!
//! Pure core ([`state`], [`model`]) / impure shell ([`controller`],
//! [`backend::http`], [`identity::store`]).

pub mod backend;
pub mod command;
pub mod config;
pub mod controller;
pub mod identity;
pub mod logging;
pub mod model;
pub mod render;
pub mod state;

pub use controller::{Applied, Controller, ControllerOptions, Settlement};

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
