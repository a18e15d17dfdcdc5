//! Port traits: the seams between the domain and the outside world.

pub mod config_port;
pub mod ledger_port;
pub mod plot_port;
