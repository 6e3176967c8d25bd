#![warn(clippy::panic)]
#![warn(clippy::expect_used)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;

pub mod bipartite;
pub mod catalog;
pub mod colormap;
pub mod coords;
pub mod encode;
pub mod errors;
pub mod graph;
pub mod layout;
pub mod table;
pub mod types;
