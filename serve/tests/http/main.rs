//! HTTP end-to-end tests: a real server on 127.0.0.1:0 over a temp store, driven with reqwest.

mod common;
mod list;
mod load;
mod save;
