//! End-to-end tests: spawn the server on 127.0.0.1:0 and call it over HTTP.

mod analyze;
mod common;
mod health;
