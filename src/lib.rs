//! Webserver - static file server
//!
//! Serves `.html`, `.css` and `.js` files from a single root directory,
//! one request per connection.

pub mod access_log;
pub mod config;
pub mod http;
pub mod server;
