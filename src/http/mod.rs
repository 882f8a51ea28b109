//! HTTP protocol implementation.
//!
//! Just enough HTTP/1.1 to serve static files: one request line in, one
//! response out, then the connection is closed.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection handler implementing the state machine below
//! - **`parser`**: Splits the request line into method and target
//! - **`request`**: HTTP request representation
//! - **`resolve`**: Maps a target onto a file under the web root
//! - **`mime`**: MIME type detection based on file extensions
//! - **`response`**: HTTP response representation and the generic error page
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read one request line
//!        └──────┬──────┘
//!               │ Line parsed ──── malformed / EOF / timeout ───┐
//!               ▼                                               │
//!        ┌──────────────────┐                                   │
//!        │   Processing     │ ← 405 / 403 / 404 / 200           │
//!        └──────┬───────────┘                                   │
//!               │ Response ready                                │
//!               ▼                                               │
//!        ┌──────────────────┐                                   │
//!        │    Writing       │ ← Send response to client         │
//!        └──────┬───────────┘                                   │
//!               ▼                                               │
//!        ┌──────────────────┐                                   │
//!        │     Closed       │ ◄─────────────────────────────────┘
//!        └──────────────────┘
//! ```
//!
//! The stream is shut down on leaving the machine, whether it ended normally
//! or with an error.

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod resolve;
pub mod response;
pub mod writer;
