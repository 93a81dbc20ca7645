//! Modport Proxy
//!
//! The HTTP surface of the proxy, split into two routers:
//!
//! - the data plane ([`proxy_router`]): GET requests in the module
//!   wire-protocol grammar, served straight out of the blob store;
//! - the control plane ([`admin_router`]): POST requests that trigger a
//!   population through the [`modport_populate::Populator`].
//!
//! The data plane never writes; the control plane never reads back. Both
//! translate failures into protocol-correct status codes and plain-text
//! bodies.

mod admin;
mod error;
mod handler;

pub use admin::admin_router;
pub use error::ProxyError;
pub use handler::proxy_router;
