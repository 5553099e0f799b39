//! Browser host, compiled with the `hydrate` feature.

mod dom;
mod host;
mod notify;

pub use dom::DomSurface;
pub use host::start;
