//! Graph building: element tree -> fully linked record graph
//!
//! The loader walks the parsed document guided by the type catalog,
//! interning every identifier it meets so that forward and circular
//! references resolve to the same canonical record instance. Building a
//! graph is pure: nothing here touches durable state.

mod builder;
mod intern;

pub use builder::{LoadError, Loader, LoadOptions};
pub use intern::IdentityCache;
