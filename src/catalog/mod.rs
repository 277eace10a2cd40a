//! Interface catalog wiring.
//!
//! `InterfaceCatalog` records every discovered interface and where its page
//! will be written. It is built once, before rendering, and handed to every
//! render call as a read-only reference. `OutputLocation` carries the
//! `<package>/<kind-dir>/<Name>.html` layout and the relative-path arithmetic
//! between pages.

pub mod index;
pub mod location;

pub use index::{InterfaceCatalog, InterfaceId};
pub use location::{OutputLocation, relative_path};
