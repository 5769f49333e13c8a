//! Rule catalogs.
//!
//! Each locale lives in its own module and exposes a `catalog()` that builds
//! its ordered rule list. The engine knows nothing about any of them.

pub mod en;
