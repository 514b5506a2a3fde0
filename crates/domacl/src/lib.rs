//! Top-level facade crate for domacl.
//!
//! Re-exports the policy primitives and the store so users can depend on a single crate.

pub mod core {
    pub use domacl_core::*;
}

pub mod store {
    pub use domacl_store::*;
}
