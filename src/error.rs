//! Errors reported by the [`OrderedMap`][crate::OrderedMap] operations.
//!
//! Every error is tied to a violated precondition and is raised before the
//! map is touched, so a failed call leaves the map exactly as it was.

// `error_chain!` generates undocumented items (`ResultExt`, `ErrorKind::Msg`).
#![allow(missing_docs)]

error_chain! {
    errors {
        #[doc = "The key is not ordered against itself or against a stored key (e.g. `f64::NAN`)."]
        InvalidKey {
            description("invalid key"),
            display("key cannot be ordered"),
        }

        #[doc = "`insert` was called with a key that is already present."]
        DuplicateKey {
            description("duplicate key"),
            display("key already in map"),
        }

        #[doc = "`get`, `put` or `remove` was called with a key that is not present."]
        KeyNotFound {
            description("key not found"),
            display("cannot find key"),
        }
    }
}
