//! Builder module for `argot`.
//! See [documentation root](https://docs.rs/argot/latest/argot/index.html) for full details.
#![deny(missing_docs)]
mod application;
mod binder;
mod definition;
mod input;
mod model;
mod specification;
mod value;

pub use application::*;
pub use binder::*;
pub use definition::*;
pub use input::tokenize;
pub use model::*;
pub use specification::*;
pub use value::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
