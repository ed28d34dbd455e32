mod core;
mod interface;
mod printer;

pub use self::core::*;
