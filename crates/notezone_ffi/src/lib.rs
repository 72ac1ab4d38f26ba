//! Flutter-facing bridge crate for `notezone_core`.

pub mod api;
