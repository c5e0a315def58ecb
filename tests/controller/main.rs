//! Store controller integration tests.

mod support;
mod lifecycle;
