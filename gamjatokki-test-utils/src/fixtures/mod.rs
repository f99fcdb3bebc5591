//! Test fixture modules for entity creation.
//!
//! The `factory` submodule provides `mock_*` constructors that return
//! entities and drafts populated with standard test data, so tests only
//! spell out the fields they actually assert on.

pub mod factory;
