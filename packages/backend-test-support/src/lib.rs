//! Test support utilities shared by the backend's unit and integration tests.

pub mod logging;
