//! Internal test modules - whitebox tests with crate access
//!
//! These drive the [`crate::Controller`] over the scripted backend in
//! [`crate::test_harness`], deciding the order in which backend calls settle.
