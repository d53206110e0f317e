//! Tests for the phone verification service

#[cfg(test)]
mod service_tests;
