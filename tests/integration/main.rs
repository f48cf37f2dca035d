//! Integration tests

mod api_tests;
mod common;
mod pipeline_tests;
