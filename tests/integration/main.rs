//! Integration test harness; see the individual modules for run instructions.

mod api_tests;
mod disposition_tests;
