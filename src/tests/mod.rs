mod run_tests;
mod utils;
