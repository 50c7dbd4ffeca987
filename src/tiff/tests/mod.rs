mod types_tests;
mod classic_tests;
