#[cfg(test)]
mod report_tests;
