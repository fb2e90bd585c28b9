#[cfg(test)]
mod local_tests;
