#[cfg(test)]
mod coordinate_tests;
