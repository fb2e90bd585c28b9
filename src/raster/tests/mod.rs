#[cfg(test)]
mod grid_tests;
#[cfg(test)]
mod resample_tests;
