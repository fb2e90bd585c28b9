#[cfg(test)]
mod formula_tests;
#[cfg(test)]
mod calculator_tests;
