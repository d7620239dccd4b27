pub mod constants;
pub mod dates;
pub mod ids;
pub mod types;
pub mod update_builder;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
