pub mod io_utils;
pub mod logger_utils;
pub mod time_utils;

#[cfg(test)]
pub mod test_fixtures;
