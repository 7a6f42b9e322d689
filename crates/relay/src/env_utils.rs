//! Helpers for loading configuration from the environment.
use crate::ConfigError;
use std::{env, str::FromStr};

/// Load a variable from the environment
pub fn load_string(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::missing(key))
}

/// Load a variable from the environment
pub fn load_string_opt(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Load a variable from the environment
pub fn load_u64_opt(key: &str) -> Result<Option<u64>, ConfigError> {
    load_string_opt(key).map(|val| val.parse::<u64>()).transpose().map_err(Into::into)
}

/// Load a variable from the environment
pub fn load_url_opt(key: &str) -> Result<Option<reqwest::Url>, ConfigError> {
    load_string_opt(key).map(|val| reqwest::Url::parse(&val)).transpose().map_err(Into::into)
}

/// Load a variable from the environment and parse it with [`FromStr`].
pub fn load_parsed_opt<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    ConfigError: From<T::Err>,
{
    load_string_opt(key).map(|val| val.parse::<T>()).transpose().map_err(Into::into)
}
