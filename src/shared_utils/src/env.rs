use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// Reads an optional environment variable.
///
/// Unset and empty variables both read as `None`.
pub fn get_optional_env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn missing_variable_names_the_variable() {
        let name = "SHARED_UTILS_TEST_MISSING_VAR";
        unsafe { std::env::remove_var(name) };

        let err = get_env_var(name).unwrap_err();
        assert_eq!(err.0, name);
        assert_eq!(err.to_string(), format!("Missing environment variable: {name}"));
    }

    #[test]
    #[serial]
    fn present_variable_is_returned() {
        let name = "SHARED_UTILS_TEST_PRESENT_VAR";
        unsafe { std::env::set_var(name, "value") };

        assert_eq!(get_env_var(name).unwrap(), "value");
        assert_eq!(get_optional_env_var(name).as_deref(), Some("value"));

        unsafe { std::env::remove_var(name) };
    }

    #[test]
    #[serial]
    fn empty_optional_variable_reads_as_none() {
        let name = "SHARED_UTILS_TEST_EMPTY_VAR";
        unsafe { std::env::set_var(name, "") };

        assert!(get_optional_env_var(name).is_none());

        unsafe { std::env::remove_var(name) };
    }
}
