use std::env;
use std::str::FromStr;

pub mod abi;
pub mod tracing;

/// Read a required env variable. Empty values are treated as missing.
pub fn get_env(name: &str) -> anyhow::Result<String> {
    let value =
        env::var(name).map_err(|e| anyhow::format_err!("Failed to get env {name}: {e}"))?;
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("Env {name} is empty");
    }
    Ok(value.to_string())
}

/// Read an optional env variable, falling back to `default` when it is unset or can't be parsed.
pub fn get_env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| T::from_str(s.trim()).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::{get_env, get_env_or};
    use std::env;

    #[test]
    fn required_env_is_trimmed() -> anyhow::Result<()> {
        env::set_var("HELPER_TEST_REQUIRED", "  value \n");
        assert_eq!(get_env("HELPER_TEST_REQUIRED")?, "value");
        Ok(())
    }

    #[test]
    fn missing_or_empty_env_fails() {
        env::remove_var("HELPER_TEST_MISSING");
        assert!(get_env("HELPER_TEST_MISSING").is_err());

        env::set_var("HELPER_TEST_EMPTY", "   ");
        let err = get_env("HELPER_TEST_EMPTY").unwrap_err();
        assert!(err.to_string().contains("HELPER_TEST_EMPTY"));
    }

    #[test]
    fn optional_env_falls_back_to_default() {
        env::remove_var("HELPER_TEST_UNSET");
        assert_eq!(get_env_or("HELPER_TEST_UNSET", 60_u64), 60);

        env::set_var("HELPER_TEST_GARBAGE", "sixty");
        assert_eq!(get_env_or("HELPER_TEST_GARBAGE", 60_u64), 60);

        env::set_var("HELPER_TEST_SET", " 15 ");
        assert_eq!(get_env_or("HELPER_TEST_SET", 60_u64), 15);
    }
}
