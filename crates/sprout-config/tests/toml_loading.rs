//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use sprout_config::{PROJECT_CONFIG_PATH, SproutConfig};

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[analysis]
max_function_length = 80
check_docstrings = false

[generation]
default_count = 6
seed = 42
",
        )?;

        let config: SproutConfig = Figment::from(Serialized::defaults(SproutConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.analysis.max_function_length, 80);
        assert!(!config.analysis.check_docstrings);
        assert_eq!(config.generation.default_count, 6);
        assert_eq!(config.generation.seed, Some(42));
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[generation]\nseed = 7\n")?;

        let config: SproutConfig = Figment::from(Serialized::defaults(SproutConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.generation.seed, Some(7));
        assert_eq!(config.generation.default_count, 3);
        assert_eq!(config.analysis.max_function_length, 50);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sprout")?;
        jail.create_file(PROJECT_CONFIG_PATH, "[analysis]\nmax_function_length = 25\n")?;

        let config = SproutConfig::load().expect("config loads");
        assert_eq!(config.analysis.max_function_length, 25);
        Ok(())
    });
}

#[test]
fn invalid_value_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sprout")?;
        jail.create_file(PROJECT_CONFIG_PATH, "[generation]\ndefault_count = 0\n")?;

        let err = SproutConfig::load().unwrap_err();
        assert!(err.to_string().contains("default_count"), "{err}");
        Ok(())
    });
}
