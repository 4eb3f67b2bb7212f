//! Integration tests for the layered configuration system

use tempfile::TempDir;
use viewgrid::config::{ConfigLoader, ViewGridConfig};

use crate::integration::test_utils::with_xdg_env;

#[test]
fn test_defaults_without_any_files() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config, ViewGridConfig::default());
    });
}

#[test]
fn test_xdg_config_path_uses_config_home() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let path = ConfigLoader::xdg_config_path().unwrap();
        assert_eq!(
            path,
            test_dir.path().join("xdg").join("viewgrid").join("config.toml")
        );
    });
}

#[test]
fn test_workspace_config_overrides_global_config() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let global = ConfigLoader::xdg_config_path().unwrap();
        std::fs::create_dir_all(global.parent().unwrap()).unwrap();
        std::fs::write(
            &global,
            r#"
[grid]
default_rows = 3
default_cols = 3
layout_type = "global"
"#,
        )
        .unwrap();

        let workspace_config_dir = workspace.path().join("config");
        std::fs::create_dir_all(&workspace_config_dir).unwrap();
        std::fs::write(
            workspace_config_dir.join("config.toml"),
            r#"
[grid]
default_cols = 2
"#,
        )
        .unwrap();

        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.grid.default_rows, 3);
        assert_eq!(config.grid.default_cols, 2);
        assert_eq!(config.grid.layout_type, "global");
    });
}

#[test]
fn test_environment_file_and_variables_win() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let workspace_config_dir = workspace.path().join("config");
        std::fs::create_dir_all(&workspace_config_dir).unwrap();
        std::fs::write(
            workspace_config_dir.join("config.toml"),
            "[grid]\ndefault_rows = 2\n",
        )
        .unwrap();
        std::fs::write(
            workspace_config_dir.join("reading.toml"),
            "[presentation]\nproviders = [\"segmentationPresentationId\"]\n",
        )
        .unwrap();

        std::env::set_var("VIEWGRID_ENV", "reading");
        std::env::set_var("VIEWGRID__GRID__DEFAULT_COLS", "4");

        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.grid.default_rows, 2);
        assert_eq!(config.grid.default_cols, 4);
        assert_eq!(
            config.presentation.providers,
            vec!["segmentationPresentationId"]
        );
    });
}

#[test]
fn test_load_from_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = ConfigLoader::load_from_file(&temp_dir.path().join("absent.toml"));
    assert!(result.is_err());
}

#[test]
fn test_invalid_values_fail_validation_not_loading() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_file,
        r#"
[grid]
default_rows = 0

[presentation]
providers = ["mysteryPresentationId"]
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
}
