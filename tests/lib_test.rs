//! Library integration tests.

use itop_boot::BootError;

#[test]
fn error_types_are_public() {
    let err = BootError::SessionNotFound {
        id: "sess_1_0000000000000000".into(),
    };
    assert!(err.to_string().contains("sess_1_0000000000000000"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> itop_boot::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use itop_boot::cli::{Cli, Commands};

    let cli = Cli::parse_from(["itop-boot", "resolve", "--switch-env", "test", "--json"]);

    if let Commands::Resolve(args) = cli.command {
        assert_eq!(args.switch_env.as_deref(), Some("test"));
        assert!(args.json);
    } else {
        panic!("Expected Resolve command");
    }
}

#[test]
fn request_params_parse_as_pairs() {
    use clap::Parser;
    use itop_boot::cli::{Cli, Commands};

    let cli = Cli::parse_from([
        "itop-boot",
        "request",
        "--param",
        "switch_env=test",
        "--header",
        "X-Combodo-Ajax=1",
    ]);

    if let Commands::Request(args) = cli.command {
        assert_eq!(args.params, vec![("switch_env".to_string(), "test".to_string())]);
        assert_eq!(args.headers.len(), 1);
    } else {
        panic!("Expected Request command");
    }
}

#[test]
fn settings_load_from_app_root() {
    use itop_boot::config::load_settings;
    use std::fs;

    let temp = tempfile::TempDir::new().unwrap();
    fs::write(
        temp.path().join("itop-boot.yml"),
        "default_environment: test\nmaintenance:\n  message: Back soon\n",
    )
    .unwrap();

    let settings = load_settings(temp.path(), None).unwrap();
    assert_eq!(settings.default_environment, "test");
    assert_eq!(settings.maintenance.message, "Back soon");
    assert_eq!(settings.config_dir, std::path::PathBuf::from("conf"));
}
