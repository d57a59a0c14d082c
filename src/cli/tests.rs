//! Tests for argument parsing and flag translation.

#[cfg(test)]
mod cli_tests {
    use crate::cli::Cli;
    use clap::Parser;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["update-golang", "--help"]);
        assert!(cli.is_err()); // --help causes a special error

        let cli = Cli::try_parse_from(["update-golang"]).unwrap();
        assert!(cli.version.is_none());
        assert_eq!(cli.timeout, 300);
    }

    #[test]
    fn test_version_flag_pins_release() {
        let cli = Cli::try_parse_from(["update-golang", "-v", "go1.20.0"]).unwrap();
        assert_eq!(cli.version.as_deref(), Some("go1.20.0"));

        let cli = Cli::try_parse_from(["update-golang", "--version", "go1.21.3"]).unwrap();
        assert_eq!(cli.upgrade_config().version.as_deref(), Some("go1.21.3"));
    }

    #[test]
    fn test_version_flag_requires_value() {
        assert!(Cli::try_parse_from(["update-golang", "--version"]).is_err());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["update-golang", "--verbose", "--quiet"]).is_err());
    }

    #[test]
    fn test_build_config_log_levels() {
        let cli = Cli::try_parse_from(["update-golang", "--verbose"]).unwrap();
        assert_eq!(cli.build_config().log_level, "debug");

        let cli = Cli::try_parse_from(["update-golang", "-q"]).unwrap();
        let config = cli.build_config();
        assert_eq!(config.log_level, "error");
        assert!(config.quiet);
        assert!(!cli.upgrade_config().show_progress);

        let cli = Cli::try_parse_from(["update-golang"]).unwrap();
        assert_eq!(cli.build_config().log_level, "info");
    }

    #[test]
    fn test_upgrade_config_from_flags() {
        let cli = Cli::try_parse_from([
            "update-golang",
            "--keep-archive",
            "--timeout",
            "45",
            "--skip-privilege-check",
            "--no-progress",
            "--install-root",
            "/opt",
            "--download-dir",
            "/tmp/go-downloads",
        ])
        .unwrap();

        let config = cli.upgrade_config();
        assert!(config.keep_archive);
        assert_eq!(config.network_timeout, Duration::from_secs(45));
        assert!(!config.check_privileges);
        assert!(!config.show_progress);
        assert_eq!(config.install_dir(), PathBuf::from("/opt/go"));
        assert_eq!(config.download_dir, PathBuf::from("/tmp/go-downloads"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["update-golang", "--timeout", "0"]).is_err());
    }
}
