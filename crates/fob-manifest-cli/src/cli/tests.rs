#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command, ManifestFormatArg, OutsideRootArg};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_inject_defaults() {
        let cli = Cli::parse_from(["fob-manifest", "inject", "src/page.tsx"]);
        let Command::Inject(args) = cli.command else {
            panic!("expected inject");
        };
        assert_eq!(args.file, PathBuf::from("src/page.tsx"));
        assert!(args.out.is_none());
        assert!(!args.map);
        assert!(!args.check);
        assert!(cli.config.format.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "fob-manifest",
            "graph",
            "page.tsx",
            "--pretty",
            "--format",
            "flat",
            "--outside-root",
            "omit",
            "--source-dir",
            "app",
            "--line-counts",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config.format, Some(ManifestFormatArg::Flat));
        assert_eq!(cli.config.outside_root, Some(OutsideRootArg::Omit));
        assert_eq!(cli.config.source_dir.as_deref(), Some("app"));
        assert!(cli.config.line_counts);
        assert!(matches!(cli.command, Command::Graph(ref args) if args.pretty));
    }

    #[test]
    fn test_map_requires_out() {
        let result = Cli::try_parse_from(["fob-manifest", "inject", "page.tsx", "--map"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "fob-manifest",
            "inject",
            "page.tsx",
            "--map",
            "--out",
            "dist/page.tsx",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Inject(ref args) if args.map));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["fob-manifest", "-q", "-v", "graph", "page.tsx"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result = Cli::try_parse_from(["fob-manifest", "graph", "page.tsx", "--format", "tree"]);
        assert!(result.is_err());
    }
}
