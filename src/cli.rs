//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::ObjectKind;

/// Top-level CLI parser for `registry-idgen`.
#[derive(Debug, Parser)]
#[command(
    name = "registry-idgen",
    version,
    about = "Assign consumer and context identifiers to new registry objects"
)]
pub struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show which identifier, if any, a primary type receives.
    Classify {
        /// Primary type URI.
        primary_type: String,
    },
    /// Print freshly generated identifiers.
    Generate {
        /// Number of identifiers to print.
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// List the recognized primary types.
    Types,
    /// Create an object in a store and run the creation callback on it.
    Create {
        /// Store file (defaults to the configured store).
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
        /// URI of the new object (generated when omitted).
        #[arg(long)]
        uri: Option<String>,
        /// Primary type of the new object.
        #[arg(long = "type", value_name = "PRIMARY_TYPE")]
        primary_type: Option<String>,
        /// Runtime kind of the new object.
        #[arg(long, default_value_t = ObjectKind::Generic)]
        kind: ObjectKind,
        /// Display name of the new object.
        #[arg(long)]
        name: Option<String>,
    },
    /// Print an object from a store.
    Show {
        /// Store file (defaults to the configured store).
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
        /// URI of the object.
        #[arg(long)]
        uri: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use crate::model::ObjectKind;
    use clap::Parser;

    #[test]
    fn parses_classify_subcommand() {
        let cli = Cli::parse_from(["registry-idgen", "classify", "urn:x"]);
        let Command::Classify { primary_type } = cli.command else {
            panic!("expected classify");
        };
        assert_eq!(primary_type, "urn:x");
    }

    #[test]
    fn create_defaults_to_generic_kind() {
        let cli = Cli::parse_from(["registry-idgen", "create", "--type", "t"]);
        let Command::Create { kind, primary_type, uri, store, .. } = cli.command else {
            panic!("expected create");
        };
        assert_eq!(kind, ObjectKind::Generic);
        assert_eq!(primary_type.as_deref(), Some("t"));
        assert!(uri.is_none());
        assert!(store.is_none());
    }

    #[test]
    fn create_accepts_document_kind_and_global_config() {
        let cli = Cli::parse_from([
            "registry-idgen",
            "create",
            "--kind",
            "policy-document",
            "--config",
            "c.yaml",
        ]);
        assert!(matches!(cli.command, Command::Create { kind: ObjectKind::PolicyDocument, .. }));
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("c.yaml")));
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["registry-idgen", "create", "--kind", "folder"]).is_err());
    }
}
