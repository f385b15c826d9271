//! Command line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Recreate a container in place from a possibly-updated image.
#[derive(Debug, Parser)]
#[command(name = "recreate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Replace a running container with one built from an updated image, \
             keeping its configuration, links, and name"
)]
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Container ID or name to recreate
    pub container_id: String,

    /// Image tag to use (defaults to the container's current tag)
    pub image_tag: Option<String>,

    /// Pull the image from its registry before recreating
    #[arg(short = 'p', long = "pull")]
    pub pull: bool,

    /// Delete the old container after a successful swap (accepted but not
    /// enacted; the old container is always kept as a fallback)
    #[arg(short = 'd', long = "delete")]
    pub delete: bool,

    /// Registry configuration file (defaults to ~/.recreate.json)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_and_flags() {
        let args = Args::parse_from(["recreate", "-p", "abcd1234", "v2"]);
        assert_eq!(args.container_id, "abcd1234");
        assert_eq!(args.image_tag.as_deref(), Some("v2"));
        assert!(args.pull);
        assert!(!args.delete);
    }

    #[test]
    fn test_tag_is_optional() {
        let args = Args::parse_from(["recreate", "abcd1234"]);
        assert_eq!(args.container_id, "abcd1234");
        assert!(args.image_tag.is_none());
    }

    #[test]
    fn test_config_override() {
        let args = Args::parse_from(["recreate", "--config", "/tmp/reg.json", "web"]);
        assert_eq!(
            args.config.as_deref(),
            Some(std::path::Path::new("/tmp/reg.json"))
        );
    }
}
