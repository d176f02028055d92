//! inkpress CLI
//!
//! Static blog generator for markdown posts with YAML frontmatter.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use inkpress::{
    BuildOptions,
    cmd::{self, Options},
    server,
};

/// Command-line interface for inkpress.
#[derive(Parser)]
#[command(
    name = "inkpress",
    version,
    about = "A static blog generator for markdown posts"
)]
struct Cli {
    /// Directory holding `_index.md` and the post sources
    source: PathBuf,

    /// Rebuild when a source or template file changes
    #[arg(long)]
    watch: bool,

    /// Serve the output directory at this address (e.g. 127.0.0.1:8080)
    #[arg(long, value_name = "ADDR")]
    serve: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = "generated")]
    output: PathBuf,

    /// Static assets directory, served under /assets/
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Directory holding post.tmpl.html, index.tmpl.html and index.tmpl.xml
    #[arg(short, long)]
    templates: PathBuf,

    /// Leave draft posts out of the output
    #[arg(long)]
    skip_drafts: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            source: self.source.clone(),
            output: self.output.clone(),
            templates: self.templates.clone(),
            assets: self.assets.clone(),
            build: BuildOptions {
                skip_drafts: self.skip_drafts,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    inkpress::init_tracing(cli.verbose);

    let options = cli.options();
    cmd::build::run(&options)?;

    // The watch thread is never joined; it ends with the process
    if cli.watch {
        let _watch = cmd::watch::spawn(&options)?;
    }

    if let Some(addr) = &cli.serve {
        let app = server::router(&options.output, options.assets.as_deref());
        server::serve(addr, app, server::shutdown_signal())
            .await
            .wrap_err_with(|| format!("Failed to serve on {addr}"))?;
    } else if cli.watch {
        server::shutdown_signal().await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["inkpress", "--templates", "tmpl", "src"]);

        assert_eq!(cli.source, PathBuf::from("src"));
        assert_eq!(cli.templates, PathBuf::from("tmpl"));
        assert_eq!(cli.output, PathBuf::from("generated"));
        assert!(!cli.watch);
        assert!(cli.serve.is_none());
        assert!(cli.assets.is_none());
        assert!(!cli.skip_drafts);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_all_flags() {
        let cli = Cli::parse_from([
            "inkpress",
            "--watch",
            "--serve",
            "127.0.0.1:8080",
            "--output",
            "public",
            "--assets",
            "static",
            "--templates",
            "tmpl",
            "--skip-drafts",
            "-vv",
            "src",
        ]);

        assert!(cli.watch);
        assert_eq!(cli.serve.as_deref(), Some("127.0.0.1:8080"));
        assert_eq!(cli.output, PathBuf::from("public"));
        assert_eq!(cli.assets, Some(PathBuf::from("static")));
        assert_eq!(cli.verbose, 2);

        let options = cli.options();
        assert!(options.build.skip_drafts);
        assert_eq!(options.source, PathBuf::from("src"));
    }

    #[test]
    fn test_cli_requires_source() {
        assert!(Cli::try_parse_from(["inkpress", "--templates", "tmpl"]).is_err());
    }

    #[test]
    fn test_cli_requires_templates() {
        assert!(Cli::try_parse_from(["inkpress", "src"]).is_err());
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
