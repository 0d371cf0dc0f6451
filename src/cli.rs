use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI definition for the `fire` binary.
#[derive(Parser, Debug)]
#[command(name = "fire", version, about = "Firelib filesystem helpers")]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the library version.
    Version,
    /// Report the total size of a directory tree.
    Size(SizeArgs),
    /// Exit successfully if something exists at the path.
    Exists { path: Utf8PathBuf },
    /// Create a directory and any missing parents.
    Mkdir { path: Utf8PathBuf },
    /// Create the Firelib home layout (config, data, logs).
    Init,
    /// Show environment details: home layout, Termux detection, prefix.
    Env,
    /// Locate an executable on PATH.
    Which { name: String },
}

#[derive(Args, Debug)]
pub struct SizeArgs {
    pub path: Utf8PathBuf,
    /// Print sizes like `1.50 MB` instead of raw bytes.
    #[arg(long = "human", short = 'H')]
    pub human: bool,
    /// Fail on the first unreadable entry instead of skipping it.
    #[arg(long = "strict")]
    pub strict: bool,
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_size_flags() {
        let cli = Cli::try_parse_from(["fire", "-v", "size", "/tmp", "--human", "--strict"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Size(args) => {
                assert_eq!(args.path, "/tmp");
                assert!(args.human);
                assert!(args.strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
