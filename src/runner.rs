use std::process::ExitCode;

use anyhow::{Context, Result};
use camino::Utf8Path;

use crate::cli::{Cli, Command, SizeArgs};
use crate::config::Config;
use crate::fsops::{self, EntryErrorPolicy};
use crate::home::HomeLayout;
use crate::util::{env, size};

pub fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Version => {
            println!("{}", fsops::version());
            Ok(ExitCode::SUCCESS)
        }
        Command::Size(args) => handle_size(args),
        Command::Exists { path } => Ok(exit_for(fsops::path_exists(&path))),
        Command::Mkdir { path } => {
            fsops::make_dir_all(&path).with_context(|| format!("creating directory {}", path))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Init => {
            let layout = HomeLayout::discover()?;
            layout.init()?;
            println!("{}", layout.root);
            Ok(ExitCode::SUCCESS)
        }
        Command::Env => handle_env(),
        Command::Which { name } => match env::find_executable(&name) {
            Some(path) => {
                println!("{}", path.display());
                Ok(ExitCode::SUCCESS)
            }
            None => Ok(ExitCode::FAILURE),
        },
    }
}

fn exit_for(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn load_config() -> Result<Config> {
    match HomeLayout::discover() {
        Ok(layout) => Config::load_default(&layout),
        Err(err) => {
            tracing::debug!(error = %err, "no firelib home, using default config");
            Ok(Config::default())
        }
    }
}

fn handle_size(args: SizeArgs) -> Result<ExitCode> {
    let config = load_config()?;
    let policy = if args.strict {
        EntryErrorPolicy::Abort
    } else {
        config.size.on_entry_error
    };
    let human = args.human || config.size.human_readable;

    let total = measure(&args.path, policy)?;
    if human {
        println!("{}\t{}", size::format_size(total), args.path);
    } else {
        println!("{}\t{}", total, args.path);
    }
    Ok(ExitCode::SUCCESS)
}

fn measure(path: &Utf8Path, policy: EntryErrorPolicy) -> Result<i64> {
    fsops::directory_size_with(path, policy).with_context(|| format!("measuring {}", path))
}

fn handle_env() -> Result<ExitCode> {
    match HomeLayout::discover() {
        Ok(layout) => {
            let state = if layout.is_initialized() {
                "initialized"
            } else {
                "missing; run `fire init`"
            };
            println!("Firelib home: {} ({})", layout.root, state);
        }
        Err(err) => println!("Firelib home: <unavailable> ({err})"),
    }
    println!("Termux: {}", if env::is_termux() { "yes" } else { "no" });
    println!("Prefix: {}", env::termux_prefix().display());
    println!("Version: {}", fsops::version());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use clap::Parser;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    #[test]
    fn mkdir_then_exists() {
        let (_guard, root) = temp_root();
        let target = root.join("deep/tree");

        let cli = Cli::parse_from(["fire", "exists", target.as_str()]);
        assert_eq!(run(cli).unwrap(), ExitCode::FAILURE);

        let cli = Cli::parse_from(["fire", "mkdir", target.as_str()]);
        assert_eq!(run(cli).unwrap(), ExitCode::SUCCESS);

        let cli = Cli::parse_from(["fire", "exists", target.as_str()]);
        assert_eq!(run(cli).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn measure_missing_path_is_an_error() {
        let (_guard, root) = temp_root();
        let err = measure(&root.join("gone"), EntryErrorPolicy::Skip).unwrap_err();
        assert!(format!("{err}").starts_with("measuring"));
        assert!(matches!(
            err.downcast_ref::<crate::FsError>(),
            Some(crate::FsError::NotFoundOrNotADirectory { .. })
        ));
    }
}
