/// Human-readable byte counts.
pub mod size {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    /// Render a byte count with two decimals in the largest fitting binary unit.
    pub fn format_size(bytes: i64) -> String {
        let mut value = bytes as f64;
        for unit in UNITS {
            if value < 1024.0 {
                return format!("{:.2} {}", value, unit);
            }
            value /= 1024.0;
        }
        format!("{:.2} PB", value)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn picks_largest_unit_below_1024() {
            assert_eq!(format_size(0), "0.00 B");
            assert_eq!(format_size(1023), "1023.00 B");
            assert_eq!(format_size(1024), "1.00 KB");
            assert_eq!(format_size(1536), "1.50 KB");
            assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
            assert_eq!(format_size(1 << 50), "1.00 PB");
        }
    }
}

/// Probes for the host environment (Termux, `PATH`).
pub mod env {
    use std::ffi::OsString;
    use std::path::{Path, PathBuf};

    use crate::fsops;

    pub const DEFAULT_TERMUX_PREFIX: &str = "/data/data/com.termux/files/usr";
    const TERMUX_ROOT: &str = "/data/data/com.termux";

    /// The Termux install prefix, from `$PREFIX` when set.
    pub fn termux_prefix() -> PathBuf {
        prefix_from(std::env::var_os("PREFIX"))
    }

    fn prefix_from(value: Option<OsString>) -> PathBuf {
        value
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TERMUX_PREFIX))
    }

    pub fn is_termux() -> bool {
        fsops::path_exists(TERMUX_ROOT)
    }

    /// Locate `name` on `PATH`, returning the first executable match.
    pub fn find_executable(name: &str) -> Option<PathBuf> {
        find_in(name, std::env::var_os("PATH")?)
    }

    fn find_in(name: &str, search: OsString) -> Option<PathBuf> {
        if name.contains('/') {
            let candidate = PathBuf::from(name);
            return is_executable(&candidate).then_some(candidate);
        }
        std::env::split_paths(&search)
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate))
    }

    #[cfg(unix)]
    fn is_executable(path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        path.metadata()
            .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(path: &Path) -> bool {
        path.is_file()
    }

}

/// Child process execution with captured output.
pub mod process {
    use std::process::{Command, Stdio};

    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct CommandOutput {
        /// Exit code, or `-1` if the process could not be started or was killed.
        pub code: i32,
        pub stdout: String,
        pub stderr: String,
    }

    impl CommandOutput {
        fn failed(message: String) -> Self {
            Self {
                code: -1,
                stdout: String::new(),
                stderr: message,
            }
        }

        pub fn success(&self) -> bool {
            self.code == 0
        }
    }

    /// Run `argv` to completion and capture its output. Never fails: spawn
    /// errors are reported through `code == -1` and `stderr`.
    pub fn run_command(argv: &[String]) -> CommandOutput {
        let Some((program, args)) = argv.split_first() else {
            return CommandOutput::failed("empty command".to_owned());
        };

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) => CommandOutput {
                code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Err(err) => {
                tracing::debug!(command = %format_command(argv), error = %err, "spawn failed");
                CommandOutput::failed(err.to_string())
            }
        }
    }

    pub fn format_command(argv: &[String]) -> String {
        argv.iter()
            .map(|arg| {
                if arg.chars().any(|c| c.is_whitespace()) {
                    format!("\"{}\"", arg.replace('"', "\\\""))
                } else {
                    arg.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn argv(parts: &[&str]) -> Vec<String> {
            parts.iter().map(|s| s.to_string()).collect()
        }

        #[cfg(unix)]
        #[test]
        fn captures_code_and_streams() {
            let out = run_command(&argv(&["sh", "-c", "echo hi; echo oops >&2; exit 3"]));
            assert_eq!(out.code, 3);
            assert_eq!(out.stdout, "hi\n");
            assert_eq!(out.stderr, "oops\n");
            assert!(!out.success());
        }

        #[test]
        fn missing_program_is_minus_one() {
            let out = run_command(&argv(&["firelib-definitely-not-installed"]));
            assert_eq!(out.code, -1);
            assert!(!out.stderr.is_empty());
        }

        #[test]
        fn empty_argv_is_minus_one() {
            assert_eq!(run_command(&[]).code, -1);
        }

        #[test]
        fn quotes_arguments_with_whitespace() {
            assert_eq!(format_command(&argv(&["echo", "a b"])), "echo \"a b\"");
        }
    }
}
