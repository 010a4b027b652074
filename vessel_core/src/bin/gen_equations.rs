//! Generate EQUATIONS.md from the equation registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-equations                    # write the default file
//! cargo run --bin gen-equations -- docs/EQ.md      # write elsewhere
//! cargo run --bin gen-equations -- --check         # exit 1 if the file is stale
//! ```
//!
//! The default output is `src/equations/EQUATIONS.md` inside this crate,
//! resolved from the manifest directory so the working directory does not
//! matter.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use vessel_core::equations::generate_equations_markdown;

const DEFAULT_OUTPUT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/src/equations/EQUATIONS.md");

const USAGE: &str = "usage: gen-equations [--check] [OUTPUT]";

#[derive(Debug, PartialEq)]
struct Options {
    check: bool,
    output: PathBuf,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, String> {
    let mut check = false;
    let mut output = None;

    for arg in args {
        match arg.as_str() {
            "--check" => check = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with('-') => return Err(format!("unknown option '{}'\n{}", flag, USAGE)),
            path => {
                if output.replace(PathBuf::from(path)).is_some() {
                    return Err(format!("more than one output path\n{}", USAGE));
                }
            }
        }
    }

    Ok(Options {
        check,
        output: output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
    })
}

/// True when `path` already holds exactly `markdown`. A missing file is stale.
fn is_current(path: &Path, markdown: &str) -> io::Result<bool> {
    match fs::read_to_string(path) {
        Ok(existing) => Ok(existing == markdown),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    let markdown = generate_equations_markdown();
    let path = options.output.as_path();

    if options.check {
        return match is_current(path, &markdown) {
            Ok(true) => {
                println!("{} is up to date", path.display());
                ExitCode::SUCCESS
            }
            Ok(false) => {
                eprintln!("{} is stale; rerun gen-equations", path.display());
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                ExitCode::FAILURE
            }
        };
    }

    match fs::write(path, &markdown) {
        Ok(()) => {
            println!("Wrote {} bytes to {}", markdown.len(), path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_output() {
        let options = parse_args(args(&[])).unwrap();
        assert!(!options.check);
        assert!(options.output.ends_with("src/equations/EQUATIONS.md"));
        assert!(options.output.is_absolute());
    }

    #[test]
    fn test_check_with_path() {
        let options = parse_args(args(&["--check", "out.md"])).unwrap();
        assert_eq!(
            options,
            Options {
                check: true,
                output: PathBuf::from("out.md"),
            }
        );
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(parse_args(args(&["--force"])).unwrap_err().contains("unknown option"));
        assert!(parse_args(args(&["a.md", "b.md"])).is_err());
    }

    #[test]
    fn test_is_current() {
        let path = std::env::temp_dir().join(format!("gen_equations_{}.md", std::process::id()));
        let markdown = generate_equations_markdown();

        assert!(!is_current(&path, &markdown).unwrap());
        fs::write(&path, &markdown).unwrap();
        assert!(is_current(&path, &markdown).unwrap());
        fs::write(&path, "# outdated\n").unwrap();
        assert!(!is_current(&path, &markdown).unwrap());
        fs::remove_file(&path).unwrap();
    }
}
