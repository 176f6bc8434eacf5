//! Inspect a MicFx modules directory
//!
//! Discovers `<dir>/<module>/module.toml` manifests and reports dependency
//! validation, startup/shutdown order and direct dependencies/dependents.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use micfx_core::module::registry::{DependencyResolver, ModuleDiscovery};
use micfx_core::utils::init_logging_from_config;
use micfx_core::{HostConfig, LoggingConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "micfx-modules")]
struct Args {
    /// Host config file (.json or .toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Modules directory (overrides the config file)
    #[arg(short, long, global = true)]
    modules_dir: Option<PathBuf>,

    /// Log filter, e.g. "debug" (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_filter: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that every required dependency is present
    Validate,
    /// Print the startup order, one module per line
    Order {
        /// Print the shutdown order instead
        #[arg(long)]
        shutdown: bool,
    },
    /// Print the direct dependencies of a module
    Dependencies { name: String },
    /// Print the modules that directly require a module
    Dependents { name: String },
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<bool> {
    let mut config = match &args.config {
        Some(path) => HostConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => HostConfig::default(),
    };
    if let Some(filter) = args.log_filter {
        config.logging.get_or_insert_with(LoggingConfig::default).filter = Some(filter);
    }
    if let Some(dir) = &args.modules_dir {
        config.modules.modules_dir = dir.to_string_lossy().to_string();
    }
    config.validate()?;
    init_logging_from_config(config.logging.as_ref());

    let modules_dir = Path::new(&config.modules.modules_dir);
    if !modules_dir.is_dir() {
        bail!("Modules directory {} does not exist", modules_dir.display());
    }

    let discovery = ModuleDiscovery::new(modules_dir);
    let discovered = discovery.discover_modules()?;
    let resolver = ModuleDiscovery::build_resolver(&discovered)?;

    match args.command {
        Command::Validate => Ok(report_validation(&resolver)),
        Command::Order { shutdown } => {
            let order = if shutdown {
                resolver.shutdown_order()
            } else {
                resolver.startup_order()
            };
            match order {
                Ok(order) => {
                    for name in order {
                        println!("{}", name);
                    }
                    Ok(true)
                }
                Err(e) => {
                    eprintln!("{}", e);
                    Ok(false)
                }
            }
        }
        Command::Dependencies { name } => {
            for dep in resolver.direct_dependencies(&name) {
                println!("{}", dep);
            }
            Ok(true)
        }
        Command::Dependents { name } => {
            for dependent in resolver.direct_dependents(&name) {
                println!("{}", dependent);
            }
            Ok(true)
        }
    }
}

fn report_validation(resolver: &DependencyResolver) -> bool {
    let validation = resolver.validate_dependencies();
    if validation.is_valid {
        println!(
            "{} modules, all dependencies registered",
            resolver.registered_module_count()
        );
    } else {
        for missing in &validation.missing_dependencies {
            println!("{}", missing);
        }
    }
    validation.is_valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, name: &str, body: &str) {
        let module_dir = dir.join(name);
        std::fs::create_dir_all(&module_dir).unwrap();
        std::fs::write(module_dir.join("module.toml"), body).unwrap();
    }

    fn run_in(dir: &Path, command: &[&str]) -> anyhow::Result<bool> {
        let mut argv = vec!["micfx-modules", "--modules-dir", dir.to_str().unwrap()];
        argv.extend_from_slice(command);
        run(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_validate_exit_status() {
        let temp_dir = TempDir::new().unwrap();
        write_manifest(temp_dir.path(), "core", "name = \"core\"\nversion = \"1.0.0\"\n");
        assert!(run_in(temp_dir.path(), &["validate"]).unwrap());

        write_manifest(
            temp_dir.path(),
            "admin",
            "name = \"admin\"\nversion = \"1.0.0\"\ndependencies = [\"auth\"]\n",
        );
        assert!(!run_in(temp_dir.path(), &["validate"]).unwrap());
    }

    #[test]
    fn test_order_exit_status() {
        let temp_dir = TempDir::new().unwrap();
        write_manifest(
            temp_dir.path(),
            "auth",
            "name = \"auth\"\nversion = \"1.0.0\"\ndependencies = [\"core\"]\n",
        );
        write_manifest(temp_dir.path(), "core", "name = \"core\"\nversion = \"1.0.0\"\n");
        assert!(run_in(temp_dir.path(), &["order"]).unwrap());
        assert!(run_in(temp_dir.path(), &["order", "--shutdown"]).unwrap());

        write_manifest(
            temp_dir.path(),
            "core",
            "name = \"core\"\nversion = \"1.0.0\"\ndependencies = [\"auth\"]\n",
        );
        assert!(!run_in(temp_dir.path(), &["order"]).unwrap());
    }

    #[test]
    fn test_missing_modules_dir_not_created() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("typo");

        let err = run_in(&missing, &["validate"]).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(!missing.exists());
    }

    #[test]
    fn test_unreadable_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let args = Args::try_parse_from([
            "micfx-modules",
            "--config",
            temp_dir.path().join("host.toml").to_str().unwrap(),
            "validate",
        ])
        .unwrap();

        assert!(run(args).is_err());
    }
}
