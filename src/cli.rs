//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::debug;

use crate::domain::error::ConfigFileError;
use crate::domain::store::{ConfigStore, VarRef};
use crate::logger;

#[derive(Parser, Debug)]
#[command(name = "confdata", about = "Query sectioned configuration data files")]
pub struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn", value_parser = log_level)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value of a variable
    Get {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        section: Option<String>,
        /// Convert the value before printing
        #[arg(long = "as", value_enum, default_value_t = ValueType::String)]
        as_type: ValueType,
        /// Print an empty/zero/false value instead of failing when missing
        #[arg(long)]
        lenient: bool,
        variable: String,
    },
    /// Print the variable comment, value and value comment
    Describe {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        section: Option<String>,
        variable: String,
    },
    /// List section names in file order
    Sections {
        #[arg(short, long)]
        config: PathBuf,
        /// Also list the variables of each section
        #[arg(long)]
        variables: bool,
    },
    /// Check that a file loads and summarise it
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    String,
    Int,
    Double,
    Bool,
}

fn log_level(level: &str) -> Result<String, logger::LoggerError> {
    logger::parse_level(level)?;
    Ok(level.trim().to_ascii_lowercase())
}

pub fn run(cli: Cli) -> ExitCode {
    if let Err(e) = logger::init(&cli.log_level) {
        eprintln!("warning: {e}");
    }

    let result = match cli.command {
        Command::Get {
            config,
            section,
            as_type,
            lenient,
            variable,
        } => load_config(&config).and_then(|mut store| {
            store.set_exception_on_missing(!lenient);
            render_get(&store, var_ref(&variable, section.as_deref()), as_type)
        }),
        Command::Describe {
            config,
            section,
            variable,
        } => load_config(&config)
            .and_then(|store| render_describe(&store, var_ref(&variable, section.as_deref()))),
        Command::Sections { config, variables } => {
            load_config(&config).map(|mut store| render_sections(&mut store, variables))
        }
        Command::Validate { config } => load_config(&config).map(|store| render_summary(&store)),
    };

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

pub fn load_config(path: &Path) -> Result<ConfigStore, ConfigFileError> {
    debug!(path = %path.display(), "loading configuration");
    ConfigStore::open(path)
}

fn var_ref<'a>(variable: &'a str, section: Option<&'a str>) -> VarRef<'a> {
    VarRef { variable, section }
}

/// The value of `var`, converted to `as_type`, followed by a newline.
pub fn render_get(
    store: &ConfigStore,
    var: VarRef<'_>,
    as_type: ValueType,
) -> Result<String, ConfigFileError> {
    let value = match as_type {
        ValueType::String => store.get_value(var)?,
        ValueType::Int => store.get_value_as_int(var)?.to_string(),
        ValueType::Double => store.get_value_as_double(var)?.to_string(),
        ValueType::Bool => store.get_value_as_bool(var)?.to_string(),
    };
    Ok(format!("{value}\n"))
}

pub fn render_describe(store: &ConfigStore, var: VarRef<'_>) -> Result<String, ConfigFileError> {
    Ok(format!(
        "{}\n{}\n{}\n",
        store.get_variable_description(var)?,
        store.get_value(var)?,
        store.get_value_description(var)?
    ))
}

/// One section name per line, walked with the store's section cursor.
pub fn render_sections(store: &mut ConfigStore, with_variables: bool) -> String {
    let mut out = String::new();
    store.reset_section_cursor();

    while let Some(name) = store.next_section_name() {
        let _ = writeln!(out, "[{name}]");
        if !with_variables {
            continue;
        }
        if let Some(section) = store.section(&name) {
            for (variable, entry) in section.variables() {
                let _ = writeln!(out, "  {variable} = {}", entry.value);
            }
        }
    }

    out
}

pub fn render_summary(store: &ConfigStore) -> String {
    format!(
        "ok: {} sections, {} variables\n",
        store.len(),
        store.variable_count()
    )
}
