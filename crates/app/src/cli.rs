//! Command-line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use restpad_domain::{FilterCriteria, HttpMethod, RecordHeader, history::DEFAULT_PER_PAGE};

/// Restpad REST playground: environments and request history.
#[derive(Debug, Parser)]
#[command(name = "restpad", version, about)]
pub struct Cli {
    /// Directory holding environments and history (overrides RESTPAD_DATA_DIR).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage environments and their variables.
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },
    /// Browse and record request history.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

/// Environment operations.
#[derive(Debug, Subcommand)]
pub enum EnvAction {
    /// List environment names.
    List,
    /// Print the variables of an environment.
    Show {
        /// Environment name.
        name: String,
    },
    /// Create or overwrite an environment.
    Add {
        /// Environment name.
        name: String,
        /// Initial bindings.
        #[arg(value_name = "KEY=VALUE", value_parser = parse_binding)]
        variables: Vec<(String, String)>,
    },
    /// Set one variable, creating the environment if needed.
    Set {
        /// Environment name.
        env: String,
        /// Variable name.
        key: String,
        /// Variable value.
        value: String,
    },
    /// Remove one variable.
    Unset {
        /// Environment name.
        env: String,
        /// Variable name.
        key: String,
    },
    /// Rename an environment, keeping its variables.
    Rename {
        /// Current name.
        old: String,
        /// New name.
        new: String,
    },
    /// Remove every variable but keep the environment.
    Clear {
        /// Environment name.
        name: String,
    },
    /// Delete an environment.
    Remove {
        /// Environment name.
        name: String,
    },
}

/// History operations.
#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// Print history grouped by date.
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Requests per page.
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: usize,
    },
    /// Print statistics over the filtered history.
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Record a request that was performed elsewhere.
    Record(RecordArgs),
    /// Delete all history.
    Clear,
}

/// Filter flags shared by history commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Query string as used by the history page, e.g. `method=GET&dateFrom=2024-01-01`.
    #[arg(long)]
    pub query: Option<String>,
    /// Exact method (`GET`, ...) or `all`.
    #[arg(long)]
    pub method: Option<String>,
    /// Exact status (`ok`, `error`, `in process`) or `all`.
    #[arg(long)]
    pub status: Option<String>,
    /// First day to include, `YYYY-MM-DD`.
    #[arg(long = "from")]
    pub date_from: Option<String>,
    /// Last day to include, `YYYY-MM-DD`.
    #[arg(long = "to")]
    pub date_to: Option<String>,
}

impl FilterArgs {
    /// Builds criteria from `--query`, with explicit flags taking precedence.
    pub fn into_criteria(self) -> Result<FilterCriteria, restpad_domain::DomainError> {
        let base = match self.query.as_deref() {
            Some(query) => FilterCriteria::from_query(query)?,
            None => FilterCriteria::default(),
        };
        Ok(FilterCriteria {
            method: self.method.or(base.method),
            status: self.status.or(base.status),
            date_from: self.date_from.or(base.date_from),
            date_to: self.date_to.or(base.date_to),
        })
    }
}

/// Flags for `history record`.
#[derive(Debug, Clone, Args)]
pub struct RecordArgs {
    /// HTTP method.
    pub method: HttpMethod,
    /// URL; may contain `{{variable}}` references.
    pub url: String,
    /// Environment whose variables are substituted.
    #[arg(long)]
    pub env: Option<String>,
    /// Request header, `Name: value`. Repeatable.
    #[arg(long = "header", value_parser = parse_header)]
    pub headers: Vec<RecordHeader>,
    /// Request body.
    #[arg(long, default_value = "")]
    pub body: String,
    /// Response code; omit for a request still in process.
    #[arg(long)]
    pub code: Option<u16>,
    /// Round-trip duration in milliseconds.
    #[arg(long, default_value_t = 0)]
    pub duration_ms: u64,
    /// Response body.
    #[arg(long, default_value = "")]
    pub response_body: String,
}

fn parse_binding(input: &str) -> Result<(String, String), String> {
    input
        .split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{input}'"))
}

fn parse_header(input: &str) -> Result<RecordHeader, String> {
    input
        .split_once(':')
        .map(|(key, value)| RecordHeader::new(key.trim(), value.trim()))
        .ok_or_else(|| format!("expected 'Name: value', got '{input}'"))
}
