//! Command execution.

use std::io::Write;

use anyhow::{Context, bail};
use restpad_application::{
    ApplicationError, EnvironmentStore, HistorySource, QueryHistory, QueryHistoryInput,
    RecordRequest, RecordRequestInput,
};
use restpad_domain::{DateGroup, HistoryStats, Page, VariableBindings};
use restpad_infrastructure::{
    AppConfig, FileHistoryRepository, FileKeyValueStore, SystemClock, TracingNotifier,
};

use crate::cli::{Command, EnvAction, HistoryAction, RecordArgs};

type Store = EnvironmentStore<FileKeyValueStore, TracingNotifier>;

/// Runs `command`, writing human-readable output to `out`.
pub async fn run(command: Command, config: &AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Env { action } => run_env(action, config, out),
        Command::History { action } => run_history(action, config, out).await,
    }
}

fn open_store(config: &AppConfig) -> Store {
    EnvironmentStore::open(
        FileKeyValueStore::new(&config.data_dir),
        TracingNotifier::new(),
    )
}

fn history(config: &AppConfig) -> FileHistoryRepository {
    FileHistoryRepository::new(&config.history_file, config.history_limit)
}

fn run_env(action: EnvAction, config: &AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let mut store = open_store(config);

    match action {
        EnvAction::List => {
            for name in store.get_env() {
                writeln!(out, "{name}")?;
            }
        }
        EnvAction::Show { name } => {
            if !store.environment_exists(&name) {
                bail!("environment '{name}' does not exist");
            }
            for (key, value) in &store.get_env_variables(&name) {
                writeln!(out, "{key}={value}")?;
            }
        }
        EnvAction::Add { name, variables } => {
            store.add_env(&name, variables.into_iter().collect());
            writeln!(out, "Added environment '{name}'")?;
        }
        EnvAction::Set { env, key, value } => {
            store.set_variable(&env, &key, &value);
        }
        EnvAction::Unset { env, key } => {
            store.remove_variable(&env, &key);
        }
        EnvAction::Rename { old, new } => {
            if !store.environment_exists(&old) {
                bail!("environment '{old}' does not exist");
            }
            store.rename_env(&old, &new);
            writeln!(out, "Renamed '{old}' to '{new}'")?;
        }
        EnvAction::Clear { name } => {
            store.clear_env(&name);
        }
        EnvAction::Remove { name } => {
            store.remove_env(&name);
        }
    }

    Ok(())
}

async fn run_history(
    action: HistoryAction,
    config: &AppConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match action {
        HistoryAction::List {
            filter,
            page,
            per_page,
        } => {
            let input = QueryHistoryInput {
                criteria: filter.into_criteria()?,
                page,
                per_page,
            };
            let output = QueryHistory::new(history(config)).execute(&input).await?;
            print_page(&output.page, out)?;
        }
        HistoryAction::Stats { filter } => {
            let input = QueryHistoryInput {
                criteria: filter.into_criteria()?,
                ..QueryHistoryInput::default()
            };
            let output = QueryHistory::new(history(config)).execute(&input).await?;
            print_stats(&output.stats, out)?;
        }
        HistoryAction::Record(args) => record(args, config, out).await?,
        HistoryAction::Clear => {
            history(config)
                .clear()
                .await
                .map_err(ApplicationError::from)?;
            writeln!(out, "History cleared")?;
        }
    }

    Ok(())
}

async fn record(args: RecordArgs, config: &AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let bindings = match args.env.as_deref() {
        Some(env) => {
            let store = open_store(config);
            if !store.environment_exists(env) {
                bail!("environment '{env}' does not exist");
            }
            store.get_env_variables(env)
        }
        None => VariableBindings::new(),
    };

    let mut input = RecordRequestInput::issued(args.method, args.url);
    if let Some(code) = args.code {
        input = input.completed(code, args.duration_ms);
    }
    input.headers = args.headers;
    input.body = args.body;
    input.response_body = args.response_body;

    let record = RecordRequest::new(history(config), SystemClock::new())
        .execute(input, &bindings)
        .await
        .context("could not record request")?;

    writeln!(out, "{} {} {}", record.method, record.url, record.status)?;
    Ok(())
}

fn print_page(page: &Page<DateGroup>, out: &mut impl Write) -> std::io::Result<()> {
    if page.total_items == 0 {
        return writeln!(out, "No requests match the current filters.");
    }

    for group in &page.items {
        writeln!(out, "{}", group.date)?;
        for request in &group.requests {
            let code = request
                .response_code
                .map_or_else(|| "-".to_string(), |code| code.to_string());
            writeln!(
                out,
                "  {}  {:<7} {:<10} {:>3}  {:>7}  {}",
                request.time,
                request.method,
                request.status,
                code,
                request.duration_display(),
                request.url
            )?;
        }
    }

    writeln!(
        out,
        "Page {} of {} ({} requests)",
        page.page, page.total_pages, page.total_items
    )?;
    if page.has_previous() {
        writeln!(out, "Previous: --page {}", page.page - 1)?;
    }
    if page.has_next() {
        writeln!(out, "Next: --page {}", page.page + 1)?;
    }
    Ok(())
}

fn print_stats(stats: &HistoryStats, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Total: {}", stats.total)?;
    if let Some(rate) = stats.success_rate {
        writeln!(out, "Success rate: {:.1}%", rate * 100.0)?;
    }
    if let Some(average) = stats.average_duration_ms {
        writeln!(out, "Average duration: {average}ms")?;
    }
    if !stats.by_status.is_empty() {
        writeln!(out, "By status:")?;
        for (status, count) in &stats.by_status {
            writeln!(out, "  {status:<10} {count}")?;
        }
    }
    if !stats.by_method.is_empty() {
        writeln!(out, "By method:")?;
        for (method, count) in &stats.by_method {
            writeln!(out, "  {method:<7} {count}")?;
        }
    }
    Ok(())
}
