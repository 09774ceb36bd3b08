//! Subcommand implementations.
//!
//! Each command returns its standard output as a string; `main` prints it.

use std::error::Error;
use std::fmt::Write as _;
use std::path::Path;

use prestige_application::highlight::SheetHighlighter;
use prestige_application::{Diagnostic, extract_request, lint, parse};
use prestige_domain::sheet::split_lines;
use prestige_domain::{CurlOptions, DEFAULT_SHEET, ExecutionContext, OutputFormat, Settings, Value};
use prestige_infrastructure::{SheetScriptHost, export_to_curl, sheet_mode, stage_file, to_json_stable};
use tracing::info;

use crate::cli::ExtractArgs;

type CommandResult<T> = Result<T, Box<dyn Error>>;

async fn read_sheet(file: &Path) -> CommandResult<String> {
    tokio::fs::read_to_string(file)
        .await
        .map_err(|err| format!("cannot read {}: {err}", file.display()).into())
}

pub async fn blocks(file: &Path) -> CommandResult<String> {
    let text = read_sheet(file).await?;
    Ok(to_json_stable(&parse(&split_lines(&text)))?)
}

pub async fn extract(args: &ExtractArgs, settings: &Settings) -> CommandResult<String> {
    let text = read_sheet(&args.file).await?;
    let lines = split_lines(&text);
    let target_line = args.line.checked_sub(1).ok_or("line numbers start at 1")?;

    let mut context = ExecutionContext::with_data(settings.initial_data());
    for (key, raw) in &args.data {
        let value = serde_json::from_str(raw).map_or_else(|_| Value::from(raw.as_str()), Value::from_json);
        context.data.insert(key.clone(), value);
    }
    for path in &args.files {
        context.files.insert(stage_file(path).await?);
    }

    let result = extract_request(&lines, target_line, &mut context, &SheetScriptHost::new()).await;
    for notice in &context.notices {
        info!(kind = ?notice.kind, "{}", notice.message);
    }
    let details = result?;

    let format = args.format.map_or(settings.output, OutputFormat::from);
    Ok(match format {
        OutputFormat::Json => to_json_stable(&details)?,
        OutputFormat::Curl => {
            let options = CurlOptions {
                use_long_flags: args.long_flags || settings.curl.use_long_flags,
                single_line: args.single_line || settings.curl.single_line,
            };
            let mut command = export_to_curl(&details, &options).to_plain_string();
            command.push('\n');
            command
        }
    })
}

pub async fn highlight(file: &Path) -> CommandResult<String> {
    let text = read_sheet(file).await?;
    let lines = split_lines(&text);
    let mut highlighter = SheetHighlighter::new(sheet_mode());
    highlighter.update(&lines, 0);

    let mut out = String::new();
    for index in 0..highlighter.len() {
        write!(out, "{:>4} |", index + 1)?;
        for token in highlighter.tokens(index).unwrap_or_default() {
            match token.style {
                Some(style) => write!(out, " <{style}>{}", token.text)?,
                None if token.text.trim().is_empty() => {}
                None => write!(out, " {}", token.text)?,
            }
        }
        out.push('\n');
    }
    Ok(out)
}

/// Lints a sheet; the second value tells whether any problem was found.
pub async fn lint_sheet(file: &Path) -> CommandResult<(String, bool)> {
    let text = read_sheet(file).await?;
    let diagnostics = lint(&split_lines(&text), &SheetScriptHost::new());

    let mut out = String::new();
    for Diagnostic {
        line,
        column,
        severity,
        message,
    } in &diagnostics
    {
        let severity = serde_json::to_value(severity)?;
        let severity = severity.as_str().unwrap_or("error");
        writeln!(out, "{}:{}:{}: {severity}: {message}", file.display(), line + 1, column + 1)?;
    }
    Ok((out, !diagnostics.is_empty()))
}

pub async fn new_sheet(file: &Path, force: bool) -> CommandResult<String> {
    if !force && tokio::fs::try_exists(file).await? {
        return Err(format!("{} already exists (use --force to overwrite)", file.display()).into());
    }
    if let Some(parent) = file.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(file, DEFAULT_SHEET).await?;
    info!(path = %file.display(), "created sheet");
    Ok(String::new())
}
