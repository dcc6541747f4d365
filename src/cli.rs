use std::io::Write;

use crate::catalog;
use crate::error::AppError;
use crate::state::AppState;
use crate::view::ResourceListView;

pub const USAGE: &str = "\
Usage:
  dashboard resources
  dashboard <resource> list [--search TERM] [--page N] [--rows 5|10|25]
  dashboard <resource> show <id>
  dashboard <resource> create field=value...
  dashboard <resource> update <id> field=value...
  dashboard <resource> delete <id>

Pages are numbered from 1.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Resources,
    List {
        resource: String,
        search: Option<String>,
        /// Zero-based.
        page: Option<usize>,
        rows: Option<usize>,
    },
    Show {
        resource: String,
        id: String,
    },
    Create {
        resource: String,
        fields: Vec<(String, String)>,
    },
    Update {
        resource: String,
        id: String,
        fields: Vec<(String, String)>,
    },
    Delete {
        resource: String,
        id: String,
    },
}

fn usage_error(msg: impl Into<String>) -> AppError {
    AppError::Validation(msg.into())
}

/// Parses the arguments after the program name.
pub fn parse<I>(args: I) -> Result<Command, AppError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let resource = args.next().ok_or_else(|| usage_error("missing resource"))?;
    if resource == "resources" {
        return Ok(Command::Resources);
    }
    let action = args.next().ok_or_else(|| usage_error("missing action"))?;
    let rest: Vec<String> = args.collect();

    match action.as_str() {
        "list" => parse_list(resource, rest),
        "show" => {
            let id = single_id(&action, rest)?;
            Ok(Command::Show { resource, id })
        }
        "delete" => {
            let id = single_id(&action, rest)?;
            Ok(Command::Delete { resource, id })
        }
        "create" => Ok(Command::Create {
            resource,
            fields: parse_fields(&rest)?,
        }),
        "update" => {
            let (id, fields) = rest.split_first().ok_or_else(|| usage_error("update needs an id"))?;
            Ok(Command::Update {
                resource,
                id: id.clone(),
                fields: parse_fields(fields)?,
            })
        }
        other => Err(usage_error(format!("unknown action `{}`", other))),
    }
}

fn parse_list(resource: String, rest: Vec<String>) -> Result<Command, AppError> {
    let mut search = None;
    let mut page = None;
    let mut rows = None;

    let mut rest = rest.into_iter();
    while let Some(flag) = rest.next() {
        let value = rest
            .next()
            .ok_or_else(|| usage_error(format!("{} needs a value", flag)))?;
        match flag.as_str() {
            "--search" => search = Some(value),
            "--page" => {
                let n = parse_number(&flag, &value)?;
                if n == 0 {
                    return Err(usage_error("--page starts at 1"));
                }
                page = Some(n - 1);
            }
            "--rows" => rows = Some(parse_number(&flag, &value)?),
            other => return Err(usage_error(format!("unknown option `{}`", other))),
        }
    }

    Ok(Command::List {
        resource,
        search,
        page,
        rows,
    })
}

fn parse_number(flag: &str, value: &str) -> Result<usize, AppError> {
    value
        .parse()
        .map_err(|_| usage_error(format!("{} expects a number, got `{}`", flag, value)))
}

fn single_id(action: &str, rest: Vec<String>) -> Result<String, AppError> {
    let mut rest = rest.into_iter();
    match (rest.next(), rest.next()) {
        (Some(id), None) => Ok(id),
        _ => Err(usage_error(format!("{} takes exactly one id", action))),
    }
}

fn parse_fields(pairs: &[String]) -> Result<Vec<(String, String)>, AppError> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| usage_error(format!("expected field=value, got `{}`", pair)))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The command ran but the server refused it; details were logged.
    Failed,
}

/// Executes one command, writing its output to `out`. `connect` is only
/// called by commands that talk to the backend.
pub async fn run<C, W>(command: Command, connect: C, out: &mut W) -> Result<Outcome, AppError>
where
    C: FnOnce() -> Result<AppState, AppError>,
    W: Write,
{
    match command {
        Command::Resources => {
            for descriptor in catalog::CATALOG {
                writeln!(out, "{:<16} {}", descriptor.name, descriptor.label)?;
            }
        }
        Command::List {
            resource,
            search,
            page,
            rows,
        } => {
            let view = connect()?.list_view(&resource).await?;
            // Search and rows both reset the page, so the page goes last.
            if let Some(term) = search {
                view.search(&term);
            }
            if let Some(rows) = rows {
                view.set_rows_per_page(rows)?;
            }
            if let Some(page) = page {
                view.set_page(page);
            }
            writeln!(out, "{}", view.render())?;
        }
        Command::Show { resource, id } => {
            let descriptor = catalog::find(&resource)?;
            let item = connect()?.api.get(descriptor, &id).await?;
            let width = item.fields().keys().map(|k| k.len()).max().unwrap_or(0);
            for key in item.fields().keys() {
                writeln!(out, "{:<width$}  {}", key, item.display_value(key), width = width)?;
            }
        }
        Command::Create { resource, fields } => {
            let mut form = connect()?.create_form(&resource)?;
            for (field, value) in &fields {
                form.set(field, value)?;
            }
            let saved = form.submit().await?;
            let descriptor = catalog::find(&resource)?;
            writeln!(
                out,
                "Created {} {}",
                descriptor.name,
                saved.id(descriptor.id_field).unwrap_or_default()
            )?;
        }
        Command::Update { resource, id, fields } => {
            let mut form = connect()?.edit_form(&resource, &id).await?;
            for (field, value) in &fields {
                form.set(field, value)?;
            }
            form.submit().await?;
            writeln!(out, "Updated {} {}", resource, id)?;
        }
        Command::Delete { resource, id } => {
            let descriptor = catalog::find(&resource)?;
            let view = ResourceListView::new(descriptor, connect()?.api);
            if !view.delete(&id).await {
                writeln!(out, "Could not delete {} {}", descriptor.name, id)?;
                return Ok(Outcome::Failed);
            }
            writeln!(out, "Deleted {} {}", descriptor.name, id)?;
        }
    }

    Ok(Outcome::Success)
}
