use anyhow::Result;
use std::io::Write;

use todo_core::todo::permitted_statuses;
use todo_core::{Status, TodoError, TodoStore};

use crate::args::Args;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Show,
    Create,
    Update,
    Delete,
    Unsupported(String),
}

impl Action {
    /// Case-insensitive: `SHOW`, `Show` and `show` are the same action
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "show" => Self::Show,
            "create" => Self::Create,
            "update" => Self::Update,
            "delete" => Self::Delete,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

/// Run the single action selected by `args`, writing the report to `out`.
pub fn run(args: &Args, store: &dyn TodoStore, out: &mut impl Write) -> Result<()> {
    let action = Action::parse(&args.action);
    tracing::info!("Selected action..{}", args.action.to_lowercase());

    match action {
        Action::Show => cmd_show(store, out),
        Action::Create => {
            let status = parse_status(&args.status, out)?;
            let todo = store.create(&args.description, status)?;
            writeln!(out, "Created {}", todo)?;
            Ok(())
        }
        Action::Update => {
            let status = parse_status(&args.status, out)?;
            store.update(args.id, &args.description, status)?;
            if args.id > 0 {
                writeln!(out, "Updated {}", store.get_by_id(args.id)?)?;
            }
            Ok(())
        }
        Action::Delete => {
            store.delete(args.id)?;
            if args.id > 0 {
                writeln!(out, "Deleted id : {}", args.id)?;
            }
            Ok(())
        }
        Action::Unsupported(name) => {
            tracing::warn!("Unsupported action..{} passed to procedure", name);
            Ok(())
        }
    }
}

fn cmd_show(store: &dyn TodoStore, out: &mut impl Write) -> Result<()> {
    for todo in store.list_all()? {
        writeln!(out, "{}", todo)?;
    }
    Ok(())
}

/// Validation happens before any file is touched
fn parse_status(raw: &str, out: &mut impl Write) -> Result<Status, TodoError> {
    raw.parse::<Status>().map_err(|e| {
        let _ = writeln!(out, "Permitted statuses are :- {}", permitted_statuses());
        e
    })
}
