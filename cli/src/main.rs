//! Command-line front end for the todo list.
//!
//! Each invocation mounts the controller for the configured owner, performs
//! one action through the same view models a UI would use, and prints the
//! resulting screen. Exits non-zero when the action left an error banner.

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use todo_core::view::{self, form::NewTodoForm, item::EditorSet, render};
use todo_core::{Config, Filter, HttpTodoApi, ReqwestTransport, TodoApp, TodoClient, TodoId};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todo", about = "Manage a todo list on a remote todo service")]
struct Cli {
    /// Base URL of the todo API (overrides TODO_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Owner whose list to show (overrides TODO_OWNER_ID)
    #[arg(long)]
    owner_id: Option<u64>,

    /// Which todos to display
    #[arg(long, default_value = "all")]
    filter: Filter,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the list (default)
    List,
    /// Add a new todo
    Add { title: String },
    /// Flip one todo between active and completed
    Toggle { id: TodoId },
    /// Change a todo's title; an empty title deletes it
    Rename { id: TodoId, title: String },
    /// Delete a todo
    Delete { id: TodoId },
    /// Delete every completed todo
    ClearCompleted,
    /// Complete everything, or reopen everything if all are completed
    ToggleAll,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::List => "list",
            Command::Add { .. } => "add",
            Command::Toggle { .. } => "toggle",
            Command::Rename { .. } => "rename",
            Command::Delete { .. } => "delete",
            Command::ClearCompleted => "clear-completed",
            Command::ToggleAll => "toggle-all",
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    if let Some(owner_id) = cli.owner_id {
        config = config.with_owner_id(owner_id);
    }

    let api = HttpTodoApi::new(TodoClient::new(&config.base_url), ReqwestTransport::new());
    let Some(mut app) = TodoApp::start(Arc::new(api), &config).await else {
        print!("{}", render::render_setup_warning());
        return Ok(ExitCode::FAILURE);
    };
    app.set_filter(cli.filter);

    let mut form = NewTodoForm::new();
    let mut editors = EditorSet::new();
    editors.sync(&app.snapshot());

    let command = cli.command.unwrap_or(Command::List);
    tracing::debug!(command = command.name(), owner_id = app.owner_id(), filter = %cli.filter, "dispatching command");

    match command {
        Command::List => {}
        Command::Add { title } => {
            form.set_value(title);
            view::submit_form(&mut app, &mut form).await;
        }
        Command::Toggle { id } => {
            if view::toggle_item(&mut app, &mut editors, id).await.is_none() {
                tracing::warn!(id, "toggle target is not in the list");
                anyhow::bail!("no todo with id {id}");
            }
        }
        Command::Rename { id, title } => {
            let Some(editor) = editors.get_mut(id) else {
                tracing::warn!(id, "rename target is not in the list");
                anyhow::bail!("no todo with id {id}");
            };
            editor.double_click();
            editor.set_draft(title);
            view::commit_title(&mut app, &mut editors, id).await;
        }
        Command::Delete { id } => {
            if view::delete_item(&mut app, &mut editors, id).await.is_none() {
                tracing::warn!(id, "delete target is not in the list");
                anyhow::bail!("no todo with id {id}");
            }
        }
        Command::ClearCompleted => app.clear_completed().await,
        Command::ToggleAll => app.toggle_all().await,
    }

    let state = app.snapshot();
    editors.sync(&state);
    print!("{}", render::render(&state, &form, &editors));

    Ok(if state.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_filter_and_subcommand() {
        let cli = Cli::try_parse_from(["todo", "--owner-id", "3", "--filter", "active", "rename", "4", "new title"])
            .unwrap();
        assert_eq!(cli.owner_id, Some(3));
        assert_eq!(cli.filter, Filter::Active);
        assert!(matches!(cli.command, Some(Command::Rename { id: 4, ref title }) if title == "new title"));
    }

    #[test]
    fn rejects_unknown_filter() {
        assert!(Cli::try_parse_from(["todo", "--filter", "done"]).is_err());
    }

    #[test]
    fn command_defaults_to_none() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.filter, Filter::All);
    }

    #[test]
    fn command_names_match_subcommands() {
        let cmd = Cli::command();
        for argv in [
            vec!["todo", "list"],
            vec!["todo", "add", "milk"],
            vec!["todo", "toggle", "1"],
            vec!["todo", "rename", "1", "x"],
            vec!["todo", "delete", "1"],
            vec!["todo", "clear-completed"],
            vec!["todo", "toggle-all"],
        ] {
            let command = Cli::try_parse_from(argv.clone()).unwrap().command.unwrap();
            assert_eq!(command.name(), argv[1]);
            assert!(cmd.find_subcommand(command.name()).is_some());
        }
    }
}
