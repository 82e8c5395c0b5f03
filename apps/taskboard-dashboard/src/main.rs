use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use clap::Parser;
use reqwest::blocking::Client;
use taskboard_protocol::{CreateTaskRequest, Task, UpdateTaskRequest};

#[derive(Debug, Parser)]
#[command(
    name = "taskboard-dashboard",
    version,
    about = "Terminal client for the taskboard service"
)]
struct Args {
    #[arg(long, env = "TASKBOARD_BASE", default_value = "http://127.0.0.1:8090")]
    base: String,
    /// Initial filter (all, active, completed)
    #[arg(long, default_value = "all")]
    filter: String,
    /// Render one snapshot of the task list and exit
    #[arg(long, default_value_t = false)]
    once: bool,
    /// Print the raw task JSON instead of the rendered list
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn tasks_url(base: &str, rest: &str) -> String {
    format!("{}/api/tasks{}", base.trim_end_matches('/'), rest)
}

fn fetch_tasks(client: &Client, base: &str) -> Result<Vec<Task>> {
    let resp = client
        .get(tasks_url(base, ""))
        .send()
        .context("fetching tasks")?;
    if !resp.status().is_success() {
        bail!("task list failed: {}", resp.status());
    }
    resp.json().context("decoding task list json")
}

fn create_task(client: &Client, base: &str, description: &str) -> Result<Task> {
    let body = CreateTaskRequest {
        description: Some(description.to_string()),
    };
    let resp = client
        .post(tasks_url(base, ""))
        .json(&body)
        .send()
        .context("creating task")?;
    if !resp.status().is_success() {
        bail!("create failed: {}", resp.status());
    }
    resp.json().context("decoding created task")
}

fn toggle_task(client: &Client, base: &str, id: u64) -> Result<Task> {
    let resp = client
        .put(tasks_url(base, &format!("/{id}/toggle")))
        .send()
        .context("toggling task")?;
    if !resp.status().is_success() {
        bail!("toggle failed: {}", resp.status());
    }
    resp.json().context("decoding toggled task")
}

fn update_task(client: &Client, base: &str, id: u64, description: &str) -> Result<Task> {
    let body = UpdateTaskRequest {
        description: Some(description.to_string()),
    };
    let resp = client
        .put(tasks_url(base, &format!("/{id}")))
        .json(&body)
        .send()
        .context("updating task")?;
    if !resp.status().is_success() {
        bail!("update failed: {}", resp.status());
    }
    resp.json().context("decoding updated task")
}

fn delete_task(client: &Client, base: &str, id: u64) -> Result<()> {
    let resp = client
        .delete(tasks_url(base, &format!("/{id}")))
        .send()
        .context("deleting task")?;
    if !resp.status().is_success() {
        bail!("delete failed: {}", resp.status());
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Filter::All),
            "active" => Some(Filter::Active),
            "completed" | "done" => Some(Filter::Completed),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.is_completed,
            Filter::Completed => task.is_completed,
        }
    }
}

/// View state for the terminal frontend: a local cache of the server's task
/// list plus the transient bits of UI state. The cache only changes from
/// server responses; failed calls leave it untouched.
#[derive(Debug, Default)]
struct View {
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
    filter: Filter,
    draft: String,
}

impl View {
    fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish_load(&mut self, result: Result<Vec<Task>>) {
        self.loading = false;
        match result {
            Ok(tasks) => self.tasks = tasks,
            Err(err) => self.error = Some(format!("{err:#}")),
        }
    }

    /// Local presence check: a blank draft never reaches the API. Returns the
    /// text to submit; the draft is cleared only once the server confirms.
    fn submit_draft(&self) -> Option<String> {
        let text = self.draft.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    fn apply_created(&mut self, task: Task) {
        self.tasks.push(task);
        self.draft.clear();
    }

    /// Replaces the matching cached record with the server's copy. The server
    /// response is the source of truth, not a local flip.
    fn apply_updated(&mut self, updated: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            *slot = updated;
        }
    }

    fn apply_deleted(&mut self, id: u64) {
        self.tasks.retain(|t| t.id != id);
    }

    fn set_error(&mut self, err: anyhow::Error) {
        self.error = Some(format!("{err:#}"));
    }

    fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Derived on every render from the cache and the filter; no network call.
    fn visible(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Add(String),
    Toggle(u64),
    Delete(u64),
    Edit(u64, String),
    SetFilter(Filter),
    Refresh,
    Dismiss,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head {
        "" | "list" | "ls" => Ok(Command::List),
        "add" | "a" => Ok(Command::Add(rest.to_string())),
        "toggle" | "t" => rest
            .parse()
            .map(Command::Toggle)
            .map_err(|_| format!("toggle needs a task id, got '{rest}'")),
        "del" | "delete" | "rm" => rest
            .parse()
            .map(Command::Delete)
            .map_err(|_| format!("del needs a task id, got '{rest}'")),
        "edit" | "e" => {
            let (id_raw, text) = match rest.split_once(char::is_whitespace) {
                Some((id_raw, text)) => (id_raw, text.trim()),
                None => (rest, ""),
            };
            id_raw
                .parse()
                .map(|id| Command::Edit(id, text.to_string()))
                .map_err(|_| format!("edit needs a task id, got '{id_raw}'"))
        }
        "filter" | "f" => Filter::parse(rest)
            .map(Command::SetFilter)
            .ok_or_else(|| format!("unknown filter '{rest}' (all, active, completed)")),
        "refresh" | "r" => Ok(Command::Refresh),
        "dismiss" => Ok(Command::Dismiss),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

fn render(view: &View) {
    let now = Local::now().format("%H:%M:%S");
    if view.loading {
        println!("[{now}] loading...");
    }
    if let Some(err) = &view.error {
        println!("[{now}] error: {err} ('dismiss' to clear)");
    }
    let visible = view.visible();
    println!(
        "[{now}] tasks filter={} showing {}/{}",
        view.filter.as_str(),
        visible.len(),
        view.tasks.len()
    );
    for task in visible {
        let mark = if task.is_completed { "x" } else { " " };
        println!("  [{mark}] #{} {}", task.id, task.description);
    }
}

fn print_help() {
    println!("commands:");
    println!("  list                  render the cached task list");
    println!("  add <text>            create a task");
    println!("  toggle <id>           flip a task's completion flag");
    println!("  edit <id> <text>      replace a task's description");
    println!("  del <id>              delete a task");
    println!("  filter all|active|completed");
    println!("  refresh               reload the list from the server");
    println!("  dismiss               clear the error banner");
    println!("  quit");
}

fn execute(view: &mut View, client: &Client, base: &str, cmd: Command) -> bool {
    match cmd {
        Command::List => {}
        Command::Add(text) => {
            view.draft = text;
            match view.submit_draft() {
                Some(description) => match create_task(client, base, &description) {
                    Ok(task) => view.apply_created(task),
                    Err(err) => view.set_error(err),
                },
                None => println!("nothing to add (empty description)"),
            }
        }
        Command::Toggle(id) => match toggle_task(client, base, id) {
            Ok(task) => view.apply_updated(task),
            Err(err) => view.set_error(err),
        },
        Command::Edit(id, text) => match update_task(client, base, id, &text) {
            Ok(task) => view.apply_updated(task),
            Err(err) => view.set_error(err),
        },
        Command::Delete(id) => match delete_task(client, base, id) {
            Ok(()) => view.apply_deleted(id),
            Err(err) => view.set_error(err),
        },
        Command::SetFilter(filter) => view.filter = filter,
        Command::Refresh => {
            view.begin_load();
            let loaded = fetch_tasks(client, base);
            view.finish_load(loaded);
        }
        Command::Dismiss => view.dismiss_error(),
        Command::Help => {
            print_help();
            return true;
        }
        Command::Quit => return false,
    }
    render(view);
    true
}

fn main() -> Result<()> {
    let args = Args::parse();
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .context("building http client")?;
    let base = args.base.trim_end_matches('/').to_string();

    let mut view = View {
        filter: Filter::parse(&args.filter)
            .ok_or_else(|| anyhow!("unknown filter: {}", args.filter))?,
        ..View::default()
    };

    view.begin_load();
    let loaded = fetch_tasks(&client, &base);
    view.finish_load(loaded);

    if args.json {
        println!("{}", serde_json::to_string(&view.tasks)?);
    } else {
        render(&view);
    }
    if args.once {
        return Ok(());
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match parse_command(&line) {
            Ok(cmd) => {
                if !execute(&mut view, &client, &base, cmd) {
                    break;
                }
            }
            Err(msg) => println!("{msg}"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(id: u64, description: &str, is_completed: bool) -> Task {
        Task {
            id,
            description: description.to_string(),
            is_completed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn filter_predicates_split_on_completion() {
        let open = task(1, "open", false);
        let done = task(2, "done", true);
        assert!(Filter::All.matches(&open) && Filter::All.matches(&done));
        assert!(Filter::Active.matches(&open) && !Filter::Active.matches(&done));
        assert!(!Filter::Completed.matches(&open) && Filter::Completed.matches(&done));
    }

    #[test]
    fn parse_command_covers_the_surface() {
        assert_eq!(parse_command("list"), Ok(Command::List));
        assert_eq!(parse_command(""), Ok(Command::List));
        assert_eq!(
            parse_command("add Buy milk"),
            Ok(Command::Add("Buy milk".into()))
        );
        assert_eq!(parse_command("toggle 3"), Ok(Command::Toggle(3)));
        assert_eq!(parse_command("del 4"), Ok(Command::Delete(4)));
        assert_eq!(
            parse_command("edit 2 Call plumber"),
            Ok(Command::Edit(2, "Call plumber".into()))
        );
        assert_eq!(
            parse_command("filter active"),
            Ok(Command::SetFilter(Filter::Active))
        );
        assert_eq!(parse_command("refresh"), Ok(Command::Refresh));
        assert_eq!(parse_command("dismiss"), Ok(Command::Dismiss));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert!(parse_command("toggle abc").is_err());
        assert!(parse_command("filter sometimes").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn blank_draft_is_rejected_locally() {
        let mut view = View::default();
        view.draft = "   \t".to_string();
        assert!(view.submit_draft().is_none());
        // Draft stays in the buffer for the user to fix.
        assert_eq!(view.draft, "   \t");
    }

    #[test]
    fn apply_created_appends_and_clears_draft() {
        let mut view = View::default();
        view.draft = "Buy milk".to_string();
        assert_eq!(view.submit_draft().as_deref(), Some("Buy milk"));
        view.apply_created(task(1, "Buy milk", false));
        assert_eq!(view.tasks.len(), 1);
        assert!(view.draft.is_empty());
    }

    #[test]
    fn load_failure_sets_error_and_keeps_cache() {
        let mut view = View::default();
        view.tasks = vec![task(1, "keep me", false)];
        view.begin_load();
        assert!(view.loading);
        assert!(view.error.is_none());
        view.finish_load(Err(anyhow!("boom")));
        assert!(!view.loading);
        assert_eq!(view.error.as_deref(), Some("boom"));
        assert_eq!(view.tasks.len(), 1);
    }

    #[test]
    fn apply_updated_replaces_only_the_matching_record() {
        let mut view = View::default();
        view.tasks = vec![task(1, "one", false), task(2, "two", false)];
        view.apply_updated(task(2, "two (renamed)", true));
        assert_eq!(view.tasks[0].description, "one");
        assert_eq!(view.tasks[1].description, "two (renamed)");
        assert!(view.tasks[1].is_completed);
        // Unknown ids are a no-op; the cache is only ever server-shaped.
        view.apply_updated(task(9, "ghost", true));
        assert_eq!(view.tasks.len(), 2);
    }

    #[test]
    fn apply_deleted_removes_only_the_matching_record() {
        let mut view = View::default();
        view.tasks = vec![task(1, "one", false), task(2, "two", true)];
        view.apply_deleted(1);
        let ids: Vec<u64> = view.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn dismiss_clears_the_banner_without_touching_tasks() {
        let mut view = View::default();
        view.tasks = vec![task(1, "still here", false)];
        view.set_error(anyhow!("transient"));
        assert!(view.error.is_some());
        view.dismiss_error();
        assert!(view.error.is_none());
        assert_eq!(view.tasks.len(), 1);
    }

    #[test]
    fn visible_is_derived_from_filter_and_cache() {
        let mut view = View::default();
        view.tasks = vec![
            task(1, "open", false),
            task(2, "done", true),
            task(3, "also open", false),
        ];
        view.filter = Filter::Active;
        let ids: Vec<u64> = view.visible().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        view.filter = Filter::Completed;
        let ids: Vec<u64> = view.visible().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
        view.filter = Filter::All;
        assert_eq!(view.visible().len(), 3);
    }
}
