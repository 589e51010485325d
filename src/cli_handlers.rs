use crate::config::StoreConfig;
use crate::error::{Result, TodoError};
use crate::models::{Todo, TodoInput};
use crate::store::TodoStore;
use serde_json::json;
use std::io::{self, BufRead, Write};

/// Handle the init command
pub fn handle_init(config: &StoreConfig, json: bool) -> Result<()> {
    if json {
        print_json(&json!({ "path": config.path.display().to_string() }))?;
    } else {
        println!("Initialized todo store at {}", config.path.display());
    }
    Ok(())
}

/// Handle the add command
pub async fn handle_add(store: &TodoStore, title: &str, desc: &str, json: bool) -> Result<()> {
    let input = TodoInput::new(title, desc)?;
    let todo = store.insert(&input.title, &input.desc).await?;

    if json {
        print_json(&todo)?;
    } else {
        println!("Created todo #{}: {}", todo.id, todo.title);
    }
    Ok(())
}

/// Handle the list command
pub async fn handle_list(store: &TodoStore, json: bool) -> Result<()> {
    let todos = store.list().await?;

    if json {
        return print_json(&todos);
    }

    if todos.is_empty() {
        println!("No todos yet.");
        return Ok(());
    }

    for todo in &todos {
        println!("  [#{:>3}] {}", todo.id, todo.title);
        if !todo.desc.is_empty() {
            println!("         {}", todo.desc);
        }
        println!("         {}", format_created(todo));
    }
    Ok(())
}

/// Handle the show command
pub async fn handle_show(store: &TodoStore, id: i64, json: bool) -> Result<()> {
    let todo = store.get(id).await?.ok_or(TodoError::NotFound(id))?;

    if json {
        return print_json(&todo);
    }

    println!("[#{}] {}", todo.id, todo.title);
    println!("Created:  {}", format_created(&todo));
    println!("Details");
    if todo.desc.is_empty() {
        println!("No description provided.");
    } else {
        println!("{}", todo.desc);
    }
    Ok(())
}

/// Handle the edit command
pub async fn handle_edit(
    store: &TodoStore,
    id: i64,
    title: Option<&str>,
    desc: Option<&str>,
    json: bool,
) -> Result<()> {
    let current = store.get(id).await?.ok_or(TodoError::NotFound(id))?;

    let input = TodoInput::new(
        title.unwrap_or(current.title.as_str()),
        desc.unwrap_or(current.desc.as_str()),
    )?;

    if !store.update(id, &input.title, &input.desc).await? {
        return Err(TodoError::NotFound(id));
    }

    let updated = Todo {
        title: input.title,
        desc: input.desc,
        ..current
    };

    if json {
        print_json(&updated)?;
    } else {
        println!("Updated todo #{}: {}", updated.id, updated.title);
    }
    Ok(())
}

/// Handle the delete command
pub async fn handle_delete(store: &TodoStore, id: i64, yes: bool, json: bool) -> Result<()> {
    if !yes {
        let stdin = io::stdin();
        if !confirm("Delete this todo?", &mut stdin.lock(), &mut io::stderr())? {
            if json {
                print_json(&json!({ "id": id, "deleted": false, "cancelled": true }))?;
            } else {
                println!("Cancelled.");
            }
            return Ok(());
        }
    }

    let deleted = store.delete(id).await?;

    if json {
        print_json(&json!({ "id": id, "deleted": deleted }))?;
    } else if deleted {
        println!("Deleted todo #{id}");
    } else {
        println!("Todo #{id} does not exist, nothing deleted");
    }
    Ok(())
}

/// Ask a yes/no question on `prompt_out`; anything but `y`/`yes` declines.
/// Callers pass stderr so stdout carries only results.
fn confirm<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    prompt_out: &mut W,
) -> Result<bool> {
    write!(prompt_out, "{prompt} [y/N] ")?;
    prompt_out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn format_created(todo: &Todo) -> String {
    match todo.created() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => todo.created_at.to_string(),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
