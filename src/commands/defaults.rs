//! Built-in commands
//!
//! Every default keybinding is an alias to one of these names, so they are
//! also what users call from the command dialog and `startup` config lines.

use std::path::Path;

use super::command::{Command, ExecutionPolicy, NativeFn};
use super::process;
use super::registry::CommandRegistry;
use crate::app::App;
use crate::keymap::{parse_key_sequence, Keybinding};
use crate::picker::DEFAULT_VIEW_TEMPLATE;
use crate::scope::extract_first_url;

/// Register the built-in command set
pub fn register_defaults(registry: &mut CommandRegistry) {
    let natives: &[(&str, NativeFn)] = &[
        ("read", read),
        ("quit", quit),
        ("view", view),
        ("bind", bind),
        ("delete", delete),
        ("command", command),
        ("show", show),
        ("open", open),
        ("select", select),
        ("select-all", select_all),
        ("clear-selections", clear_selections),
        ("invert-selections", invert_selections),
        ("preview", preview),
        ("preview-refresh", preview_refresh),
        // Front-end actions, bound to keys by default
        ("prompt", prompt),
        ("search", search),
        ("close", close),
        ("toggle", toggle),
        ("toggle-next", toggle_next),
        ("down", down),
        ("up", up),
        ("first", first),
        ("last", last),
        ("scroll-down", scroll_down),
        ("scroll-up", scroll_up),
    ];

    for &(name, callback) in natives {
        registry.register(name, Command::Native(callback));
    }

    registry.register_alias("cmd", "command");
    registry.register_alias("toggle-all", "invert-selections");
}

/// `read <delimiter> <file>`
fn read(app: &mut App, args: &[String]) -> bool {
    let [delimiter, file] = args else {
        return false;
    };
    let Some(delimiter) = delimiter.chars().next() else {
        return false;
    };

    let path = Path::new(file);
    if !path.is_file() {
        tracing::warn!("read: {} is not a regular file", path.display());
        return false;
    }

    match app.load(path, delimiter) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("read: {}", e);
            false
        }
    }
}

fn quit(app: &mut App, _args: &[String]) -> bool {
    app.request_exit();
    true
}

/// `view [template...]`
fn view(app: &mut App, args: &[String]) -> bool {
    if args.is_empty() {
        app.set_view_template(DEFAULT_VIEW_TEMPLATE);
    } else {
        app.set_view_template(&args.join(" "));
    }
    true
}

/// `bind <key> <policy> <template...>`
fn bind(app: &mut App, args: &[String]) -> bool {
    let Some((key, policy, template)) = split_definition(args) else {
        return false;
    };

    match parse_key_sequence(key) {
        Ok(keystrokes) => {
            app.keymap.add_binding(Keybinding::chord(
                keystrokes,
                Command::templated(template, policy),
            ));
            true
        }
        Err(e) => {
            tracing::warn!("bind: {}", e);
            false
        }
    }
}

/// `command <name> <policy> <template...>`
fn command(app: &mut App, args: &[String]) -> bool {
    let Some((name, policy, template)) = split_definition(args) else {
        return false;
    };

    app.commands
        .register(name, Command::templated(template, policy));
    true
}

/// Shared `<target> <policy> <template...>` argument shape
fn split_definition(args: &[String]) -> Option<(&str, ExecutionPolicy, String)> {
    match args {
        [target, policy, template @ ..] if !template.is_empty() => Some((
            target.as_str(),
            ExecutionPolicy::from_word(policy),
            template.join(" "),
        )),
        _ => None,
    }
}

fn delete(app: &mut App, _args: &[String]) -> bool {
    app.delete_focused()
}

/// `show [N]`
fn show(app: &mut App, args: &[String]) -> bool {
    match args.first() {
        None => {
            app.set_view_template(DEFAULT_VIEW_TEMPLATE);
            true
        }
        Some(field) => match field.parse::<usize>() {
            Ok(idx) => {
                app.set_view_template(&format!("{{{}}}", idx));
                true
            }
            Err(_) => false,
        },
    }
}

/// Open the first URL in the focused row
fn open(app: &mut App, _args: &[String]) -> bool {
    let Some(original) = app.picker.focused() else {
        return false;
    };
    let joined = app.picker.rows().joined_row(original, " ");
    let Some(url) = extract_first_url(&joined) else {
        app.set_status("no URL in row");
        return false;
    };

    match process::open_detached(url) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("open: {}", e);
            false
        }
    }
}

fn select(app: &mut App, _args: &[String]) -> bool {
    match app.picker.selection_output() {
        Some(output) => {
            app.finish_with(output);
            true
        }
        None => false,
    }
}

fn select_all(app: &mut App, _args: &[String]) -> bool {
    app.picker.select_all();
    true
}

fn clear_selections(app: &mut App, _args: &[String]) -> bool {
    app.picker.clear_selections();
    true
}

fn invert_selections(app: &mut App, _args: &[String]) -> bool {
    app.picker.invert_selections();
    true
}

fn preview(app: &mut App, _args: &[String]) -> bool {
    app.toggle_preview();
    true
}

fn preview_refresh(app: &mut App, _args: &[String]) -> bool {
    app.force_preview_refresh();
    true
}

fn prompt(app: &mut App, _args: &[String]) -> bool {
    app.open_command_dialog();
    true
}

fn search(app: &mut App, _args: &[String]) -> bool {
    app.focus_search();
    true
}

fn close(app: &mut App, _args: &[String]) -> bool {
    app.close()
}

/// Toggle the row under the cursor
fn toggle(app: &mut App, _args: &[String]) -> bool {
    let cursor = app.picker.cursor();
    app.picker.toggle_selection(cursor)
}

/// Toggle the row under the cursor, then move down
fn toggle_next(app: &mut App, args: &[String]) -> bool {
    let toggled = toggle(app, args);
    app.picker.move_cursor(1);
    toggled
}

/// Optional repeat count argument, default 1
fn count(args: &[String]) -> Option<isize> {
    match args.first() {
        None => Some(1),
        Some(n) => n.parse::<isize>().ok(),
    }
}

fn down(app: &mut App, args: &[String]) -> bool {
    let Some(n) = count(args) else {
        return false;
    };
    app.picker.move_cursor(n);
    true
}

fn up(app: &mut App, args: &[String]) -> bool {
    let Some(n) = count(args) else {
        return false;
    };
    app.picker.move_cursor(-n);
    true
}

fn first(app: &mut App, _args: &[String]) -> bool {
    app.picker.set_cursor(0);
    true
}

fn last(app: &mut App, _args: &[String]) -> bool {
    app.picker.set_cursor(usize::MAX);
    true
}

fn scroll_down(app: &mut App, args: &[String]) -> bool {
    count(args).is_some_and(|n| app.scroll(n))
}

fn scroll_up(app: &mut App, args: &[String]) -> bool {
    count(args).is_some_and(|n| app.scroll(-n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_defaults_registered() {
        let mut registry = CommandRegistry::new();
        register_defaults(&mut registry);

        for name in [
            "read",
            "quit",
            "view",
            "bind",
            "delete",
            "command",
            "cmd",
            "show",
            "open",
            "select",
            "select-all",
            "clear-selections",
            "invert-selections",
            "toggle-all",
            "preview",
            "preview-refresh",
        ] {
            assert!(registry.contains(name), "missing {}", name);
        }
        assert!(registry.get("cmd").is_some_and(Command::is_native));
    }

    #[test]
    fn test_split_definition() {
        let binding = args(&["e", "silent", "vim", "{0}"]);
        let parsed = split_definition(&binding);
        assert_eq!(
            parsed,
            Some(("e", ExecutionPolicy::Silent, "vim {0}".to_string()))
        );
        assert_eq!(split_definition(&args(&["e", "silent"])), None);
        assert_eq!(
            split_definition(&args(&["x", "whatever", "ls"])).map(|d| d.1),
            Some(ExecutionPolicy::Alias)
        );
    }

    #[test]
    fn test_count() {
        assert_eq!(count(&[]), Some(1));
        assert_eq!(count(&args(&["5"])), Some(5));
        assert_eq!(count(&args(&["five"])), None);
    }
}
