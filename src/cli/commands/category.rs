use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{block, section as output_section};
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{validation, CategoryService};
use crate::currency::format_percent;
use crate::domain::{CategoryId, CategoryUpdate, Displayable};

use super::{parse_assignments, split_action, CommandDefinition};

const USAGE: &str = "category add <name> <hex-color> <budget> [icon]\n         \
category edit <category> [name=..] [color=..] [budget=..] [icon=..]\n         \
category delete <category>\n         \
category list [YYYY-MM]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "category",
        "Add, edit, delete, or list categories",
        USAGE,
        cmd_category,
    )]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (action, rest) = split_action(args, USAGE)?;
    match action.as_str() {
        "add" => add(context, rest),
        "edit" => edit(context, rest),
        "delete" | "remove" => delete(context, rest),
        "list" => list(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category action `{}`",
            other
        ))),
    }
}

/// `#` starts a comment on the shell line, so colors may be typed without it.
fn normalize_color(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{trimmed}")
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, color, budget, icon) = match args {
        [name, color, budget] => (name, color, budget, None),
        [name, color, budget, icon] => (name, color, budget, Some(icon.to_string())),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: category add <name> <hex-color> <budget> [icon]".into(),
            ))
        }
    };
    let mut data = validation::category_input(name, &normalize_color(color), budget)?;
    data.icon = icon;
    let display = data.name.clone();
    let id = context.store.add_category(data)?;
    io::print_success(format!("Added category `{}` ({}).", display, id));
    Ok(())
}

fn edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [token, assignments @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: category edit <category> key=value...".into(),
        ));
    };
    if assignments.is_empty() {
        return Err(CommandError::InvalidArguments(
            "nothing to change; pass key=value pairs".into(),
        ));
    }
    let id = context.resolve_category(token)?.id.clone();

    let mut update = CategoryUpdate::default();
    for (key, value) in parse_assignments(assignments)? {
        match key.as_str() {
            "name" => update.name = Some(validation::validate_name(value)?),
            "color" => update.color = Some(validation::validate_color(&normalize_color(value))?),
            "budget" => update.budget_amount = Some(validation::parse_budget(value)?),
            "icon" => update.icon = Some(value.trim().to_string()),
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown category field `{}`",
                    other
                )))
            }
        }
    }

    context.store.update_category(&id, update)?;
    io::print_success(format!("Updated category `{}`.", context.category_name(&id)));
    Ok(())
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [token] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: category delete <category>".into(),
        ));
    };
    let category = context.resolve_category(token)?.clone();
    CategoryService::ensure_removable(context.store.snapshot(), &category.id)?;

    let moved = context.store.transactions_by_category(&category.id).len();
    if !context.confirm(&format!("Delete category {}?", category.display_label()))? {
        io::print_info("Delete cancelled.");
        return Ok(());
    }
    context.store.delete_category(&category.id)?;
    io::print_success(format!("Deleted category `{}`.", category.name));
    if moved > 0 {
        io::print_info(format!(
            "Moved {} transaction(s) to `{}`.",
            moved,
            context.category_name(&CategoryId::fallback())
        ));
    }
    Ok(())
}

fn list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = context.month_arg(args.first().copied())?;
    output_section(format!("Categories ({})", month.label()));

    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Name"),
        TableColumn::left("Color"),
        TableColumn::right("Budget"),
        TableColumn::right("Spent"),
        TableColumn::right("Used"),
    ]);
    for category in CategoryService::list(context.store.snapshot()) {
        let spent = context
            .store
            .total_expenses_by_category(&category.id, Some(month));
        let used = if category.has_budget() {
            format_percent(context.store.budget_progress(&category.id, Some(month)))
        } else {
            "-".to_string()
        };
        table.push_row(vec![
            category.id.to_string(),
            category.name.clone(),
            category.color.clone(),
            context.money(category.budget_amount),
            context.money(spent),
            used,
        ]);
    }
    block(&table.render());
    Ok(())
}
