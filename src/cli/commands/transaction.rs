use crate::cli::core::{short_id, CommandError, CommandResult, ShellContext, SHORT_ID_LEN};
use crate::cli::io;
use crate::cli::output::{block, section as output_section};
use crate::cli::table::{Table, TableColumn};
use crate::core::services::validation::{self, EntryKind};
use crate::core::services::TransactionService;
use crate::currency::format_date;
use crate::domain::{Displayable, MonthKey, TransactionFilter, TransactionUpdate};

use super::{parse_assignments, split_action, CommandDefinition};

const USAGE: &str = "transaction add <expense|income> <amount> <YYYY-MM-DD> <category> <description>\n         \
transaction edit <id> [kind=..] [amount=..] [date=..] [description=..] [category=..]\n         \
transaction delete <id>\n         \
transaction list [YYYY-MM|all] [category]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "transaction",
        "Add, edit, delete, or list transactions",
        USAGE,
        cmd_transaction,
    )]
}

fn cmd_transaction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (action, rest) = split_action(args, USAGE)?;
    match action.as_str() {
        "add" => add(context, rest),
        "edit" => edit(context, rest),
        "delete" | "remove" => delete(context, rest),
        "list" => list(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown transaction action `{}`",
            other
        ))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount, date, category, description @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction add <expense|income> <amount> <YYYY-MM-DD> <category> <description>"
                .into(),
        ));
    };
    let kind = EntryKind::parse(kind)?;
    let category_id = context.resolve_category(category)?.id.clone();
    let data = validation::transaction_input(
        context.store.snapshot(),
        kind,
        amount,
        date,
        &description.join(" "),
        category_id.as_str(),
    )?;
    let summary = format!("{} on {}", context.money(data.amount), format_date(data.date));
    let id = context.store.add_transaction(data)?;
    io::print_success(format!(
        "Added transaction {} ({}).",
        &id.to_string()[..SHORT_ID_LEN],
        summary
    ));
    Ok(())
}

fn edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [token, assignments @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction edit <id> key=value...".into(),
        ));
    };
    if assignments.is_empty() {
        return Err(CommandError::InvalidArguments(
            "nothing to change; pass key=value pairs".into(),
        ));
    }
    let current = context.resolve_transaction(token)?.clone();

    let mut kind = EntryKind::of(current.amount);
    let mut magnitude = current.amount.abs();
    let mut update = TransactionUpdate::default();
    for (key, value) in parse_assignments(assignments)? {
        match key.as_str() {
            "kind" | "type" => kind = EntryKind::parse(value)?,
            "amount" => magnitude = validation::parse_amount(value)?.abs(),
            "date" => update.date = Some(validation::parse_date(value)?),
            "description" => update.description = Some(validation::validate_description(value)?),
            "category" => {
                let id = context.resolve_category(value)?.id.clone();
                update.category_id = Some(validation::validate_category_ref(
                    context.store.snapshot(),
                    id.as_str(),
                )?);
            }
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown transaction field `{}`",
                    other
                )))
            }
        }
    }
    let amount = kind.apply(magnitude);
    if amount != current.amount {
        update.amount = Some(amount);
    }

    context.store.update_transaction(current.id, update)?;
    io::print_success(format!("Updated transaction {}.", short_id(&current)));
    Ok(())
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [token] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction delete <id>".into(),
        ));
    };
    let target = context.resolve_transaction(token)?.clone();
    if !context.confirm(&format!("Delete `{}`?", target.display_label()))? {
        io::print_info("Delete cancelled.");
        return Ok(());
    }
    context.store.delete_transaction(target.id)?;
    io::print_success(format!(
        "Deleted transaction {} ({}).",
        short_id(&target),
        target.description
    ));
    Ok(())
}

fn list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = match args.first() {
        None => Some(MonthKey::current()),
        Some(value) if value.eq_ignore_ascii_case("all") => None,
        Some(value) => Some(value.parse::<MonthKey>()?),
    };
    let category = match args.get(1) {
        Some(token) => Some(context.resolve_category(token)?.id.clone()),
        None => None,
    };
    let filter = TransactionFilter { month, category };
    let matches = TransactionService::filtered(context.store.snapshot(), &filter);

    output_section(match month {
        Some(month) => format!("Transactions for {}", month.label()),
        None => "All transactions".to_string(),
    });
    if matches.is_empty() {
        io::print_info("No transactions found.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Description").max_width(32),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
    ]);
    for txn in &matches {
        table.push_row(vec![
            short_id(txn),
            format_date(txn.date),
            txn.description.clone(),
            context.category_name(&txn.category_id),
            context.money(txn.amount),
        ]);
    }
    block(&table.render());
    io::print_info(format!("{} transaction(s).", matches.len()));
    Ok(())
}
