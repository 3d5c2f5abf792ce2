use crate::cli::core::{short_id, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{block, current_preferences, section as output_section};
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{BudgetService, SummaryService};
use crate::currency::{format_date, format_percent};
use crate::domain::MonthKey;

use super::CommandDefinition;

const BAR_WIDTH: usize = 30;
const CHART_USAGE: &str = "chart <monthly|breakdown> [YYYY-MM]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "summary",
            "Dashboard totals for a month",
            "summary [YYYY-MM]",
            cmd_summary,
        ),
        CommandDefinition::new(
            "budget",
            "Compare spending with each category budget",
            "budget [YYYY-MM]",
            cmd_budget,
        ),
        CommandDefinition::new(
            "chart",
            "Monthly expense trend or category breakdown",
            CHART_USAGE,
            cmd_chart,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = context.month_arg(args.first().copied())?;
    let summary = SummaryService::dashboard(
        context.store.snapshot(),
        month,
        context.config.recent_transactions,
    );

    output_section(format!("Summary for {}", month.label()));
    io::print_info(format!("  Total budget   : {}", context.money(summary.total_budget)));
    io::print_info(format!(
        "  Total expenses : {} ({} of budget)",
        context.money(summary.total_expenses),
        format_percent(summary.budget_percentage)
    ));
    io::print_info(format!("  Total income   : {}", context.money(summary.total_income)));
    if summary.is_over_budget() {
        io::print_warning(format!(
            "Over budget by {}.",
            context.money(-summary.budget_remaining)
        ));
    } else {
        io::print_info(format!(
            "  Remaining      : {}",
            context.money(summary.budget_remaining)
        ));
    }

    if let Some(top) = summary.top_categories.first() {
        io::print_info(format!(
            "  Top category   : {} ({})",
            top.name,
            context.money(top.amount)
        ));
    }

    output_section("Recent transactions");
    if summary.recent_transactions.is_empty() {
        io::print_info("No transactions yet.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Description").max_width(32),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
    ]);
    for txn in &summary.recent_transactions {
        table.push_row(vec![
            short_id(txn),
            format_date(txn.date),
            txn.description.clone(),
            context.category_name(&txn.category_id),
            context.money(txn.amount),
        ]);
    }
    block(&table.render());
    Ok(())
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = context.month_arg(args.first().copied())?;
    let ledger = context.store.snapshot();
    let rows = BudgetService::budget_comparison(ledger, Some(month));

    output_section(format!("Budget for {}", month.label()));
    if rows.is_empty() {
        io::print_info("No category has a budget.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Budget"),
        TableColumn::right("Spent"),
        TableColumn::right("Remaining"),
        TableColumn::right("Over"),
        TableColumn::right("Used"),
    ]);
    for row in &rows {
        table.push_row(vec![
            row.name.clone(),
            context.money(row.budget),
            context.money(row.spent),
            context.money(row.remaining),
            context.money(row.overspent),
            format_percent(row.percent),
        ]);
    }
    block(&table.render());
    io::print_info(format!(
        "Total: {} of {} ({})",
        context.money(BudgetService::total_expenses(ledger, Some(month))),
        context.money(BudgetService::monthly_budget_total(ledger)),
        format_percent(BudgetService::overall_progress(ledger, Some(month)))
    ));
    for row in rows.iter().filter(|row| row.overspent > 0.0) {
        io::print_warning(format!(
            "{} is over budget by {}.",
            row.name,
            context.money(row.overspent)
        ));
    }
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(kind) = args.first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {}", CHART_USAGE)));
    };
    let month = context.month_arg(args.get(1).copied())?;
    match kind.to_ascii_lowercase().as_str() {
        "monthly" | "trend" => monthly_chart(context, month),
        "breakdown" | "categories" => breakdown_chart(context, month),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown chart `{}`; usage: {}",
            other, CHART_USAGE
        ))),
    }
}

fn monthly_chart(context: &ShellContext, month: MonthKey) -> CommandResult {
    let series = SummaryService::monthly_expenses(
        context.store.snapshot(),
        month,
        context.config.chart_months,
    );
    output_section(format!("Monthly expenses through {}", month.label()));
    let peak = series.iter().map(|point| point.expenses).fold(0.0, f64::max);
    let lines: Vec<String> = series
        .iter()
        .map(|point| {
            format!(
                "  {} {} {} {}",
                point.label,
                point.month.year(),
                bar(point.expenses, peak),
                context.money(point.expenses)
            )
        })
        .collect();
    block(&lines.join("\n"));
    Ok(())
}

fn breakdown_chart(context: &ShellContext, month: MonthKey) -> CommandResult {
    let shares = SummaryService::category_breakdown(context.store.snapshot(), Some(month));
    output_section(format!("Spending by category, {}", month.label()));
    if shares.is_empty() {
        io::print_info("No expenses recorded for this month.");
        return Ok(());
    }
    let width = shares.iter().map(|share| share.name.chars().count()).max().unwrap_or(0);
    let lines: Vec<String> = shares
        .iter()
        .map(|share| {
            format!(
                "  {:<width$} {} {} ({})",
                share.name,
                bar(share.share, 100.0),
                format_percent(share.share),
                context.money(share.amount),
                width = width
            )
        })
        .collect();
    block(&lines.join("\n"));
    Ok(())
}

fn bar(value: f64, max: f64) -> String {
    let filled = if max > 0.0 {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    let (full, empty) = if current_preferences().plain_mode {
        ('#', '.')
    } else {
        ('█', '·')
    };
    let filled = filled.min(BAR_WIDTH);
    format!(
        "{}{}",
        full.to_string().repeat(filled),
        empty.to_string().repeat(BAR_WIDTH - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_the_peak() {
        let full = bar(10.0, 10.0);
        assert_eq!(full.chars().count(), BAR_WIDTH);
        assert!(!full.contains('.') && !full.contains('·'));
        let empty = bar(0.0, 0.0);
        assert_eq!(empty.chars().count(), BAR_WIDTH);
        assert!(!empty.contains('#') && !empty.contains('█'));
    }
}
