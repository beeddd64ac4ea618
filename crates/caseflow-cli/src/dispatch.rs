use anyhow::Result;
use caseflow_app::App;
use caseflow_core::demand::DemandKind;
use comfy_table::{Cell, ContentArrangement, Table};

use crate::cli::{Cli, Command};

pub fn run_with_deps(cli: Cli, app: &mut App) -> Result<()> {
    match cli.command {
        Some(Command::Status) => run_status_command(app),
        Some(Command::Demand) => run_demand_command(app),
        Some(Command::Reset) => run_reset_command(app),
        None => run_root_command(app),
    }
}

fn run_root_command(app: &mut App) -> Result<()> {
    let _ = caseflow_tui::run_wizard(app)?;
    Ok(())
}

fn run_status_command(app: &App) -> Result<()> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec![
        Cell::new("Current step"),
        Cell::new(app.current_step().as_str()),
    ]);
    for row in app.order_summary() {
        table.add_row(vec![Cell::new(row.label.as_str()), Cell::new(row.value.as_str())]);
    }

    println!("{table}");
    if !app.is_hydrated() {
        println!("No saved order found; showing defaults.");
    }
    Ok(())
}

fn run_demand_command(app: &App) -> Result<()> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Kind", "Search"]);

    let mut total = 0usize;
    for kind in [DemandKind::Brand, DemandKind::Model] {
        for entry in app.demand_entries(kind) {
            table.add_row(vec![Cell::new(kind.label()), Cell::new(entry.as_str())]);
            total += 1;
        }
    }

    println!("{table}");
    println!("{total} logged searches without results");
    Ok(())
}

fn run_reset_command(app: &mut App) -> Result<()> {
    app.reset_app();
    println!("Saved order cleared; wizard back at onboarding.");
    Ok(())
}
