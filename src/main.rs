use std::collections::HashSet;
use std::path::Path;

use clap::Parser;

use organ_diet_planner_rs::cli::{Cli, Command};
use organ_diet_planner_rs::env::{SimState, SimulatedEnvironment};
use organ_diet_planner_rs::error::Result;
use organ_diet_planner_rs::executor::DietExecutor;
use organ_diet_planner_rs::interface::{self, prompts};
use organ_diet_planner_rs::models::{DietPlan, Item};
use organ_diet_planner_rs::planner::{
    balance, BonusEncounters, EncounterSlots, ValueContext, DEFAULT_TURN_VALUE,
    ENCOUNTER_VALUE_MULT,
};
use organ_diet_planner_rs::state::{load_catalog, load_state, save_state};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or_default();

    match command {
        Command::Plan { ban } => cmd_plan(&cli, &ban),
        Command::Consume { ban, yes } => cmd_consume(&cli, &ban, yes),
        Command::Export { out } => cmd_export(&cli, &out),
        Command::Reset { organs } => cmd_reset(&cli, organs),
    }
}

fn load_inputs(cli: &Cli) -> Result<Option<(Vec<Item>, SimState)>> {
    for path in [&cli.catalog, &cli.state] {
        if !Path::new(path).exists() {
            eprintln!("File not found: {}", path);
            eprintln!("Both the catalog and the state file must exist.");
            return Ok(None);
        }
    }
    let items = load_catalog(&cli.catalog)?;
    let state = load_state(&cli.state)?;
    Ok(Some((items, state)))
}

fn planning_context(state: &SimState, cli: &Cli) -> (ValueContext, EncounterSlots) {
    let turn_value = cli.turn_value.unwrap_or(if state.turn_value > 0.0 {
        state.turn_value
    } else {
        DEFAULT_TURN_VALUE
    });
    let encounter_value = if state.encounter_value > 0.0 {
        state.encounter_value
    } else {
        turn_value * ENCOUNTER_VALUE_MULT
    };
    let ctx = ValueContext {
        turn_value,
        encounter_value,
        turn_budget: cli.turns.unwrap_or(state.turn_budget),
        bonus_encounters: state.base_encounters,
    };
    let slots = EncounterSlots {
        per_unit: state.encounter_slots.clone(),
        marginal: state.marginal_encounters,
    };
    (ctx, slots)
}

/// Drop banned items from the catalog, resolving each name fuzzily.
fn apply_bans(items: Vec<Item>, bans: &[String]) -> Result<Vec<Item>> {
    if bans.is_empty() {
        return Ok(items);
    }
    let names: Vec<String> = items.iter().map(|i| i.name.clone()).collect();
    let mut banned: HashSet<String> = HashSet::new();
    for raw in bans {
        if let Some(name) = prompts::resolve_item_name(raw, &names)? {
            println!("Excluding {}", name);
            banned.insert(name.to_lowercase());
        }
    }
    Ok(items
        .into_iter()
        .filter(|i| !banned.contains(&i.key()))
        .collect())
}

fn build_plan(
    items: &[Item],
    state: &SimState,
    cli: &Cli,
) -> Result<(DietPlan, EncounterSlots)> {
    let (ctx, slots) = planning_context(state, cli);
    let env = SimulatedEnvironment::new(state.clone(), items);
    println!("Using turn value {:.0}.", ctx.turn_value);
    let plan = balance(items, &ctx, &slots, &env)?;
    Ok((plan, slots))
}

fn cmd_plan(cli: &Cli, bans: &[String]) -> Result<()> {
    let Some((items, state)) = load_inputs(cli)? else {
        return Ok(());
    };
    let items = apply_bans(items, bans)?;
    let (plan, slots) = build_plan(&items, &state, cli)?;

    interface::display_diet(&plan, "SIMULATED");
    let estimate = BonusEncounters::from_plan(&plan, &slots);
    println!(
        "Expecting {:.1} bonus encounters and {:.1} extra turns from this diet.",
        estimate.encounters, estimate.extra_turns
    );
    Ok(())
}

fn cmd_consume(cli: &Cli, bans: &[String], yes: bool) -> Result<()> {
    let Some((items, state)) = load_inputs(cli)? else {
        return Ok(());
    };
    let items = apply_bans(items, bans)?;
    let (plan, _) = build_plan(&items, &state, cli)?;

    interface::display_diet(&plan, "FULL");
    if plan.is_empty() {
        println!("Nothing worth consuming today.");
        return Ok(());
    }

    let mut env = SimulatedEnvironment::new(state, &items);
    if !yes {
        if !prompts::confirm_missing_helpers(&plan, &env)? {
            println!("Aborted before consuming anything.");
            return Ok(());
        }
        if !prompts::confirm("Consume this diet?", true)? {
            println!("Aborted before consuming anything.");
            return Ok(());
        }
    }

    let outcome = DietExecutor::new(&mut env).consume(&plan);

    // Organ capacity already spent is real even when consumption
    // aborts partway; persist whatever the environment now reports.
    save_state(&cli.state, env.state())?;
    outcome?;

    println!("Diet consumed. State saved.");
    Ok(())
}

fn cmd_export(cli: &Cli, out: &str) -> Result<()> {
    let Some((items, state)) = load_inputs(cli)? else {
        return Ok(());
    };
    let (plan, _) = build_plan(&items, &state, cli)?;
    interface::write_plan_csv(&plan, out)?;
    println!("Wrote {} plan rows to {}.", plan.entries.len(), out);
    Ok(())
}

fn cmd_reset(cli: &Cli, organs: bool) -> Result<()> {
    if !organs {
        println!("Please specify a reset option:");
        println!("  --organs  Reset all organ usage to 0");
        return Ok(());
    }

    let path = Path::new(&cli.state);
    if !path.exists() {
        eprintln!("State file not found: {}", cli.state);
        return Ok(());
    }

    let mut state = load_state(path)?;
    state.organs.food_used = 0;
    state.organs.booze_used = 0;
    state.organs.spleen_used = 0;
    save_state(path, &state)?;
    println!("Reset organ usage. State saved.");
    Ok(())
}
