use clap::{Parser, Subcommand};

/// OrganDietPlanner — plans and consumes the day's value-maximizing
/// diet across the food, booze, and spleen pools.
#[derive(Parser, Debug)]
#[command(name = "organ_diet_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the item catalog JSON file.
    #[arg(long, default_value = "catalog.json")]
    pub catalog: String,

    /// Path to the environment state JSON file.
    #[arg(long, default_value = "state.json")]
    pub state: String,

    /// Override the value of one ordinary turn.
    #[arg(long)]
    pub turn_value: Option<f64>,

    /// Override the expected turn budget.
    #[arg(long)]
    pub turns: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute and print the plan without consuming anything.
    Plan {
        /// Exclude items by name (fuzzy matched).
        #[arg(long)]
        ban: Vec<String>,
    },

    /// Compute the plan and consume it against the simulated state.
    Consume {
        /// Exclude items by name (fuzzy matched).
        #[arg(long)]
        ban: Vec<String>,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Compute the plan and write it out as CSV.
    Export {
        /// Output file path.
        #[arg(long, default_value = "diet_plan.csv")]
        out: String,
    },

    /// Reset values in the state file.
    Reset {
        /// Reset all organ usage to 0.
        #[arg(long)]
        organs: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan { ban: Vec::new() }
    }
}
