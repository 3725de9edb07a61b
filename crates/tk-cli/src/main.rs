//! Command-line frontend for the Tallykeep session aid.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tally",
    about = "Tallykeep - a tabletop session aid for attacks, counters, and turns",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data directory holding the persisted account
    #[arg(short, long, default_value = ".", global = true)]
    dir: PathBuf,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a plain dice expression, e.g. 2d6+3
    Roll {
        /// The expression to roll
        expression: String,
    },

    /// Show recent dice rolls
    History,

    /// Manage characters
    #[command(subcommand)]
    Character(CharacterCmd),

    /// Manage and resolve attacks
    #[command(subcommand)]
    Attack(AttackCmd),

    /// Manage resource counters
    #[command(subcommand)]
    Counter(CounterCmd),

    /// Manage toggleable states
    #[command(subcommand)]
    State(StateCmd),

    /// Manage damage-over-time effects
    #[command(subcommand)]
    Passive(PassiveCmd),

    /// Start or end the active character's turn
    #[command(subcommand)]
    Turn(TurnCmd),

    /// Take a rest: short or long
    Rest {
        /// The kind of rest: short or long
        kind: String,
    },

    /// Adjust the active character's hit points
    #[command(subcommand)]
    Hp(HpCmd),

    /// Critical hit configuration
    #[command(subcommand)]
    Crit(CritCmd),

    /// Export the account as pretty-printed JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a previously exported account, replacing the current one
    Import {
        /// The exported JSON file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum CharacterCmd {
    /// Create a character at full HP (the first one becomes active)
    Add {
        /// Character name
        name: String,

        /// Maximum hit points
        max_hp: i32,

        /// HP regained at the start of each turn
        #[arg(long, default_value = "0")]
        regen: i32,
    },

    /// List all characters
    List,

    /// Make a character active by name
    Switch {
        /// Character name (case-insensitive)
        name: String,
    },

    /// Show the active character in detail
    Show,

    /// Delete a character by name
    Remove {
        /// Character name (case-insensitive)
        name: String,
    },
}

#[derive(Subcommand)]
enum AttackCmd {
    /// Add an attack to the active character
    Add {
        /// Attack name
        name: String,

        /// Damage components, e.g. 2d6+3:slashing or 1d4:necrotic:ls50
        #[arg(required = true)]
        components: Vec<String>,

        /// Reroll pool dice, e.g. 2d6 or 1d6:min2 (repeatable)
        #[arg(short, long)]
        reroll: Vec<String>,
    },

    /// List the active character's attacks
    List,

    /// Delete an attack by name
    Remove {
        /// Attack name (case-insensitive)
        name: String,
    },

    /// Copy an attack under a new name
    Duplicate {
        /// Attack name (case-insensitive)
        name: String,
    },

    /// Resolve an attack and print the per-type damage
    Roll {
        /// Attack name (case-insensitive)
        name: String,

        /// Resolve as a critical hit under the character's rule
        #[arg(short, long)]
        critical: bool,

        /// Roll the reroll pool and replace the lowest matching dice
        #[arg(short, long)]
        reroll: bool,
    },
}

#[derive(Subcommand)]
enum CounterCmd {
    /// Add a counter to the active character
    Add {
        /// Counter name
        name: String,

        /// Maximum value
        max: i32,

        /// Starting value (default: the maximum)
        #[arg(long)]
        start: Option<i32>,

        /// Amount regained on a short rest
        #[arg(long, default_value = "0")]
        short_rest: i32,

        /// Amount regained on a long rest
        #[arg(long, default_value = "0")]
        long_rest: i32,
    },

    /// List the active character's counters
    List,

    /// Adjust a counter by a delta (clamped to its bounds)
    Bump {
        /// Counter name (case-insensitive)
        name: String,

        /// Signed amount to add
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },

    /// Set a counter to its maximum
    Max {
        /// Counter name (case-insensitive)
        name: String,
    },

    /// Delete a counter by name
    Remove {
        /// Counter name (case-insensitive)
        name: String,
    },
}

#[derive(Subcommand)]
enum StateCmd {
    /// Add a toggleable state to the active character
    Add {
        /// State name
        name: String,

        /// Counter the state spends from when activated
        #[arg(long)]
        counter: Option<String>,

        /// Amount applied to the linked counter on activation
        #[arg(long, default_value = "1")]
        cost: i32,

        /// Add to the linked counter instead of spending from it
        #[arg(long)]
        gain: bool,
    },

    /// List the active character's states
    List,

    /// Toggle a state on or off
    Toggle {
        /// State name (case-insensitive)
        name: String,
    },

    /// Delete a state by name
    Remove {
        /// State name (case-insensitive)
        name: String,
    },
}

#[derive(Subcommand)]
enum PassiveCmd {
    /// Add a damage-over-time effect to the active character
    Add {
        /// Effect name
        name: String,

        /// Damage components, e.g. 2d4+1:fire
        #[arg(required = true)]
        components: Vec<String>,

        /// Turns the effect lasts (0 = until removed)
        #[arg(long, default_value = "0")]
        duration: u32,
    },

    /// List the active character's effects
    List,

    /// Delete an effect by name
    Remove {
        /// Effect name (case-insensitive)
        name: String,
    },
}

#[derive(Subcommand)]
enum TurnCmd {
    /// Start the next turn, applying regeneration
    Start,

    /// End the turn, ticking timed effects
    End,
}

#[derive(Subcommand)]
enum HpCmd {
    /// Take damage (temporary HP is consumed first)
    Damage {
        /// Amount of damage
        amount: i32,
    },

    /// Heal up to maximum HP
    Heal {
        /// Amount to heal
        amount: i32,
    },

    /// Gain temporary hit points
    Temp {
        /// Amount of temporary HP
        amount: i32,
    },
}

#[derive(Subcommand)]
enum CritCmd {
    /// Show the active character's critical hit configuration
    Show,

    /// Set the critical hit rule
    Set {
        /// The rule: default or massive
        rule: String,

        /// Character level (used by the massive rule)
        #[arg(long)]
        level: Option<u32>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dir = cli.dir;
    let seed = cli.seed;

    let result = match cli.command {
        Commands::Roll { expression } => commands::roll::run(&dir, seed, &expression),
        Commands::History => commands::history::run(&dir),
        Commands::Character(cmd) => match cmd {
            CharacterCmd::Add { name, max_hp, regen } => {
                commands::character::add(&dir, &name, max_hp, regen)
            }
            CharacterCmd::List => commands::character::list(&dir),
            CharacterCmd::Switch { name } => commands::character::switch(&dir, &name),
            CharacterCmd::Show => commands::character::show(&dir),
            CharacterCmd::Remove { name } => commands::character::remove(&dir, &name),
        },
        Commands::Attack(cmd) => match cmd {
            AttackCmd::Add {
                name,
                components,
                reroll,
            } => commands::attack::add(&dir, &name, &components, &reroll),
            AttackCmd::List => commands::attack::list(&dir),
            AttackCmd::Remove { name } => commands::attack::remove(&dir, &name),
            AttackCmd::Duplicate { name } => commands::attack::duplicate(&dir, &name),
            AttackCmd::Roll {
                name,
                critical,
                reroll,
            } => commands::attack::roll(&dir, seed, &name, critical, reroll),
        },
        Commands::Counter(cmd) => match cmd {
            CounterCmd::Add {
                name,
                max,
                start,
                short_rest,
                long_rest,
            } => commands::counter::add(&dir, &name, max, start, short_rest, long_rest),
            CounterCmd::List => commands::counter::list(&dir),
            CounterCmd::Bump { name, delta } => commands::counter::bump(&dir, &name, delta),
            CounterCmd::Max { name } => commands::counter::set_max(&dir, &name),
            CounterCmd::Remove { name } => commands::counter::remove(&dir, &name),
        },
        Commands::State(cmd) => match cmd {
            StateCmd::Add {
                name,
                counter,
                cost,
                gain,
            } => commands::state::add(&dir, &name, counter.as_deref(), cost, gain),
            StateCmd::List => commands::state::list(&dir),
            StateCmd::Toggle { name } => commands::state::toggle(&dir, &name),
            StateCmd::Remove { name } => commands::state::remove(&dir, &name),
        },
        Commands::Passive(cmd) => match cmd {
            PassiveCmd::Add {
                name,
                components,
                duration,
            } => commands::passive::add(&dir, &name, &components, duration),
            PassiveCmd::List => commands::passive::list(&dir),
            PassiveCmd::Remove { name } => commands::passive::remove(&dir, &name),
        },
        Commands::Turn(cmd) => match cmd {
            TurnCmd::Start => commands::turn::start(&dir),
            TurnCmd::End => commands::turn::end(&dir),
        },
        Commands::Rest { kind } => commands::turn::rest(&dir, &kind),
        Commands::Hp(cmd) => match cmd {
            HpCmd::Damage { amount } => commands::hp::damage(&dir, amount),
            HpCmd::Heal { amount } => commands::hp::heal(&dir, amount),
            HpCmd::Temp { amount } => commands::hp::temp(&dir, amount),
        },
        Commands::Crit(cmd) => match cmd {
            CritCmd::Show => commands::crit::show(&dir),
            CritCmd::Set { rule, level } => commands::crit::set(&dir, &rule, level),
        },
        Commands::Export { output } => commands::transfer::export(&dir, output.as_deref()),
        Commands::Import { file } => commands::transfer::import(&dir, &file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
