//! Play command - run a full engine-vs-engine match
//!
//! The engine owns none of this: the loop here alternates the two players,
//! renders each position, paces the display and reports the result.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;

use morris_core::{
    evaluate, player_pair, MorrisState, Outcome, Searcher, Side, Variant, Weights,
    DEFAULT_MAX_DEPTH,
};

use crate::render::render;

#[derive(Args)]
pub struct PlayArgs {
    /// Game variant to play
    #[arg(long, value_enum, default_value_t = VariantArg::Six)]
    pub variant: VariantArg,

    /// Search depth in plies
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub depth: u32,

    /// Pause between displayed moves, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub interval: u64,

    /// Stop an unresolved game after this many plies
    #[arg(long, default_value_t = 200)]
    pub max_plies: usize,

    /// Output a match summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum VariantArg {
    Six,
    Nine,
}

impl std::fmt::Display for VariantArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            VariantArg::Six => "six",
            VariantArg::Nine => "nine",
        })
    }
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Six => Variant::SixMens,
            VariantArg::Nine => Variant::NineMens,
        }
    }
}

/// Record of one finished (or cut off) match
#[derive(Clone, Debug, serde::Serialize)]
struct MatchRecord {
    variant: String,
    depth: u32,
    plies: Vec<String>,
    outcome: Option<String>,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let variant = Variant::from(args.variant);
    let (max_player, min_player) = player_pair(Searcher::new(args.depth));

    tracing::info!(?variant, depth = args.depth, "starting match");

    let mut state = MorrisState::new(variant);
    let mut plies: Vec<String> = Vec::new();
    println!("{}", render(&state));

    let mut player = &max_player;
    let mut opponent = &min_player;

    while state.utility().is_none() && plies.len() < args.max_plies {
        let start = Instant::now();
        let mv = player
            .decide(&state)
            .context("engine failed to produce a move")?;
        let elapsed = start.elapsed();

        let side = if player.maximizes() { "max" } else { "min" };
        tracing::info!(
            ply = plies.len() + 1,
            side,
            %mv,
            ms = elapsed.as_millis() as u64,
            "move chosen"
        );

        state = state.apply_move(mv, player.side());
        plies.push(format!("{side}: {mv}"));
        println!("{}", render(&state));

        if args.interval > 0 {
            thread::sleep(Duration::from_millis(args.interval));
        }
        std::mem::swap(&mut player, &mut opponent);
    }

    let outcome = state.utility();
    report(&args, variant, plies, outcome);
    Ok(())
}

fn report(args: &PlayArgs, variant: Variant, plies: Vec<String>, outcome: Option<Outcome>) {
    let verdict = outcome.map(|o| match o {
        Outcome::MaxWin => "max wins".to_string(),
        Outcome::MinWin => "min wins".to_string(),
    });

    if args.json {
        let record = MatchRecord {
            variant: format!("{variant:?}"),
            depth: args.depth,
            plies,
            outcome: verdict,
        };
        if let Ok(json) = serde_json::to_string_pretty(&record) {
            println!("{json}");
        }
        return;
    }

    match verdict {
        Some(verdict) => println!("Game over after {} plies: {}", plies.len(), verdict),
        None => println!("Stopped undecided after {} plies", plies.len()),
    }
}

// ============================================================================
// EVAL COMMAND
// ============================================================================

#[derive(Args)]
pub struct EvalArgs {
    /// Game variant
    #[arg(long, value_enum, default_value_t = VariantArg::Six)]
    pub variant: VariantArg,

    /// Search depth used to reach the inspected position
    #[arg(long, default_value_t = 2)]
    pub depth: u32,

    /// Engine plies to play before inspecting
    #[arg(long, default_value_t = 0)]
    pub plies: usize,
}

/// Play a scripted opening and dump the evaluation terms of the resulting
/// position; a quick sanity surface for weight tinkering
pub fn run_eval(args: EvalArgs) -> Result<()> {
    let variant = Variant::from(args.variant);
    let (max_player, min_player) = player_pair(Searcher::new(args.depth));

    let mut state = MorrisState::new(variant);
    let mut player = &max_player;
    let mut opponent = &min_player;

    for _ in 0..args.plies {
        if state.utility().is_some() {
            break;
        }
        let mv = player
            .decide(&state)
            .context("engine failed to produce a move")?;
        state = state.apply_move(mv, player.side());
        std::mem::swap(&mut player, &mut opponent);
    }

    println!("{}", render(&state));

    for side in [Side::Max, Side::Min] {
        let phase = state.phase(side);
        println!(
            "{side:?}: {} in hand, {} on board, {} mills, {} near mills, {} blocked ({phase:?})",
            state.in_hand(side),
            state.on_board(side),
            state.mill_count(side),
            state.near_mill_count(side, phase),
            state.blocked_count(side),
        );
    }

    let weights = Weights::default();
    println!(
        "evaluation: {:+.3} (max view) / {:+.3} (min view)",
        evaluate(&state, Side::Max, &weights),
        evaluate(&state, Side::Min, &weights),
    );
    match state.utility() {
        Some(outcome) => println!("utility: {:+.0}", outcome.value()),
        None => println!("utility: undecided"),
    }

    Ok(())
}
