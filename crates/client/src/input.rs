//! Line-based player input on stdin.
use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use combat_core::TurnAction;
use combat_runtime::{ChannelHandle, CombatantView, TurnView};

/// Answers every view from the session with a choice typed by the user.
///
/// Ends when the session drops its provider or stdin closes.
pub fn spawn_prompt(mut handle: ChannelHandle) -> JoinHandle<anyhow::Result<()>> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(view) = handle.views.recv().await {
            print_view(&view);
            let action = loop {
                print!("> ");
                std::io::stdout().flush()?;
                let Some(line) = lines.next_line().await? else {
                    tracing::info!("stdin closed, leaving the fight");
                    return Ok(());
                };
                match parse_choice(&line, &view) {
                    Some(action) => break action,
                    None => println!("enter a skill number or 'p' to pass"),
                }
            };
            if handle.actions.send(action).await.is_err() {
                break;
            }
        }
        Ok(())
    })
}

/// `p`/`pass`, or the 1-based position of a skill in the view.
pub fn parse_choice(line: &str, view: &TurnView) -> Option<TurnAction> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("p") || line.eq_ignore_ascii_case("pass") {
        return Some(TurnAction::Pass);
    }
    let index: usize = line.parse().ok()?;
    let choice = view.skills.get(index.checked_sub(1)?)?;
    Some(TurnAction::UseSkill(choice.id))
}

fn print_view(view: &TurnView) {
    println!();
    print_side(&view.player);
    print_side(&view.enemy);
    for (position, skill) in view.skills.iter().enumerate() {
        let status = match &skill.blocked_by {
            None => String::new(),
            Some(reason) => format!("  ({})", reason),
        };
        println!(
            "  {}. {} [{} energy]{}",
            position + 1,
            skill.name,
            skill.energy_cost,
            status
        );
    }
    println!("  p. pass");
}

fn print_side(side: &CombatantView) {
    let effects: Vec<String> = side
        .effects
        .iter()
        .map(|(kind, duration, stacks)| match stacks {
            0 | 1 => format!("{}({})", kind, duration),
            n => format!("{}x{}({})", kind, n, duration),
        })
        .collect();
    println!(
        "{}: {}/{} HP, {}/{} energy {}",
        side.name,
        side.health,
        side.max_health,
        side.energy,
        side.max_energy,
        effects.join(" ")
    );
}
