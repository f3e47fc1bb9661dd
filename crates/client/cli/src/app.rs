//! Interactive encounter loop: keys in, event lines out.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tokio::sync::mpsc;
use tracing::debug;

use encounter_core::{
    AttackOutcome, Combatant, Direction, EncounterEvent, SkillEffect, Turn, Winner,
};
use encounter_runtime::{
    EncounterRuntime, EncounterSetup, FixedDifficulty, PlayerCommand, PresentationRouter,
    SharedInput,
};

use crate::Options;

/// Messages from the blocking input thread to the async loop.
enum UiMessage {
    Command(PlayerCommand),
    Quit,
}

/// Restores the terminal even when the loop errors out.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

pub async fn run(options: Options) -> Result<()> {
    let mut runtime = EncounterRuntime::new(Box::new(FixedDifficulty(options.tier)));
    let mut events = runtime.subscribe();
    PresentationRouter::silent().spawn(runtime.subscribe());

    let shared_input = SharedInput::new();
    let mut setup = EncounterSetup::against(Combatant::enemy("Slime", 20, 10));
    setup.seed = options.seed;
    let handle = runtime.start_encounter(setup, Box::new(shared_input.clone()));

    let (message_tx, mut message_rx) = mpsc::unbounded_channel();
    let _guard = RawModeGuard::enable()?;
    std::thread::spawn(move || input_thread(shared_input, message_tx));

    line("Keys: j attack | k guard | l skills | b back | 1-3 cast | arrows/WASD + space for QTEs | q quit");

    loop {
        tokio::select! {
            event = events.recv() => {
                let Ok(event) = event else { break };
                let finished = matches!(event, EncounterEvent::Ended { .. });
                print_event(&event, &handle);
                if finished {
                    break;
                }
            }
            message = message_rx.recv() => {
                match message {
                    Some(UiMessage::Command(command)) => {
                        debug!(?command, "forwarding command");
                        if handle.send(command).await.is_err() {
                            break;
                        }
                    }
                    Some(UiMessage::Quit) | None => break,
                }
            }
        }
    }

    Ok(())
}

/// Blocking crossterm reader: directions and the trigger go straight into
/// the shared per-tick frame, command keys go to the async loop.
fn input_thread(input: SharedInput, messages: mpsc::UnboundedSender<UiMessage>) {
    loop {
        let Ok(event) = crossterm::event::read() else {
            return;
        };
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        else {
            continue;
        };

        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            let _ = messages.send(UiMessage::Quit);
            return;
        }

        let message = match code {
            KeyCode::Up | KeyCode::Char('w') => {
                input.press(Direction::Up);
                continue;
            }
            KeyCode::Right | KeyCode::Char('d') => {
                input.press(Direction::Right);
                continue;
            }
            KeyCode::Left | KeyCode::Char('a') => {
                input.press(Direction::Left);
                continue;
            }
            KeyCode::Down | KeyCode::Char('s') => {
                input.press(Direction::Down);
                continue;
            }
            KeyCode::Char(' ') => {
                input.trigger();
                continue;
            }
            KeyCode::Char('j') => UiMessage::Command(PlayerCommand::Attack),
            KeyCode::Char('k') => UiMessage::Command(PlayerCommand::Guard),
            KeyCode::Char('l') => UiMessage::Command(PlayerCommand::OpenSkills),
            KeyCode::Char('b') | KeyCode::Esc => UiMessage::Command(PlayerCommand::Back),
            KeyCode::Char(c @ '1'..='9') => {
                UiMessage::Command(PlayerCommand::CastSkill(c as usize - '1' as usize))
            }
            KeyCode::Char('q') => UiMessage::Quit,
            _ => continue,
        };

        if messages.send(message).is_err() {
            return;
        }
    }
}

fn print_event(event: &EncounterEvent, handle: &encounter_runtime::EncounterHandle) {
    match event {
        EncounterEvent::Started { enemy_name, tier } => {
            line(&format!("A wild {enemy_name} appears! (tier {tier})"));
        }
        EncounterEvent::TurnStarted { turn: Turn::Player } => {
            let view = handle.view();
            line(&format!(
                "-- Player turn -- HP {} | AP {} | {} HP {}",
                view.player_hp, view.player_ap, view.enemy_name, view.enemy_hp
            ));
        }
        EncounterEvent::TurnStarted { turn: Turn::Enemy } => {}
        EncounterEvent::ApGranted { current, maximum } => {
            line(&format!("AP: {current}/{maximum}"));
        }
        EncounterEvent::AttackResolved {
            outcome, damage, ..
        } => match outcome {
            AttackOutcome::Dodged => line("Enemy dodged!"),
            AttackOutcome::Guarded => line(&format!("Enemy guarded. You deal {damage}.")),
            AttackOutcome::Hit => line(&format!("You deal {damage}.")),
        },
        EncounterEvent::GuardRaised => line("You brace yourself (Guard)."),
        EncounterEvent::GuardAbsorbed { damage, .. } => {
            line(&format!("Enemy attacks -- guarded! You take {damage}."));
        }
        EncounterEvent::SkillSelectionOpened => {
            let mut prompt = String::from("Choose a skill:");
            for (i, skill) in skill_menu().iter().enumerate() {
                prompt.push_str(&format!(" [{}] {}", i + 1, skill));
            }
            line(&prompt);
        }
        EncounterEvent::SkillSelectionClosed => line("Back to actions."),
        EncounterEvent::SequenceStarted {
            skill,
            targets,
            budget,
        } => {
            let arrows: String = targets.iter().map(|d| glyph(*d)).collect();
            line(&format!("{skill}: press {arrows} within {budget:.1}s"));
        }
        EncounterEvent::SkillCast { skill, effect, .. } => match effect {
            SkillEffect::Heal(amount) => line(&format!("+{amount} HP")),
            SkillEffect::Damage(amount) => line(&format!("{skill} hits {amount}!")),
        },
        EncounterEvent::SkillFailed { .. } => line("Skill failed or not enough AP."),
        EncounterEvent::DefenseStarted { duration } => {
            line(&format!(
                "Enemy attacks! Time the defense (space, {duration:.2}s window)..."
            ));
        }
        EncounterEvent::DefenseResolved { tier, damage, .. } => {
            line(&format!("Defense: {tier:?}. You take {damage}."));
        }
        EncounterEvent::Ended { winner } => match winner {
            Winner::Player => line("Victory!"),
            Winner::Enemy => line("Defeat..."),
        },
    }
}

/// Skill labels with cost, e.g. `Heal (2 AP)`. The loadout is fixed per
/// encounter, so the menu describes the defaults.
fn skill_menu() -> Vec<String> {
    encounter_core::Skill::player_loadout()
        .iter()
        .map(|s| format!("{} ({} AP)", s.label, s.cost))
        .collect()
}

fn glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Right => '>',
        Direction::Left => '<',
        Direction::Down => 'v',
    }
}

/// Raw mode needs explicit carriage returns.
fn line(text: &str) {
    print!("{text}\r\n");
}
