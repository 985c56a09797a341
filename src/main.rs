use std::io::{self, Write};
use std::panic;
use std::time::{Duration, Instant};

use clap::Parser;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use ratatui::Frame;

use gated_snake::config::INPUT_POLL_INTERVAL_MS;
use gated_snake::engine::{Session, TickEvent};
use gated_snake::input::{poll_input, Direction, GameInput};
use gated_snake::mission::StageController;
use gated_snake::renderer;
use gated_snake::terminal_runtime::{restore_terminal_best_effort, TerminalGuard};
use gated_snake::ui::menu;

#[derive(Debug, Parser)]
#[command(name = "gated-snake", about = "A mission-driven snake game with teleport gates")]
struct Cli {
    /// Seed for reproducible runs. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Stage to start on.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=4))]
    stage: u32,
}

/// Which overlay (if any) sits on top of the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Screen {
    Menu { selected: usize },
    HowToPlay,
    Playing,
    GameOver,
    StageClear,
    Ending,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    install_panic_hook();
    run(cli)
}

fn run(cli: Cli) -> io::Result<()> {
    let mut guard = TerminalGuard::enter()?;

    let mut seeds = StdRng::seed_from_u64(cli.seed.unwrap_or_else(rand::random));
    let mut controller = StageController::new(cli.stage);
    let mut session = Session::new(controller.stage(), seeds.next_u64());
    let mut screen = Screen::Menu { selected: 0 };
    let mut last_tick = Instant::now();

    loop {
        guard
            .terminal_mut()
            .draw(|frame| draw(frame, &session, screen))?;

        if let Some(input) = poll_input(Duration::from_millis(INPUT_POLL_INTERVAL_MS))? {
            if input == GameInput::Quit {
                break;
            }
            if handle_input(&mut screen, &mut session, &mut controller, &mut seeds, input) {
                break;
            }
        }

        if screen == Screen::Playing
            && session.is_alive()
            && last_tick.elapsed() >= session.tick_interval()
        {
            if session.tick() {
                ring_bell_on_events(session.events());
                if session.events().contains(&TickEvent::MissionsCompleted) {
                    screen = Screen::StageClear;
                }
            } else {
                screen = Screen::GameOver;
            }
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Routes one input event by screen. Returns `true` when the app should
/// exit.
fn handle_input(
    screen: &mut Screen,
    session: &mut Session,
    controller: &mut StageController,
    seeds: &mut StdRng,
    input: GameInput,
) -> bool {
    match *screen {
        Screen::Menu { selected } => match input {
            GameInput::Direction(Direction::Up) => {
                let count = menu::MENU_ITEMS.len();
                *screen = Screen::Menu {
                    selected: (selected + count - 1) % count,
                };
            }
            GameInput::Direction(Direction::Down) => {
                *screen = Screen::Menu {
                    selected: (selected + 1) % menu::MENU_ITEMS.len(),
                };
            }
            GameInput::Confirm => match selected {
                0 => {
                    *session = Session::new(controller.stage(), seeds.next_u64());
                    *screen = Screen::Playing;
                }
                1 => *screen = Screen::HowToPlay,
                _ => return true,
            },
            _ => {}
        },
        Screen::HowToPlay => {
            if input == GameInput::Confirm {
                *screen = Screen::Menu { selected: 1 };
            }
        }
        Screen::Playing => match input {
            GameInput::Direction(_) => session.apply_input(input),
            GameInput::ForceCompleteMissions => {
                session.apply_input(input);
                if session.missions.all_complete() {
                    *screen = Screen::StageClear;
                }
            }
            GameInput::ShowEnding => *screen = Screen::Ending,
            GameInput::JumpToStage(stage) => {
                controller.jump_to(stage);
                *session = Session::new(controller.stage(), seeds.next_u64());
            }
            _ => {}
        },
        Screen::GameOver => {
            if input == GameInput::Retry {
                *session = Session::new(controller.stage(), seeds.next_u64());
                *screen = Screen::Playing;
            }
        }
        Screen::StageClear => {
            if matches!(input, GameInput::Confirm | GameInput::Retry) {
                if controller.advance() {
                    *screen = Screen::Ending;
                } else {
                    *session = Session::new(controller.stage(), seeds.next_u64());
                    *screen = Screen::Playing;
                }
            }
        }
        Screen::Ending => {
            if matches!(input, GameInput::Confirm | GameInput::Retry) {
                controller.jump_to(1);
                *screen = Screen::Menu { selected: 0 };
            }
        }
    }

    false
}

fn draw(frame: &mut Frame<'_>, session: &Session, screen: Screen) {
    renderer::render(frame, session);

    let area = frame.area();
    match screen {
        Screen::Menu { selected } => menu::render_main_menu(frame, area, selected),
        Screen::HowToPlay => menu::render_how_to_play(frame, area),
        Screen::GameOver => {
            menu::render_game_over(frame, area, session.death_reason(), session.max_length);
        }
        Screen::StageClear => menu::render_stage_clear(frame, area, session.stage),
        Screen::Ending => menu::render_ending(frame, area),
        Screen::Playing => {}
    }
}

/// Emits the terminal bell for audible tick events (pickups and gate use).
fn ring_bell_on_events(events: &[TickEvent]) {
    let audible = events.iter().any(|event| {
        matches!(
            event,
            TickEvent::GateUsed
                | TickEvent::GrowthCollected
                | TickEvent::PoisonCollected
                | TickEvent::TimeCollected
        )
    });
    if audible {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "\u{0007}");
        let _ = stdout.flush();
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal_best_effort();
        default_hook(panic_info);
    }));
}
