use core::time::Duration;

use bevy::prelude::*;
use morfo_core::cleanup::despawn_all;
use morfo_core::round::GameRoundState;
use morfo_core::timers::{Countdowns, TimerSlot, format_clock};

use crate::ShellState;
use crate::screens::text;

#[derive(Component)]
struct Hud;

#[derive(Component)]
struct HudText;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(ShellState::Playing), spawn_hud)
            .add_systems(Update, update_hud.run_if(in_state(ShellState::Playing)))
            .add_systems(OnExit(ShellState::Playing), despawn_all::<Hud>);
    }
}

/// The two HUD lines: round bookkeeping, then the clocks.
pub fn hud_lines(round: Option<&GameRoundState>, countdowns: &Countdowns, now: Duration) -> String {
    let stats = round.map_or_else(String::new, |round| {
        format!(
            "Pontos: {}   Vidas: {}/{}",
            round.score, round.remaining_lives, round.max_lives
        )
    });

    let round_clock = if countdowns.countdown(TimerSlot::Preview).is_running()
        || countdowns.countdown(TimerSlot::Preview).is_paused()
    {
        format!(
            "Memorize: {}",
            format_clock(countdowns.remaining(TimerSlot::Preview, now))
        )
    } else {
        format!(
            "Rodada: {}",
            format_clock(countdowns.remaining(TimerSlot::Round, now))
        )
    };
    let session_clock = format_clock(countdowns.remaining(TimerSlot::Session, now));

    format!("{stats}\n{round_clock}   Sessão: {session_clock}")
}

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Hud,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|hud| {
            hud.spawn((HudText, text("", 20.0)));
        });
}

fn update_hud(
    time: Res<Time<Real>>,
    round: Option<Res<GameRoundState>>,
    countdowns: Res<Countdowns>,
    mut hud: Query<&mut Text, With<HudText>>,
) {
    let lines = hud_lines(round.as_deref(), &countdowns, time.elapsed());
    for mut text in &mut hud {
        if text.0 != lines {
            text.0.clone_from(&lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use morfo_core::round::{GameKind, LifeRule};

    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn shows_score_lives_and_clocks() {
        let mut countdowns = Countdowns::default();
        countdowns.start(TimerSlot::Round, secs(0), secs(120));
        countdowns.start(TimerSlot::Session, secs(0), secs(900));

        let mut round = GameRoundState::new(GameKind::Ligar, 1, LifeRule::PerError, secs(0));
        round.add_score(20);
        round.record_error();

        assert_eq!(
            hud_lines(Some(&round), &countdowns, secs(30)),
            "Pontos: 20   Vidas: 2/3\nRodada: 01:30   Sessão: 14:30"
        );
    }

    #[test]
    fn preview_replaces_the_round_clock() {
        let mut countdowns = Countdowns::default();
        countdowns.start(TimerSlot::Preview, secs(0), secs(6));

        let lines = hud_lines(None, &countdowns, secs(2));
        assert!(lines.starts_with("\nMemorize: 00:04"));
    }
}
