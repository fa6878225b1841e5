use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;
use morfo_core::audio::MusicCommand;
use morfo_core::cleanup::despawn_all;
use morfo_core::persistence::ProgressBook;
use morfo_core::session::{SessionClock, SessionConfig};
use morfo_core::timers::Countdowns;

use crate::screens::{screen_root, text};
use crate::{Player, ShellState};

const MAX_NAME_LEN: usize = 24;

#[derive(Component)]
struct LoginScreen;

#[derive(Component)]
struct NameField;

/// The username being typed.
#[derive(Resource, Debug, Default)]
pub struct NameBuffer(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameEdit {
    Changed,
    Submit,
    Ignored,
}

impl NameBuffer {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn edit(&mut self, key: &Key) -> NameEdit {
        match key {
            Key::Character(chars) => {
                let before = self.0.len();
                for c in chars.chars().filter(|c| !c.is_control()) {
                    if self.0.chars().count() < MAX_NAME_LEN {
                        self.0.push(c);
                    }
                }
                if self.0.len() == before {
                    NameEdit::Ignored
                } else {
                    NameEdit::Changed
                }
            }
            Key::Space if !self.0.is_empty() && self.0.chars().count() < MAX_NAME_LEN => {
                self.0.push(' ');
                NameEdit::Changed
            }
            Key::Backspace => {
                if self.0.pop().is_some() {
                    NameEdit::Changed
                } else {
                    NameEdit::Ignored
                }
            }
            Key::Enter if !self.0.trim().is_empty() => NameEdit::Submit,
            _ => NameEdit::Ignored,
        }
    }
}

pub struct LoginPlugin;

impl Plugin for LoginPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NameBuffer>()
            .add_systems(OnEnter(ShellState::Login), spawn_login_screen)
            .add_systems(Update, type_name.run_if(in_state(ShellState::Login)))
            .add_systems(OnExit(ShellState::Login), despawn_all::<LoginScreen>);
    }
}

fn spawn_login_screen(mut commands: Commands, mut buffer: ResMut<NameBuffer>) {
    *buffer = NameBuffer::default();
    commands
        .spawn((LoginScreen, screen_root()))
        .with_children(|screen| {
            screen.spawn(text("MorfoLógica", 48.0));
            screen.spawn(text("Digite seu nome e pressione Enter", 22.0));
            screen.spawn((NameField, text("_", 32.0)));
        });
}

fn type_name(
    mut keys: EventReader<KeyboardInput>,
    mut buffer: ResMut<NameBuffer>,
    mut field: Query<&mut Text, With<NameField>>,
    mut commands: Commands,
    book: Res<ProgressBook>,
    config: Res<SessionConfig>,
    time: Res<Time<Real>>,
    mut session: ResMut<SessionClock>,
    mut countdowns: ResMut<Countdowns>,
    mut music: EventWriter<MusicCommand>,
    mut next_state: ResMut<NextState<ShellState>>,
) {
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }
        match buffer.edit(&key.logical_key) {
            NameEdit::Ignored => {}
            NameEdit::Changed => {
                for mut field in &mut field {
                    field.0 = format!("{}_", buffer.as_str());
                }
            }
            NameEdit::Submit => {
                let name = buffer.as_str().trim().to_string();
                let record = book.load(&name);
                info!(
                    "{name} logged in with {} points",
                    record.general_score
                );
                commands.insert_resource(Player { name, record });
                session.begin(&mut countdowns, &config, time.elapsed());
                music.send(MusicCommand::Play);
                next_state.set(ShellState::Menu);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &[Key]) -> (NameBuffer, Vec<NameEdit>) {
        let mut buffer = NameBuffer::default();
        let edits = keys.iter().map(|key| buffer.edit(key)).collect();
        (buffer, edits)
    }

    #[test]
    fn typing_and_erasing() {
        let (buffer, _) = typed(&[
            Key::Character("A".into()),
            Key::Character("n".into()),
            Key::Character("x".into()),
            Key::Backspace,
            Key::Character("a".into()),
        ]);
        assert_eq!(buffer.as_str(), "Ana");
    }

    #[test]
    fn enter_needs_a_name() {
        let (_, edits) = typed(&[Key::Enter, Key::Space, Key::Enter]);
        assert_eq!(edits, vec![NameEdit::Ignored; 3]);

        let (_, edits) = typed(&[Key::Character("b".into()), Key::Enter]);
        assert_eq!(edits.last(), Some(&NameEdit::Submit));
    }

    #[test]
    fn names_are_capped() {
        let keys = vec![Key::Character("z".into()); MAX_NAME_LEN + 5];
        let (buffer, edits) = typed(&keys);
        assert_eq!(buffer.as_str().chars().count(), MAX_NAME_LEN);
        assert_eq!(edits.last(), Some(&NameEdit::Ignored));
    }
}
