use core::time::Duration;

use bevy::prelude::*;
use bevy_asset_loader::prelude::*;
use bevy_kira_audio::prelude::*;

const MUSIC_FADE: Duration = Duration::from_millis(600);

#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
enum AudioAssetState {
    #[default]
    Loading,
    Loaded,
    /// Assets missing or undecodable; every cue is dropped silently.
    Unavailable,
}

#[derive(AssetCollection, Resource)]
struct AudioAssets {
    #[asset(path = "audio/correct.ogg")]
    correct: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "audio/wrong.ogg")]
    wrong: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "audio/victory.ogg")]
    victory: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "audio/defeat.ogg")]
    defeat: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "audio/theme.ogg")]
    theme: Handle<bevy_kira_audio::prelude::AudioSource>,
}

#[derive(Resource)]
struct MusicChannel;

/// Music requested before the assets finished loading, replayed once they
/// arrive.
#[derive(Resource, Debug, Default)]
struct HeldMusic(Option<MusicCommand>);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Correct,
    Wrong,
    Victory,
    Defeat,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    Play,
    Pause,
    Resume,
    Stop,
}

/// The one audio player the whole app shares.
pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .add_audio_channel::<MusicChannel>()
            .add_event::<SoundCue>()
            .add_event::<MusicCommand>()
            .init_state::<AudioAssetState>()
            .init_resource::<HeldMusic>()
            .add_loading_state(
                LoadingState::new(AudioAssetState::Loading)
                    .continue_to_state(AudioAssetState::Loaded)
                    .on_failure_continue_to_state(AudioAssetState::Unavailable)
                    .load_collection::<AudioAssets>(),
            )
            .add_systems(OnEnter(AudioAssetState::Unavailable), report_unavailable)
            .add_systems(OnEnter(AudioAssetState::Loaded), replay_held_music)
            .add_systems(
                Update,
                hold_music.run_if(in_state(AudioAssetState::Loading)),
            )
            .add_systems(
                Update,
                (play_cues, drive_music).run_if(in_state(AudioAssetState::Loaded)),
            )
            .add_systems(
                Update,
                drop_cues.run_if(in_state(AudioAssetState::Unavailable)),
            );
    }
}

fn report_unavailable() {
    warn!("Audio assets could not be loaded, continuing without sound");
}

fn play_cues(audio: Res<Audio>, assets: Res<AudioAssets>, mut cues: EventReader<SoundCue>) {
    for cue in cues.read() {
        let handle = match cue {
            SoundCue::Correct => &assets.correct,
            SoundCue::Wrong => &assets.wrong,
            SoundCue::Victory => &assets.victory,
            SoundCue::Defeat => &assets.defeat,
        };
        audio.play(handle.clone_weak());
    }
}

fn drive_music(
    music: Res<AudioChannel<MusicChannel>>,
    assets: Res<AudioAssets>,
    mut commands: EventReader<MusicCommand>,
) {
    for command in commands.read() {
        match command {
            MusicCommand::Play => {
                music.stop();
                music
                    .play(assets.theme.clone_weak())
                    .looped()
                    .fade_in(AudioTween::linear(MUSIC_FADE));
            }
            MusicCommand::Pause => {
                music.pause().fade_out(AudioTween::linear(MUSIC_FADE));
            }
            MusicCommand::Resume => {
                music.resume().fade_in(AudioTween::linear(MUSIC_FADE));
            }
            MusicCommand::Stop => {
                music.stop().fade_out(AudioTween::linear(MUSIC_FADE));
            }
        }
    }
}

/// Folds a music command into the one held while loading.
fn settle_music(held: Option<MusicCommand>, next: MusicCommand) -> Option<MusicCommand> {
    match (held, next) {
        (_, MusicCommand::Play) => Some(MusicCommand::Play),
        (_, MusicCommand::Stop) => None,
        (Some(MusicCommand::Play), MusicCommand::Pause) => Some(MusicCommand::Pause),
        (Some(MusicCommand::Pause), MusicCommand::Resume) => Some(MusicCommand::Play),
        (held, _) => held,
    }
}

fn hold_music(
    mut held: ResMut<HeldMusic>,
    mut cues: EventReader<SoundCue>,
    mut music: EventReader<MusicCommand>,
) {
    cues.clear();
    for command in music.read() {
        held.0 = settle_music(held.0, *command);
    }
}

fn replay_held_music(mut held: ResMut<HeldMusic>, mut music: EventWriter<MusicCommand>) {
    match held.0.take() {
        Some(MusicCommand::Play) => {
            music.send(MusicCommand::Play);
        }
        Some(MusicCommand::Pause) => {
            music.send(MusicCommand::Play);
            music.send(MusicCommand::Pause);
        }
        _ => {}
    }
}

// Keeps the event queues from growing while sound is unavailable.
fn drop_cues(mut cues: EventReader<SoundCue>, mut music: EventReader<MusicCommand>) {
    cues.clear();
    music.clear();
}
