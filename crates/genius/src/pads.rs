use bevy::prelude::*;
use morfo_core::cleanup::RoundEntity;
use morfo_core::drag::HitBox;
use morfo_core::grammar::WordClass;

use crate::content::GeniusPhaseDef;
use crate::game::{GeniusBoard, GeniusPhase};

const PAD_SIZE: Vec2 = Vec2::new(180.0, 110.0);
const PAD_SPACING: Vec2 = Vec2::new(200.0, 130.0);
const PAD_COLUMNS: usize = 2;
const PADS_TOP: f32 = 150.0;
const CAPTION_Y: f32 = 280.0;
const UNLIT_ALPHA: f32 = 0.3;

#[derive(Component, Debug, Clone, Copy)]
pub struct Pad {
    pub index: usize,
    pub class: WordClass,
}

/// Shows the word standing for the step being played back.
#[derive(Component)]
pub struct Caption;

pub struct PadPlugin;

impl Plugin for PadPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (light_pads, update_caption).run_if(resource_exists::<GeniusBoard>),
        )
        .add_systems(OnEnter(GeniusPhase::Listening), prompt_player);
    }
}

fn pad_position(index: usize) -> Vec2 {
    let col = (index % PAD_COLUMNS) as f32;
    let row = (index / PAD_COLUMNS) as f32;
    let offset = (PAD_COLUMNS - 1) as f32 * PAD_SPACING.x / 2.0;
    Vec2::new(
        col.mul_add(PAD_SPACING.x, -offset),
        (-row).mul_add(PAD_SPACING.y, PADS_TOP),
    )
}

pub fn spawn_pads(world: &mut World, def: &GeniusPhaseDef) {
    for (index, &class) in def.pads.iter().enumerate() {
        world
            .spawn((
                Pad { index, class },
                RoundEntity,
                HitBox { size: PAD_SIZE },
                Sprite::from_color(class.color().with_alpha(UNLIT_ALPHA), PAD_SIZE),
                Transform::from_translation(pad_position(index).extend(0.0)),
            ))
            .with_children(|pad| {
                pad.spawn((
                    Text2d::new(class.to_string()),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    Transform::from_xyz(0.0, 0.0, 1.0),
                ));
            });
    }

    world.spawn((
        Caption,
        RoundEntity,
        Text2d::default(),
        TextFont {
            font_size: 36.0,
            ..default()
        },
        Transform::from_xyz(0.0, CAPTION_Y, 1.0),
    ));
}

fn light_pads(board: Res<GeniusBoard>, mut pads: Query<(&Pad, &mut Sprite)>) {
    if !board.is_changed() {
        return;
    }
    let flashed = board.flash.as_ref().map(|(pad, _)| *pad);
    for (pad, mut sprite) in &mut pads {
        let lit = board.lit == Some(pad.index) || flashed == Some(pad.index);
        let alpha = if lit { 1.0 } else { UNLIT_ALPHA };
        sprite.color = pad.class.color().with_alpha(alpha);
    }
}

fn update_caption(board: Res<GeniusBoard>, mut captions: Query<&mut Text2d, With<Caption>>) {
    if !board.is_changed() {
        return;
    }
    let Some(word) = board.caption else {
        return;
    };
    for mut caption in &mut captions {
        if caption.0 != word {
            caption.0 = word.to_string();
        }
    }
}

fn prompt_player(mut captions: Query<&mut Text2d, With<Caption>>) {
    for mut caption in &mut captions {
        caption.0 = "Sua vez!".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_fill_rows_of_two() {
        assert_eq!(pad_position(0).y, pad_position(1).y);
        assert!(pad_position(2).y < pad_position(0).y);
        assert_eq!(pad_position(0).x, -pad_position(1).x);
    }
}
