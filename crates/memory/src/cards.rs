use bevy::prelude::*;
use morfo_core::cleanup::RoundEntity;
use morfo_core::drag::HitBox;
use morfo_core::grammar::WordClass;

use crate::board::{CardFace, MemoryBoard};
use crate::content::MemoryPhaseDef;
use crate::game::{MemoryPhase, MemoryTable};

pub const CARD_SIZE: Vec2 = Vec2::new(100.0, 72.0);
const GRID_SPACING: Vec2 = Vec2::new(112.0, 86.0);
const LABEL_SIZE: f32 = 16.0;

const CARD_BACK_COLOR: Color = Color::srgb(0.24, 0.28, 0.48);
const WORD_CARD_COLOR: Color = Color::srgb(0.95, 0.95, 0.92);
const LABEL_COLOR: Color = Color::srgb(0.1, 0.1, 0.14);

/// A card on the table; `index` is its slot in the [`MemoryBoard`].
#[derive(Component, Debug, Clone, Copy)]
pub struct MemoryCard {
    pub index: usize,
    face_color: Color,
}

#[derive(Component)]
pub struct CardLabel;

pub struct CardPlugin;

impl Plugin for CardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            update_card_faces.run_if(not(in_state(MemoryPhase::Inactive))),
        );
    }
}

fn grid_position(index: usize, columns: u32, count: usize) -> Vec2 {
    let columns = columns.max(1) as usize;
    let rows = count.div_ceil(columns);
    let col = (index % columns) as f32;
    let row = (index / columns) as f32;

    let width = (columns - 1) as f32 * GRID_SPACING.x;
    let height = (rows.saturating_sub(1)) as f32 * GRID_SPACING.y;
    Vec2::new(
        col.mul_add(GRID_SPACING.x, -width / 2.0),
        (-row).mul_add(GRID_SPACING.y, height / 2.0),
    )
}

fn face_color(face: &CardFace) -> Color {
    match face {
        CardFace::Word(_) => WORD_CARD_COLOR,
        CardFace::Class(key) => key
            .parse::<WordClass>()
            .map_or(WORD_CARD_COLOR, WordClass::color),
    }
}

pub fn spawn_cards(world: &mut World, board: &MemoryBoard, def: &MemoryPhaseDef) {
    let count = board.cards().len();
    for (index, card) in board.cards().iter().enumerate() {
        let position = grid_position(index, def.columns, count);
        let face_color = face_color(&card.face);
        world
            .spawn((
                MemoryCard { index, face_color },
                RoundEntity,
                HitBox { size: CARD_SIZE },
                Sprite::from_color(CARD_BACK_COLOR, CARD_SIZE),
                Transform::from_translation(position.extend(0.0)),
            ))
            .with_children(|card_entity| {
                card_entity.spawn((
                    CardLabel,
                    Text2d::new(card.face.text()),
                    TextFont {
                        font_size: LABEL_SIZE,
                        ..default()
                    },
                    TextColor(LABEL_COLOR),
                    Transform::from_xyz(0.0, 0.0, 1.0),
                    Visibility::Hidden,
                ));
            });
    }
}

fn update_card_faces(
    table: Option<Res<MemoryTable>>,
    mut cards: Query<(&MemoryCard, &mut Sprite, &Children)>,
    mut labels: Query<&mut Visibility, With<CardLabel>>,
) {
    let Some(table) = table else {
        return;
    };
    if !table.is_changed() {
        return;
    }

    for (card, mut sprite, children) in &mut cards {
        let face_up = table
            .board
            .card(card.index)
            .is_some_and(|state| state.face_up);
        sprite.color = if face_up {
            card.face_color
        } else {
            CARD_BACK_COLOR
        };
        for &child in children {
            if let Ok(mut visibility) = labels.get_mut(child) {
                *visibility = if face_up {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_centred() {
        let first = grid_position(0, 3, 6);
        let last = grid_position(5, 3, 6);
        assert_eq!(first, -last);
        assert_eq!(grid_position(1, 3, 6).x, 0.0);
    }

    #[test]
    fn class_cards_take_their_class_color() {
        assert_eq!(
            face_color(&CardFace::Class("verbo")),
            WordClass::Verbo.color()
        );
        assert_eq!(face_color(&CardFace::Word("casa")), WORD_CARD_COLOR);
    }
}
