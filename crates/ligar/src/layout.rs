use bevy::prelude::*;
use morfo_core::cleanup::RoundEntity;
use morfo_core::drag::{Draggable, DropZone, HitBox, ScrollBounds};
use morfo_core::grammar::WordClass;
use morfo_core::WINDOW_HEIGHT;

use crate::content::LigarPhaseDef;

const ZONE_SIZE: Vec2 = Vec2::new(140.0, 150.0);
const ZONE_SPACING: Vec2 = Vec2::new(150.0, 165.0);
const ZONE_COLUMNS: usize = 3;
const ZONES_TOP: f32 = 290.0;

pub const WORD_SIZE: Vec2 = Vec2::new(130.0, 40.0);
const WORD_SPACING: Vec2 = Vec2::new(160.0, 56.0);
const WORD_COLUMNS: usize = 2;
const BANK_GAP: f32 = 60.0;

const WORD_COLOR: Color = Color::srgb(0.96, 0.95, 0.9);
const LABEL_COLOR: Color = Color::srgb(0.1, 0.1, 0.14);
pub const ZONE_ALPHA: f32 = 0.45;

/// A word waiting in the bank.
#[derive(Component, Debug)]
pub struct BankWord;

/// Resting color of a class box, restored after highlights and flashes.
#[derive(Component, Debug, Clone, Copy)]
pub struct ZoneTint {
    pub base: Color,
}

fn grid_position(index: usize, columns: usize, spacing: Vec2, top: f32) -> Vec2 {
    let col = (index % columns) as f32;
    let row = (index / columns) as f32;
    let offset = (columns - 1) as f32 * spacing.x / 2.0;
    Vec2::new(
        col.mul_add(spacing.x, -offset),
        (-row).mul_add(spacing.y, top),
    )
}

fn rows(count: usize, columns: usize) -> usize {
    count.div_ceil(columns).max(1)
}

/// Local position of the `slot`th word placed in a box.
pub fn slot_offset(slot: usize) -> Vec3 {
    Vec3::new(0.0, (slot as f32).mul_add(-24.0, 30.0), 1.0)
}

fn bank_top(def: &LigarPhaseDef) -> f32 {
    let zone_rows = rows(def.zones.len(), ZONE_COLUMNS) as f32;
    (zone_rows - 1.0).mul_add(-ZONE_SPACING.y, ZONES_TOP) - ZONE_SIZE.y / 2.0 - BANK_GAP
}

/// How far the camera may travel down to reach the last bank row.
pub fn scroll_bounds(def: &LigarPhaseDef) -> ScrollBounds {
    let word_rows = rows(def.words.len(), WORD_COLUMNS) as f32;
    let bank_bottom = (word_rows - 1.0).mul_add(-WORD_SPACING.y, bank_top(def)) - WORD_SIZE.y;
    let visible_bottom = -WINDOW_HEIGHT / 2.0;
    ScrollBounds {
        min_y: (bank_bottom - visible_bottom).min(0.0),
        max_y: 0.0,
    }
}

fn label(text: String, size: f32, y: f32) -> impl Bundle {
    (
        Text2d::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(LABEL_COLOR),
        Transform::from_xyz(0.0, y, 1.0),
    )
}

pub fn spawn_zones(world: &mut World, def: &LigarPhaseDef) {
    for (index, class) in def.zones.iter().enumerate() {
        let position = grid_position(index, ZONE_COLUMNS, ZONE_SPACING, ZONES_TOP);
        let base = class.color().with_alpha(ZONE_ALPHA);
        world
            .spawn((
                DropZone {
                    key: class.key().to_string(),
                },
                ZoneTint { base },
                RoundEntity,
                HitBox { size: ZONE_SIZE },
                Sprite::from_color(base, ZONE_SIZE),
                Transform::from_translation(position.extend(0.0)),
            ))
            .with_children(|zone| {
                zone.spawn(label(class.to_string(), 18.0, ZONE_SIZE.y / 2.0 - 16.0));
            });
    }
}

pub fn spawn_bank(world: &mut World, def: &LigarPhaseDef) {
    let mut words = def.words.to_vec();
    fastrand::shuffle(&mut words);

    let top = bank_top(def);
    for (index, (word, class)) in words.into_iter().enumerate() {
        spawn_word(world, word, class, grid_position(index, WORD_COLUMNS, WORD_SPACING, top));
    }
}

fn spawn_word(world: &mut World, word: &str, class: WordClass, position: Vec2) {
    world
        .spawn((
            BankWord,
            Draggable {
                key: class.key().to_string(),
                label: word.to_string(),
            },
            RoundEntity,
            HitBox { size: WORD_SIZE },
            Sprite::from_color(WORD_COLOR, WORD_SIZE),
            Transform::from_translation(position.extend(2.0)),
        ))
        .with_children(|bank_word| {
            bank_word.spawn(label(word.to_string(), 20.0, 0.0));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PHASES;

    #[test]
    fn bank_sits_below_every_box() {
        for def in PHASES {
            let lowest_zone = (0..def.zones.len())
                .map(|index| grid_position(index, ZONE_COLUMNS, ZONE_SPACING, ZONES_TOP).y)
                .fold(f32::MAX, f32::min);
            assert!(bank_top(def) + WORD_SIZE.y / 2.0 < lowest_zone - ZONE_SIZE.y / 2.0);
        }
    }

    #[test]
    fn long_banks_can_scroll_down() {
        let longest = PHASES.iter().max_by_key(|def| def.words.len()).unwrap();
        let bounds = scroll_bounds(longest);
        assert!(bounds.min_y < 0.0);
        assert_eq!(bounds.max_y, 0.0);
    }
}
