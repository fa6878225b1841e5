use bevy::prelude::*;

pub const TEXT_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);
pub const BUTTON_COLOR: Color = Color::srgb(0.2, 0.24, 0.42);
pub const BUTTON_HOVER_COLOR: Color = Color::srgb(0.28, 0.34, 0.58);

/// Full-window column that centers its children.
pub fn screen_root() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        row_gap: Val::Px(16.0),
        ..default()
    }
}

pub fn text(value: impl Into<String>, size: f32) -> (Text, TextFont, TextColor, TextLayout) {
    (
        Text::new(value),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(TEXT_COLOR),
        TextLayout::new_with_justify(JustifyText::Center),
    )
}

/// Spawns a labelled button carrying `marker`.
pub fn spawn_button(parent: &mut ChildBuilder, label: impl Into<String>, marker: impl Component) {
    parent
        .spawn((
            Node {
                width: Val::Px(300.0),
                height: Val::Px(64.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_COLOR),
            Button,
            marker,
        ))
        .with_children(|button| {
            button.spawn(text(label, 26.0));
        });
}

pub fn highlight_buttons(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut background) in &mut buttons {
        background.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => BUTTON_HOVER_COLOR,
            Interaction::None => BUTTON_COLOR,
        };
    }
}
