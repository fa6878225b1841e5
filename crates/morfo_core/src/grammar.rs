use bevy::prelude::*;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The word classes the games teach.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum WordClass {
    Substantivo,
    Adjetivo,
    Verbo,
    #[strum(serialize = "advérbio")]
    Adverbio,
    Pronome,
    Artigo,
    #[strum(serialize = "preposição")]
    Preposicao,
    #[strum(serialize = "conjunção")]
    Conjuncao,
    Numeral,
    #[strum(serialize = "interjeição")]
    Interjeicao,
}

impl WordClass {
    /// Classification key stored on draggables and drop zones.
    pub fn key(self) -> &'static str {
        self.into()
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Substantivo => Color::srgb(0.93, 0.36, 0.36),
            Self::Adjetivo => Color::srgb(0.98, 0.68, 0.25),
            Self::Verbo => Color::srgb(0.36, 0.72, 0.45),
            Self::Adverbio => Color::srgb(0.33, 0.6, 0.93),
            Self::Pronome => Color::srgb(0.66, 0.45, 0.86),
            Self::Artigo => Color::srgb(0.95, 0.85, 0.3),
            Self::Preposicao => Color::srgb(0.3, 0.8, 0.8),
            Self::Conjuncao => Color::srgb(0.85, 0.5, 0.7),
            Self::Numeral => Color::srgb(0.6, 0.6, 0.6),
            Self::Interjeicao => Color::srgb(0.9, 0.55, 0.4),
        }
    }
}
