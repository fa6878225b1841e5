use core::time::Duration;

use morfo_core::grammar::WordClass;

/// One Genius phase: the pads on screen, the words that can light them up,
/// how long the sequence has to grow and how fast it is played back.
#[derive(Debug, Clone, Copy)]
pub struct GeniusPhaseDef {
    pub pads: &'static [WordClass],
    pub words: &'static [(&'static str, WordClass)],
    /// Sequence length that wins the round once repeated.
    pub target_length: usize,
    /// Time each step stays lit during playback.
    pub step_reveal: Duration,
    pub round: Duration,
}

impl GeniusPhaseDef {
    /// Words that can stand for `pad`.
    pub fn words_for(&self, pad: usize) -> impl Iterator<Item = &'static str> + '_ {
        let class = self.pads.get(pad).copied();
        self.words
            .iter()
            .filter(move |(_, word_class)| Some(*word_class) == class)
            .map(|(word, _)| *word)
    }
}

const WORDS: &[(&str, WordClass)] = &[
    ("gato", WordClass::Substantivo),
    ("escola", WordClass::Substantivo),
    ("árvore", WordClass::Substantivo),
    ("alto", WordClass::Adjetivo),
    ("verde", WordClass::Adjetivo),
    ("alegre", WordClass::Adjetivo),
    ("comer", WordClass::Verbo),
    ("brincar", WordClass::Verbo),
    ("dormir", WordClass::Verbo),
    ("hoje", WordClass::Adverbio),
    ("muito", WordClass::Adverbio),
    ("longe", WordClass::Adverbio),
    ("ela", WordClass::Pronome),
    ("eles", WordClass::Pronome),
    ("a", WordClass::Artigo),
    ("uns", WordClass::Artigo),
];

pub const PHASES: &[GeniusPhaseDef] = &[
    GeniusPhaseDef {
        pads: &[WordClass::Substantivo, WordClass::Adjetivo, WordClass::Verbo],
        words: WORDS,
        target_length: 4,
        step_reveal: Duration::from_millis(1200),
        round: Duration::from_secs(120),
    },
    GeniusPhaseDef {
        pads: &[
            WordClass::Substantivo,
            WordClass::Adjetivo,
            WordClass::Verbo,
            WordClass::Adverbio,
        ],
        words: WORDS,
        target_length: 5,
        step_reveal: Duration::from_millis(1000),
        round: Duration::from_secs(150),
    },
    GeniusPhaseDef {
        pads: &[
            WordClass::Substantivo,
            WordClass::Adjetivo,
            WordClass::Verbo,
            WordClass::Adverbio,
            WordClass::Pronome,
            WordClass::Artigo,
        ],
        words: WORDS,
        target_length: 7,
        step_reveal: Duration::from_millis(850),
        round: Duration::from_secs(180),
    },
];

/// Content for a 1-based phase.
pub fn phase(phase: u32) -> Option<&'static GeniusPhaseDef> {
    PHASES.get(phase.checked_sub(1)? as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pad_has_words() {
        for def in PHASES {
            for pad in 0..def.pads.len() {
                assert!(def.words_for(pad).next().is_some(), "pad {pad} has no words");
            }
        }
    }

    #[test]
    fn unknown_pad_has_no_words() {
        assert_eq!(phase(1).unwrap().words_for(99).count(), 0);
        assert!(phase(0).is_none());
    }
}
