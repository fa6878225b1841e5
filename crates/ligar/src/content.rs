use core::time::Duration;

use morfo_core::drag::DragMode;
use morfo_core::grammar::WordClass;

/// One Ligar phase: the word bank, the class boxes and how words are carried.
#[derive(Debug, Clone, Copy)]
pub struct LigarPhaseDef {
    pub words: &'static [(&'static str, WordClass)],
    pub zones: &'static [WordClass],
    /// `Move` takes the word out of the bank; `Clone` leaves it there.
    pub mode: DragMode,
    pub round: Duration,
}

pub const PHASES: &[LigarPhaseDef] = &[
    LigarPhaseDef {
        words: &[
            ("cachorro", WordClass::Substantivo),
            ("pulou", WordClass::Verbo),
            ("bola", WordClass::Substantivo),
            ("grande", WordClass::Adjetivo),
            ("correu", WordClass::Verbo),
            ("lindo", WordClass::Adjetivo),
        ],
        zones: &[WordClass::Substantivo, WordClass::Adjetivo, WordClass::Verbo],
        mode: DragMode::Move,
        round: Duration::from_secs(120),
    },
    LigarPhaseDef {
        words: &[
            ("menina", WordClass::Substantivo),
            ("cedo", WordClass::Adverbio),
            ("leu", WordClass::Verbo),
            ("livro", WordClass::Substantivo),
            ("novo", WordClass::Adjetivo),
            ("devagar", WordClass::Adverbio),
            ("escreveu", WordClass::Verbo),
            ("pequena", WordClass::Adjetivo),
        ],
        zones: &[
            WordClass::Substantivo,
            WordClass::Adjetivo,
            WordClass::Verbo,
            WordClass::Adverbio,
        ],
        mode: DragMode::Move,
        round: Duration::from_secs(150),
    },
    LigarPhaseDef {
        words: &[
            ("o", WordClass::Artigo),
            ("professor", WordClass::Substantivo),
            ("explicou", WordClass::Verbo),
            ("a", WordClass::Artigo),
            ("lição", WordClass::Substantivo),
            ("difícil", WordClass::Adjetivo),
            ("com", WordClass::Preposicao),
            ("calma", WordClass::Substantivo),
            ("ele", WordClass::Pronome),
            ("sempre", WordClass::Adverbio),
            ("ajuda", WordClass::Verbo),
            ("nós", WordClass::Pronome),
        ],
        zones: &[
            WordClass::Artigo,
            WordClass::Substantivo,
            WordClass::Adjetivo,
            WordClass::Verbo,
            WordClass::Adverbio,
            WordClass::Pronome,
            WordClass::Preposicao,
        ],
        mode: DragMode::Clone,
        round: Duration::from_secs(180),
    },
];

/// Content for a 1-based phase.
pub fn phase(phase: u32) -> Option<&'static LigarPhaseDef> {
    PHASES.get(phase.checked_sub(1)? as usize)
}
