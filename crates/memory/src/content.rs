use core::time::Duration;

use morfo_core::grammar::WordClass;

/// One memory phase: which word/class pairs are on the table and how long
/// the player gets to memorise and then to play.
#[derive(Debug, Clone, Copy)]
pub struct MemoryPhaseDef {
    pub pairs: &'static [(&'static str, WordClass)],
    pub preview: Duration,
    pub round: Duration,
    pub columns: u32,
}

impl MemoryPhaseDef {
    pub const fn card_count(&self) -> usize {
        self.pairs.len() * 2
    }
}

pub const PHASES: &[MemoryPhaseDef] = &[
    MemoryPhaseDef {
        pairs: &[
            ("casa", WordClass::Substantivo),
            ("bonito", WordClass::Adjetivo),
            ("correr", WordClass::Verbo),
        ],
        preview: Duration::from_secs(6),
        round: Duration::from_secs(120),
        columns: 3,
    },
    MemoryPhaseDef {
        pairs: &[
            ("menino", WordClass::Substantivo),
            ("feliz", WordClass::Adjetivo),
            ("cantar", WordClass::Verbo),
            ("ontem", WordClass::Adverbio),
        ],
        preview: Duration::from_secs(6),
        round: Duration::from_secs(150),
        columns: 4,
    },
    MemoryPhaseDef {
        pairs: &[
            ("livro", WordClass::Substantivo),
            ("azul", WordClass::Adjetivo),
            ("escrever", WordClass::Verbo),
            ("nós", WordClass::Pronome),
            ("o", WordClass::Artigo),
        ],
        preview: Duration::from_secs(8),
        round: Duration::from_secs(180),
        columns: 4,
    },
    MemoryPhaseDef {
        pairs: &[
            ("cidade", WordClass::Substantivo),
            ("rápido", WordClass::Adjetivo),
            ("pular", WordClass::Verbo),
            ("sempre", WordClass::Adverbio),
            ("com", WordClass::Preposicao),
            ("mas", WordClass::Conjuncao),
        ],
        preview: Duration::from_secs(8),
        round: Duration::from_secs(180),
        columns: 4,
    },
];

/// Content for a 1-based phase.
pub fn phase(phase: u32) -> Option<&'static MemoryPhaseDef> {
    PHASES.get(phase.checked_sub(1)? as usize)
}
