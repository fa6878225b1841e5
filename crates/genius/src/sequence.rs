//! The Simon sequence: it grows by one step every time the player repeats
//! it in full, and a wrong pad sends the player back to the start of the
//! same sequence.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub pad: usize,
    pub word: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadPress {
    /// Correct pad, more steps to go.
    Correct,
    /// The whole sequence was repeated.
    Repeated { length: usize },
    Wrong,
}

#[derive(Debug, Clone, Default)]
pub struct Sequence {
    steps: Vec<Step>,
    progress: usize,
}

impl Sequence {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Steps the player has repeated so far in this attempt.
    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
        self.progress = 0;
    }

    pub fn restart_attempt(&mut self) {
        self.progress = 0;
    }

    pub fn press(&mut self, pad: usize) -> PadPress {
        let Some(expected) = self.steps.get(self.progress) else {
            return PadPress::Wrong;
        };
        if expected.pad != pad {
            self.progress = 0;
            return PadPress::Wrong;
        }
        self.progress += 1;
        if self.progress == self.steps.len() {
            self.progress = 0;
            PadPress::Repeated {
                length: self.steps.len(),
            }
        } else {
            PadPress::Correct
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(pad: usize) -> Step {
        Step { pad, word: "x" }
    }

    #[test]
    fn repeating_the_sequence_reports_its_length() {
        let mut sequence = Sequence::default();
        sequence.push(step(2));
        assert_eq!(sequence.press(2), PadPress::Repeated { length: 1 });

        sequence.push(step(0));
        assert_eq!(sequence.press(2), PadPress::Correct);
        assert_eq!(sequence.press(0), PadPress::Repeated { length: 2 });
    }

    #[test]
    fn wrong_pad_restarts_the_attempt() {
        let mut sequence = Sequence::default();
        sequence.push(step(1));
        sequence.push(step(1));
        sequence.push(step(3));

        assert_eq!(sequence.press(1), PadPress::Correct);
        assert_eq!(sequence.press(2), PadPress::Wrong);
        assert_eq!(sequence.progress(), 0);
        assert_eq!(sequence.len(), 3);

        assert_eq!(sequence.press(1), PadPress::Correct);
        assert_eq!(sequence.press(1), PadPress::Correct);
        assert_eq!(sequence.press(3), PadPress::Repeated { length: 3 });
    }

    #[test]
    fn empty_sequence_rejects_presses() {
        let mut sequence = Sequence::default();
        assert_eq!(sequence.press(0), PadPress::Wrong);
    }
}
