//! Word puzzle sub-engine
//!
//! Turn-based and clock-free: draw a word, show it scrambled or with a few
//! letters masked, check the typed answer. Correct answers add to the same
//! kind of score/level counters the arcade games use. There is no failure
//! state; the loop can run forever.

pub mod vocabulary;

use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Points per correct answer
pub const POINTS_PER_WORD: u32 = 10;
/// Upper bound on masked letters in fill-in mode
pub const MAX_MASKED: usize = 3;
/// Placeholder for a masked letter
pub const MASK_CHAR: char = '_';

/// Puzzle presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PuzzleKind {
    /// All letters shuffled ("Eco Jumble Quest")
    #[default]
    Scramble,
    /// A few letters replaced by blanks ("Green Word Builder")
    FillIn,
}

impl PuzzleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PuzzleKind::Scramble => "scramble",
            PuzzleKind::FillIn => "fill-in",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "scramble" | "jumble" => Some(PuzzleKind::Scramble),
            "fill-in" | "fillin" | "builder" => Some(PuzzleKind::FillIn),
            _ => None,
        }
    }
}

/// One vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub word: String,
    pub meaning: String,
}

impl VocabEntry {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
        }
    }
}

/// Current puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleState {
    pub current_word: String,
    /// Scrambled or masked form shown to the player
    pub display: String,
    pub meaning: String,
    pub score: u32,
    pub level: u32,
}

/// What the host shows between answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSnapshot {
    pub display: String,
    pub score: u32,
    pub level: u32,
}

/// Result of checking an answer. The word and meaning are revealed either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub word: String,
    pub meaning: String,
}

pub struct WordPuzzle<R = Pcg32> {
    kind: PuzzleKind,
    vocabulary: Vec<VocabEntry>,
    rng: R,
    state: PuzzleState,
    /// Current word already scored
    solved: bool,
}

impl WordPuzzle<Pcg32> {
    /// Puzzle over the builtin vocabulary with a seeded generator
    pub fn new(kind: PuzzleKind, seed: u64) -> Result<Self, EngineError> {
        Self::with_vocabulary(kind, vocabulary::builtin(), Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> WordPuzzle<R> {
    /// Puzzle over a custom word list. Fails fast on an empty list.
    pub fn with_vocabulary(kind: PuzzleKind, vocabulary: Vec<VocabEntry>, rng: R) -> Result<Self, EngineError> {
        if vocabulary.is_empty() {
            return Err(EngineError::EmptyVocabulary);
        }
        let mut puzzle = Self {
            kind,
            vocabulary,
            rng,
            state: PuzzleState {
                current_word: String::new(),
                display: String::new(),
                meaning: String::new(),
                score: 0,
                level: 1,
            },
            solved: false,
        };
        puzzle.next_word();
        Ok(puzzle)
    }

    pub fn kind(&self) -> PuzzleKind {
        self.kind
    }

    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            display: self.state.display.clone(),
            score: self.state.score,
            level: self.state.level,
        }
    }

    /// Draw a new word uniformly at random and present it
    pub fn next_word(&mut self) -> &PuzzleState {
        let index = self.rng.random_range(0..self.vocabulary.len());
        let entry = &self.vocabulary[index];

        let display = match self.kind {
            PuzzleKind::Scramble => scramble(&entry.word, &mut self.rng),
            PuzzleKind::FillIn => mask(&entry.word, &mut self.rng),
        };
        self.state.current_word = entry.word.clone();
        self.state.meaning = entry.meaning.clone();
        self.state.display = display;
        self.solved = false;
        &self.state
    }

    /// Check an answer (trimmed, case-insensitive)
    pub fn submit(&mut self, answer: &str) -> SubmitOutcome {
        let correct = normalize(answer) == normalize(&self.state.current_word);
        if correct && !self.solved {
            self.solved = true;
            self.state.score += POINTS_PER_WORD;
            self.state.level += 1;
            log::debug!("Solved {} (level {})", self.state.current_word, self.state.level);
        }
        SubmitOutcome {
            correct,
            word: self.state.current_word.clone(),
            meaning: self.state.meaning.clone(),
        }
    }

    /// Discard the current word without scoring
    pub fn skip(&mut self) -> &PuzzleState {
        log::debug!("Skipped {}", self.state.current_word);
        self.next_word()
    }

    /// Back to score 0, level 1 with a fresh word
    pub fn reset(&mut self) -> &PuzzleState {
        self.state.score = 0;
        self.state.level = 1;
        self.next_word()
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Shuffle all characters. Retries a few times so the shuffle differs from
/// the source whenever the word has two or more distinct characters.
pub fn scramble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    let distinct = letters.iter().any(|c| Some(c) != letters.first());

    for _ in 0..16 {
        letters.shuffle(rng);
        let candidate: String = letters.iter().collect();
        if !distinct || candidate != word {
            return candidate;
        }
    }
    // Rotating by one always differs when there are distinct characters
    letters.rotate_left(1);
    letters.into_iter().collect()
}

/// Blank out `min(len / 3 + 1, 3)` letter positions
pub fn mask<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    let candidates: Vec<usize> = letters
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| i)
        .collect();

    let wanted = (letters.len() / 3 + 1).min(MAX_MASKED).min(candidates.len());
    for pick in rand::seq::index::sample(rng, candidates.len(), wanted) {
        letters[candidates[pick]] = MASK_CHAR;
    }
    letters.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_word(kind: PuzzleKind, word: &str) -> WordPuzzle {
        WordPuzzle::with_vocabulary(
            kind,
            vec![VocabEntry::new(word, "test meaning")],
            Pcg32::seed_from_u64(1),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_vocabulary_is_fatal() {
        let result = WordPuzzle::with_vocabulary(PuzzleKind::Scramble, Vec::new(), Pcg32::seed_from_u64(0));
        assert!(matches!(result, Err(EngineError::EmptyVocabulary)));
    }

    #[test]
    fn test_starts_with_a_word() {
        let puzzle = WordPuzzle::new(PuzzleKind::FillIn, 3).unwrap();
        let state = puzzle.state();
        assert!(!state.current_word.is_empty());
        assert!(!state.meaning.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_case_insensitive_answer() {
        let mut puzzle = WordPuzzle::new(PuzzleKind::Scramble, 42).unwrap();
        let word = puzzle.next_word().current_word.clone();
        let outcome = puzzle.submit(&format!("  {}  ", word.to_lowercase()));
        assert!(outcome.correct);
        assert_eq!(outcome.word, word);
        assert_eq!(puzzle.snapshot().score, 10);
        assert_eq!(puzzle.snapshot().level, 2);
    }

    #[test]
    fn test_wrong_answer_reveals_meaning_without_scoring() {
        let mut puzzle = one_word(PuzzleKind::Scramble, "CLIMATE");
        let display = puzzle.state().display.clone();
        assert_ne!(display, "CLIMATE");

        let outcome = puzzle.submit(&display);
        assert!(!outcome.correct);
        assert_eq!(outcome.meaning, "test meaning");
        assert_eq!(puzzle.snapshot().score, 0);
        assert_eq!(puzzle.snapshot().level, 1);
    }

    #[test]
    fn test_word_scores_once() {
        let mut puzzle = one_word(PuzzleKind::FillIn, "SOLAR");
        assert!(puzzle.submit("solar").correct);
        assert!(puzzle.submit("SOLAR").correct);
        assert_eq!(puzzle.snapshot().score, 10);
        assert_eq!(puzzle.snapshot().level, 2);

        puzzle.next_word();
        assert!(puzzle.submit("Solar").correct);
        assert_eq!(puzzle.snapshot().score, 20);
        assert_eq!(puzzle.snapshot().level, 3);
    }

    #[test]
    fn test_skip_does_not_score() {
        let mut puzzle = WordPuzzle::new(PuzzleKind::Scramble, 9).unwrap();
        for _ in 0..10 {
            puzzle.skip();
        }
        assert_eq!(puzzle.snapshot().score, 0);
        assert_eq!(puzzle.snapshot().level, 1);
    }

    #[test]
    fn test_reset() {
        let mut puzzle = one_word(PuzzleKind::Scramble, "FLOOD");
        puzzle.submit("flood");
        puzzle.reset();
        assert_eq!(puzzle.snapshot().score, 0);
        assert_eq!(puzzle.snapshot().level, 1);
    }

    #[test]
    fn test_scramble_is_permutation() {
        let mut rng = Pcg32::seed_from_u64(5);
        for (word, _) in vocabulary::ECO_WORDS {
            let scrambled = scramble(word, &mut rng);
            assert_ne!(&scrambled, word);
            let mut a: Vec<char> = scrambled.chars().collect();
            let mut b: Vec<char> = word.chars().collect();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
        }
        // A single repeated letter cannot differ
        assert_eq!(scramble("AAA", &mut rng), "AAA");
    }

    #[test]
    fn test_mask_counts() {
        let mut rng = Pcg32::seed_from_u64(6);
        let masked_count = |s: &str| s.chars().filter(|&c| c == MASK_CHAR).count();

        assert_eq!(masked_count(&mask("FLOOD", &mut rng)), 2);
        assert_eq!(masked_count(&mask("OXYGEN", &mut rng)), 3);
        assert_eq!(masked_count(&mask("CONSERVATION", &mut rng)), 3);
        assert_eq!(masked_count(&mask("UV", &mut rng)), 1);

        // Hyphens are never masked and other letters are untouched
        let masked = mask("ECO-FRIENDLY", &mut rng);
        assert_eq!(masked.chars().nth(3), Some('-'));
        for (m, o) in masked.chars().zip("ECO-FRIENDLY".chars()) {
            assert!(m == o || m == MASK_CHAR);
        }
    }

    #[test]
    fn test_fill_in_display_matches_word_shape() {
        let mut puzzle = WordPuzzle::new(PuzzleKind::FillIn, 12).unwrap();
        for _ in 0..20 {
            let state = puzzle.next_word().clone();
            assert_eq!(state.display.chars().count(), state.current_word.chars().count());
            assert!(state.display.contains(MASK_CHAR));
        }
    }
}
