/// A reading passage: a title and its ordered paragraphs.
///
/// Paragraphs are addressed by their zero-based position. Only built through
/// `ExerciseDraft::validate`, which guarantees at least one paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingPassage {
    title: String,
    paragraphs: Vec<String>,
}

impl ReadingPassage {
    pub(crate) fn new(title: String, paragraphs: Vec<String>) -> Self {
        Self { title, paragraphs }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    #[must_use]
    pub fn paragraph(&self, index: usize) -> Option<&str> {
        self.paragraphs.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    #[must_use]
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.paragraphs.len()
    }

    /// Rough word count across all paragraphs.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.paragraphs
            .iter()
            .map(|p| p.split_whitespace().count())
            .sum()
    }
}

/// Letter label for a paragraph index: 0 → "A", 25 → "Z", 26 → "AA".
#[must_use]
pub fn paragraph_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index;
    loop {
        // `n % 26` is always < 26, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        label.push(char::from(b'A' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    label.iter().rev().collect()
}
