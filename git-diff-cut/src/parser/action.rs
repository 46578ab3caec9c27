/// Kind of a hunk content line, taken from its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineAction {
    /// `' '` – context line, present in both versions.
    Unchanged,
    /// `'-'` – present only in the old version.
    Removed,
    /// `'+'` – present only in the new version.
    Added,
}

impl LineAction {
    /// Classifies a raw hunk line.
    ///
    /// Returns `None` for an empty line or any other leading byte; such a line
    /// ends the hunk content.
    pub fn classify(line: &str) -> Option<Self> {
        match line.as_bytes().first()? {
            b' ' => Some(Self::Unchanged),
            b'-' => Some(Self::Removed),
            b'+' => Some(Self::Added),
            _ => None,
        }
    }

    /// Whether the line exists in the old file.
    pub fn counts_old(self) -> bool {
        self != Self::Added
    }

    /// Whether the line exists in the new file.
    pub fn counts_new(self) -> bool {
        self != Self::Removed
    }
}
