pub type NoteId = String;
pub type SectionId = String;

/// Upper bound on the number of sections a board can be created with.
pub const MAX_SECTIONS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub name: String,
    pub description: String,
    pub section_count: u8,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub section_id: SectionId,
    pub color: String,
    pub votes: u32,
}

impl Board {
    /// Builds a board whose sections get sequential ids in title order.
    pub fn with_titles(
        name: impl Into<String>,
        description: impl Into<String>,
        titles: &[String],
    ) -> Self {
        let sections = titles
            .iter()
            .enumerate()
            .map(|(idx, title)| Section {
                id: section_id(idx),
                title: title.clone(),
            })
            .collect::<Vec<_>>();
        Board {
            name: name.into(),
            description: description.into(),
            section_count: sections.len() as u8,
            sections,
        }
    }

    pub fn find_section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

impl Note {
    pub fn new(id: NoteId, content: String, section_id: SectionId, color: String) -> Self {
        Note {
            id,
            content,
            section_id,
            color,
            votes: 0,
        }
    }
}

pub fn section_id(index: usize) -> SectionId {
    format!("section-{}", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_titles_assigns_sequential_ids() {
        let titles = vec!["Good".to_string(), "Bad".to_string()];
        let board = Board::with_titles("Sprint 1", "Retro", &titles);
        assert_eq!(board.section_count, 2);
        assert_eq!(
            board.sections,
            vec![
                Section {
                    id: "section-0".into(),
                    title: "Good".into()
                },
                Section {
                    id: "section-1".into(),
                    title: "Bad".into()
                },
            ]
        );
    }

    #[test]
    fn test_find_section_index() {
        let titles = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let board = Board::with_titles("b", "d", &titles);
        assert_eq!(board.find_section_index("section-2"), Some(2));
        assert_eq!(board.find_section_index("section-3"), None);
        assert_eq!(board.section("section-1").map(|s| s.title.as_str()), Some("B"));
    }

    #[test]
    fn test_new_note_starts_without_votes() {
        let note = Note::new("note-1".into(), "hi".into(), "section-0".into(), "c".into());
        assert_eq!(note.votes, 0);
    }
}
