use crate::dnd::DropHandler;
use crate::form::{BoardForm, FormErrors};
use crate::model::{Board, NoteId};
use crate::notes::NoteStore;
use tracing::{debug, info};

/// Which screen the session is on.
#[derive(Debug, Clone)]
pub enum Step {
    BoardDetails(BoardForm),
    BoardView(Board),
}

/// All state of one retro session: the current step and the note snapshot.
pub struct Session {
    step: Step,
    notes: NoteStore,
    note_color: String,
    default_section_count: usize,
}

impl Session {
    pub fn new(
        form: BoardForm,
        note_color: impl Into<String>,
        default_section_count: usize,
    ) -> Self {
        Session {
            step: Step::BoardDetails(form),
            notes: NoteStore::new(),
            note_color: note_color.into(),
            default_section_count,
        }
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn board(&self) -> Option<&Board> {
        match &self.step {
            Step::BoardView(board) => Some(board),
            Step::BoardDetails(_) => None,
        }
    }

    pub fn form(&self) -> Option<&BoardForm> {
        match &self.step {
            Step::BoardDetails(form) => Some(form),
            Step::BoardView(_) => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut BoardForm> {
        match &mut self.step {
            Step::BoardDetails(form) => Some(form),
            Step::BoardView(_) => None,
        }
    }

    /// Validates the creation form and, when it passes, moves to the board
    /// view. Does nothing outside the creation step.
    pub fn submit_form(&mut self) -> Result<(), FormErrors> {
        let form = match &mut self.step {
            Step::BoardDetails(form) => form,
            Step::BoardView(_) => return Ok(()),
        };
        let board = form.submit()?;
        info!(
            name = %board.name,
            sections = board.sections.len(),
            "board created"
        );
        self.step = Step::BoardView(board);
        Ok(())
    }

    pub fn add_note(&mut self, section_id: &str, content: &str) -> Option<NoteId> {
        if self.board().is_none() {
            return None;
        }
        let (next, id) = self.notes.add(section_id, content, &self.note_color)?;
        self.notes = next;
        info!(note_id = %id, section_id, "note added");
        Some(id)
    }

    pub fn move_note(&mut self, note_id: &str, dest_section_id: &str) -> bool {
        let next = self.notes.move_note(note_id, dest_section_id);
        self.apply(next, "note moved", note_id)
    }

    pub fn vote_note(&mut self, note_id: &str) -> bool {
        let next = self.notes.vote(note_id);
        self.apply(next, "note voted", note_id)
    }

    pub fn delete_note(&mut self, note_id: &str) -> bool {
        let next = self.notes.delete(note_id);
        self.apply(next, "note deleted", note_id)
    }

    /// Replaces a note's content. Blank content is discarded and the note
    /// keeps what it had.
    pub fn edit_note(&mut self, note_id: &str, content: &str) -> bool {
        if content.trim().is_empty() {
            debug!(note_id, "discarding blank edit");
            return false;
        }
        let next = self.notes.edit(note_id, content);
        self.apply(next, "note edited", note_id)
    }

    /// Drops the board and every note and returns to a fresh creation form.
    pub fn reset(&mut self) {
        info!(discarded_notes = self.notes.len(), "board reset");
        self.notes = NoteStore::new();
        self.step = Step::BoardDetails(BoardForm::new(self.default_section_count));
    }

    fn apply(&mut self, next: Option<NoteStore>, action: &str, note_id: &str) -> bool {
        match next {
            Some(store) => {
                self.notes = store;
                debug!(note_id, "{}", action);
                true
            }
            None => {
                debug!(note_id, "{} skipped: note not found", action);
                false
            }
        }
    }
}

impl DropHandler for Session {
    fn on_drop(&mut self, item_id: &str, target_container_id: &str) -> bool {
        if item_id == target_container_id {
            return false;
        }
        self.move_note(item_id, target_container_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_session() -> Session {
        let form = BoardForm::prefilled(
            2,
            Some("Sprint 1".into()),
            Some("Retro".into()),
            vec!["Good".into(), "Bad".into()],
        );
        let mut session = Session::new(form, "enhanced-note", 2);
        session.submit_form().unwrap();
        session
    }

    #[test]
    fn test_invalid_form_stays_on_details() {
        let mut session = Session::new(BoardForm::new(2), "enhanced-note", 2);
        let errors = session.submit_form().unwrap_err();
        assert!(!errors.is_empty());
        assert!(session.board().is_none());
        assert!(matches!(session.step, Step::BoardDetails(_)));
    }

    #[test]
    fn test_walkthrough() {
        let mut session = view_session();
        let board = session.board().unwrap();
        assert_eq!(board.sections[0].id, "section-0");
        assert_eq!(board.sections[1].title, "Bad");

        let id = session.add_note("section-0", "Great teamwork").unwrap();
        assert_eq!(session.notes().len(), 1);
        let note = session.notes().get(&id).unwrap();
        assert_eq!(note.votes, 0);
        assert_eq!(note.color, "enhanced-note");

        assert!(session.vote_note(&id));
        assert!(session.vote_note(&id));
        assert_eq!(session.notes().get(&id).unwrap().votes, 2);

        assert!(session.move_note(&id, "section-1"));
        let note = session.notes().get(&id).unwrap();
        assert_eq!(note.section_id, "section-1");
        assert_eq!(note.votes, 2);
    }

    #[test]
    fn test_add_before_board_exists_is_ignored() {
        let mut session = Session::new(BoardForm::new(2), "c", 2);
        assert!(session.add_note("section-0", "hi").is_none());
        assert!(session.notes().is_empty());
    }

    #[test]
    fn test_blank_edit_keeps_content() {
        let mut session = view_session();
        let id = session.add_note("section-0", "original").unwrap();
        assert!(!session.edit_note(&id, "   "));
        assert_eq!(session.notes().get(&id).unwrap().content, "original");
        assert!(session.edit_note(&id, "changed"));
        assert_eq!(session.notes().get(&id).unwrap().content, "changed");
    }

    #[test]
    fn test_delete_and_missing_ids() {
        let mut session = view_session();
        let a = session.add_note("section-0", "a").unwrap();
        let b = session.add_note("section-1", "b").unwrap();
        assert!(session.delete_note(&a));
        assert!(!session.delete_note(&a));
        assert!(!session.vote_note("nope"));
        assert_eq!(session.notes().len(), 1);
        assert!(session.notes().get(&b).is_some());
    }

    #[test]
    fn test_reset_clears_notes_and_returns_to_form() {
        let mut session = view_session();
        for i in 0..5 {
            session.add_note("section-0", &format!("note {}", i));
        }
        session.reset();
        assert!(session.notes().is_empty());
        assert!(session.board().is_none());
        let form = session.form_mut().unwrap();
        assert_eq!(form.name(), "");
        assert_eq!(form.section_titles().len(), 2);
    }

    #[test]
    fn test_on_drop_moves_note() {
        let mut session = view_session();
        let id = session.add_note("section-0", "drag me").unwrap();
        assert!(session.on_drop(&id, "section-1"));
        assert_eq!(session.notes().get(&id).unwrap().section_id, "section-1");
    }

    #[test]
    fn test_on_drop_onto_itself_is_ignored() {
        let mut session = view_session();
        let id = session.add_note("section-0", "drag me").unwrap();
        assert!(!session.on_drop(&id, &id));
        assert_eq!(session.notes().get(&id).unwrap().section_id, "section-0");
    }
}
