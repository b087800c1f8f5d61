/// Editable text with a caret, stored as a byte offset on a char boundary.
#[derive(Clone, Debug, Default)]
pub struct FieldValue {
    pub value: String,
    cursor: usize,
}

impl FieldValue {
    pub fn new(value: &str) -> Self {
        FieldValue {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_left(&mut self) {
        if let Some(ch) = self.value[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.value[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_up(&mut self) {
        let (starts, line, col) = self.line_position();
        if line == 0 {
            return;
        }
        self.cursor = self.index_at_col(starts[line - 1], col);
    }

    pub fn move_down(&mut self) {
        let (starts, line, col) = self.line_position();
        if line + 1 >= starts.len() {
            return;
        }
        self.cursor = self.index_at_col(starts[line + 1], col);
    }

    pub fn backspace(&mut self) {
        let end = self.cursor;
        self.move_left();
        self.value.drain(self.cursor..end);
    }

    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert(self.cursor, '▌');
        text
    }

    /// Byte offsets of each line start, the caret's line, and its column in
    /// chars.
    fn line_position(&self) -> (Vec<usize>, usize, usize) {
        let mut starts = vec![0];
        starts.extend(
            self.value
                .char_indices()
                .filter(|(_, ch)| *ch == '\n')
                .map(|(idx, _)| idx + 1),
        );
        let line = starts
            .iter()
            .rposition(|&start| start <= self.cursor)
            .unwrap_or(0);
        let col = self.value[starts[line]..self.cursor].chars().count();
        (starts, line, col)
    }

    fn index_at_col(&self, start: usize, col: usize) -> usize {
        let rest = &self.value[start..];
        let line_len = rest.find('\n').unwrap_or(rest.len());
        rest[..line_len]
            .char_indices()
            .nth(col)
            .map(|(idx, _)| start + idx)
            .unwrap_or(start + line_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut field = FieldValue::new("");
        for ch in "héllo".chars() {
            field.insert_char(ch);
        }
        field.backspace();
        field.backspace();
        assert_eq!(field.value, "hél");
        field.move_left();
        field.backspace();
        assert_eq!(field.value, "hl");
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn test_moves_stop_at_edges() {
        let mut field = FieldValue::new("ab");
        field.move_right();
        assert_eq!(field.cursor(), 2);
        field.move_left();
        field.move_left();
        field.move_left();
        assert_eq!(field.cursor(), 0);
        field.backspace();
        assert_eq!(field.value, "ab");
    }

    #[test]
    fn test_vertical_moves_keep_column() {
        let mut field = FieldValue::new("first line\nab\nthird");
        field.move_up();
        assert_eq!(field.cursor(), "first line\n".len() + 2);
        field.move_up();
        assert_eq!(field.cursor(), 2);
        field.move_down();
        field.move_down();
        assert_eq!(field.cursor(), "first line\nab\n".len() + 2);
        field.move_down();
        assert_eq!(field.cursor(), "first line\nab\n".len() + 2);
    }

    #[test]
    fn test_with_caret() {
        let mut field = FieldValue::new("ab");
        field.move_left();
        assert_eq!(field.with_caret(), "a▌b");
    }
}
