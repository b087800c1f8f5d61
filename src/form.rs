use crate::model::{Board, MAX_SECTIONS};
use std::collections::BTreeMap;

/// Identifies a field of the board creation form, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Description,
    SectionCount,
    SectionTitle(usize),
}

pub type FormErrors = BTreeMap<FormField, String>;

pub const NAME_REQUIRED: &str = "Board name is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const SECTION_COUNT_RANGE: &str = "Section count must be between 1 and 4";
pub const SECTION_TITLE_REQUIRED: &str = "Section title is required";

/// Input collected on the board creation step.
#[derive(Debug, Clone)]
pub struct BoardForm {
    name: String,
    description: String,
    section_count: String,
    section_titles: Vec<String>,
    errors: FormErrors,
}

impl BoardForm {
    pub fn new(default_section_count: usize) -> Self {
        let count = default_section_count.min(MAX_SECTIONS);
        BoardForm {
            name: String::new(),
            description: String::new(),
            section_count: count.to_string(),
            section_titles: vec![String::new(); count],
            errors: FormErrors::new(),
        }
    }

    /// Form pre-filled from command-line values. Titles, when given, also
    /// decide the section count. All of them are kept, even past the section
    /// limit, so submit reports the count and nothing is lost until the count
    /// is changed.
    pub fn prefilled(
        default_section_count: usize,
        name: Option<String>,
        description: Option<String>,
        titles: Vec<String>,
    ) -> Self {
        let mut form = BoardForm::new(default_section_count);
        if let Some(name) = name {
            form.set_name(name);
        }
        if let Some(description) = description {
            form.set_description(description);
        }
        if !titles.is_empty() {
            form.section_count = titles.len().to_string();
            form.section_titles = titles;
        }
        form
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn section_count(&self) -> &str {
        &self.section_count
    }

    pub fn section_titles(&self) -> &[String] {
        &self.section_titles
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.errors.remove(&FormField::Name);
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
        self.errors.remove(&FormField::Description);
    }

    /// Stores the raw count input and resizes the title list to match.
    /// Growing appends blank titles, shrinking drops trailing ones. Input that
    /// is not a number leaves the titles alone.
    pub fn set_section_count(&mut self, value: impl Into<String>) {
        self.section_count = value.into();
        self.errors.remove(&FormField::SectionCount);
        if let Some(count) = parse_count(&self.section_count) {
            let target = count.clamp(0, MAX_SECTIONS as i64) as usize;
            self.section_titles.resize(target, String::new());
            self.errors
                .retain(|field, _| !matches!(field, FormField::SectionTitle(i) if *i >= target));
        }
    }

    pub fn set_section_title(&mut self, index: usize, value: impl Into<String>) {
        if let Some(title) = self.section_titles.get_mut(index) {
            *title = value.into();
            self.errors.remove(&FormField::SectionTitle(index));
        }
    }

    /// Validates every field. On success returns the board; otherwise the
    /// per-field errors are kept on the form and nothing is produced.
    pub fn submit(&mut self) -> Result<Board, FormErrors> {
        let mut errors = FormErrors::new();
        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, NAME_REQUIRED.to_string());
        }
        if self.description.trim().is_empty() {
            errors.insert(FormField::Description, DESCRIPTION_REQUIRED.to_string());
        }
        match parse_count(&self.section_count) {
            Some(count) if (1..=MAX_SECTIONS as i64).contains(&count) => {}
            _ => {
                errors.insert(FormField::SectionCount, SECTION_COUNT_RANGE.to_string());
            }
        }
        for (idx, title) in self.section_titles.iter().enumerate() {
            if title.trim().is_empty() {
                errors.insert(
                    FormField::SectionTitle(idx),
                    SECTION_TITLE_REQUIRED.to_string(),
                );
            }
        }
        self.errors = errors.clone();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Board::with_titles(
            self.name.clone(),
            self.description.clone(),
            &self.section_titles,
        ))
    }
}

fn parse_count(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
