//! Draft state for create/edit forms
//!
//! Every form in the portal follows the same shape: a draft that starts
//! empty (create) or from an existing record (edit), a pure validator that
//! returns a field-keyed error map, and per-field error clearing as the user
//! edits. `FormState` owns that lifecycle; each domain only supplies a
//! `Draft` implementation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Validation messages keyed by form field
///
/// At most one message is kept per field: the first rule that fails wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Records a message for `field` unless one is already present
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn remove(&mut self, field: F) {
        self.errors.remove(&field);
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The failing field that comes first in form order
    pub fn first(&self) -> Option<(F, &str)> {
        self.errors
            .iter()
            .next()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl<F: Ord + Copy> Default for FieldErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// The editable state behind a form
///
/// Implementors are plain data plus a pure validator. Field order (the
/// `Ord` on `Field`) is the order fields appear on the form.
pub trait Draft: Clone + Default + fmt::Debug {
    /// The record an edit form is initialised from
    type Record: Clone + fmt::Debug;
    /// The fields that can carry a validation message
    type Field: Copy + Ord + fmt::Debug;

    /// Builds an edit draft from an existing record
    fn from_record(record: &Self::Record) -> Self;

    /// Checks every field, returning an empty map when the draft is valid
    fn validate(&self) -> FieldErrors<Self::Field>;
}

/// Lifecycle of one create/edit form
///
/// # Example
///
/// ```rust,ignore
/// let mut form: FormState<PolicyDraft> = FormState::new();
/// form.open_edit(&policy);
/// form.update(PolicyField::Insurer, |d| d.insurer = "Acme".into());
/// if form.validate() {
///     // submit form.draft()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FormState<D: Draft> {
    draft: D,
    initial: Option<D::Record>,
    errors: FieldErrors<D::Field>,
    open: bool,
}

impl<D: Draft> FormState<D> {
    /// Creates a closed form with an empty draft
    pub fn new() -> Self {
        Self {
            draft: D::default(),
            initial: None,
            errors: FieldErrors::new(),
            open: false,
        }
    }

    /// Opens the form with an empty draft
    pub fn open_create(&mut self) {
        self.draft = D::default();
        self.initial = None;
        self.errors.clear();
        self.open = true;
    }

    /// Opens the form pre-filled from `record`
    pub fn open_edit(&mut self, record: &D::Record) {
        self.draft = D::from_record(record);
        self.initial = Some(record.clone());
        self.errors.clear();
        self.open = true;
    }

    /// Closes the form and discards the draft
    pub fn close(&mut self) {
        *self = Self::new();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The record being edited, or `None` for a create form
    pub fn editing(&self) -> Option<&D::Record> {
        self.initial.as_ref()
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors<D::Field> {
        &self.errors
    }

    /// Applies an edit to one field and clears that field's message
    pub fn update(&mut self, field: D::Field, edit: impl FnOnce(&mut D)) {
        edit(&mut self.draft);
        self.errors.remove(field);
    }

    /// Runs the validator, storing its messages; returns true when valid
    pub fn validate(&mut self) -> bool {
        self.errors = self.draft.validate();
        self.errors.is_empty()
    }

    /// Builds the outgoing payload from the draft, storing its messages
    /// when `build` rejects it
    ///
    /// `build` is expected to validate; rules that need context beyond
    /// the draft itself belong there too.
    pub fn prepare<T, B>(&mut self, build: B) -> Option<T>
    where
        B: FnOnce(&D) -> Result<T, FieldErrors<D::Field>>,
    {
        match build(&self.draft) {
            Ok(payload) => {
                self.errors.clear();
                Some(payload)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}

impl<D: Draft> Default for FormState<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a numeric form input, yielding zero for anything unparsable
///
/// A blank or malformed amount then fails the "must be positive" rule
/// instead of being a separate error path.
pub fn parse_amount_input(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum NoteField {
        Title,
        Body,
    }

    #[derive(Debug, Clone, Default)]
    struct NoteDraft {
        title: String,
        body: String,
    }

    impl Draft for NoteDraft {
        type Record = (String, String);
        type Field = NoteField;

        fn from_record(record: &Self::Record) -> Self {
            Self {
                title: record.0.clone(),
                body: record.1.clone(),
            }
        }

        fn validate(&self) -> FieldErrors<NoteField> {
            let mut errors = FieldErrors::new();
            if self.title.is_empty() {
                errors.insert(NoteField::Title, "Title is required");
            }
            if self.body.is_empty() {
                errors.insert(NoteField::Body, "Body is required");
            }
            errors
        }
    }

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.insert(NoteField::Body, "first");
        errors.insert(NoteField::Body, "second");
        assert_eq!(errors.get(NoteField::Body), Some("first"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_first_follows_field_order() {
        let mut errors = FieldErrors::new();
        errors.insert(NoteField::Body, "body");
        errors.insert(NoteField::Title, "title");
        assert_eq!(errors.first(), Some((NoteField::Title, "title")));
    }

    #[test]
    fn test_create_then_edit_lifecycle() {
        let mut form: FormState<NoteDraft> = FormState::new();
        assert!(!form.is_open());

        form.open_create();
        assert!(form.is_open());
        assert!(form.editing().is_none());
        assert!(!form.validate());
        assert_eq!(form.errors().len(), 2);

        form.update(NoteField::Title, |d| d.title = "Hello".into());
        assert!(!form.errors().contains(NoteField::Title));
        assert!(form.errors().contains(NoteField::Body));

        form.open_edit(&("T".to_string(), "B".to_string()));
        assert!(form.errors().is_empty());
        assert_eq!(form.draft().title, "T");
        assert!(form.editing().is_some());
        assert!(form.validate());

        form.close();
        assert!(!form.is_open());
        assert!(form.editing().is_none());
        assert!(form.draft().title.is_empty());
    }

    #[test]
    fn test_prepare_stores_rejections_on_the_form() {
        let mut form: FormState<NoteDraft> = FormState::new();
        form.open_create();
        form.update(NoteField::Title, |d| d.title = "Draft".into());
        form.update(NoteField::Body, |d| d.body = "text".into());

        let rejected: Option<String> = form.prepare(|draft| {
            let mut errors = draft.validate();
            if draft.title == "Draft" {
                errors.insert(NoteField::Title, "Title is taken");
            }
            if errors.is_empty() { Ok(draft.title.clone()) } else { Err(errors) }
        });
        assert!(rejected.is_none());
        assert_eq!(form.errors().get(NoteField::Title), Some("Title is taken"));

        form.update(NoteField::Title, |d| d.title = "Final".into());
        let built = form.prepare(|draft| Ok::<_, FieldErrors<NoteField>>(draft.title.clone()));
        assert_eq!(built.as_deref(), Some("Final"));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_parse_amount_input() {
        assert_eq!(parse_amount_input(" 12.50 "), dec!(12.50));
        assert_eq!(parse_amount_input("abc"), Decimal::ZERO);
        assert_eq!(parse_amount_input(""), Decimal::ZERO);
    }
}
