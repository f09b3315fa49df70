use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;

/// Body given to notes that are created without one
pub(crate) const DEFAULT_BODY: &str = "No description";

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct NoteId(Uuid);

impl NoteId {
    fn generate() -> NoteId {
        NoteId(Uuid::new_v4())
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

/// A user-entered task.  Notes are never modified after creation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Note {
    id: NoteId,
    title: String,
    body: String,
    created_at: OffsetDateTime,
}

impl Note {
    /// An empty title is accepted and simply displays as blank.  A missing
    /// or empty body is replaced with [`DEFAULT_BODY`].
    pub(crate) fn new(title: String, body: Option<String>) -> Note {
        let body = body
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| String::from(DEFAULT_BODY));
        Note {
            id: NoteId::generate(),
            title,
            body,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub(crate) fn id(&self) -> NoteId {
        self.id
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn body(&self) -> &str {
        &self.body
    }

    pub(crate) fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}
