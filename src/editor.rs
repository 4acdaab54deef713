// Transactional chart configuration editing

use crate::ir::{ChartKind, ResolvedChartSpec, VisualizationDescriptor};
use tracing::debug;

/// A single-field change to the working descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    ChartKind(Option<String>),
    XAxis(Option<String>),
    /// Add the column to the end of the y-axis, or remove it if present
    ToggleYAxis(String),
    Title(Option<String>),
    Description(Option<String>),
}

impl FieldEdit {
    pub fn kind(kind: ChartKind) -> Self {
        FieldEdit::ChartKind(Some(kind.as_str().to_string()))
    }
}

/// An untouched `original` plus an independent `working` copy.
///
/// Edits only touch `working`. Nothing is validated here: a column or kind the
/// data cannot honor degrades later, at resolve time.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    original: VisualizationDescriptor,
    working: VisualizationDescriptor,
}

impl EditSession {
    pub fn open(descriptor: &VisualizationDescriptor) -> Self {
        Self {
            original: descriptor.clone(),
            working: descriptor.clone(),
        }
    }

    /// Open on the concrete descriptor of an already-resolved spec
    pub fn open_resolved(spec: &ResolvedChartSpec) -> Self {
        Self::open(&spec.descriptor())
    }

    pub fn original(&self) -> &VisualizationDescriptor {
        &self.original
    }

    pub fn working(&self) -> &VisualizationDescriptor {
        &self.working
    }

    pub fn is_dirty(&self) -> bool {
        self.original != self.working
    }

    /// Replace exactly one field of the working copy
    pub fn set_field(mut self, edit: FieldEdit) -> Self {
        debug!(?edit, "editing chart field");
        let working = &mut self.working;
        match edit {
            FieldEdit::ChartKind(kind) => working.chart_kind = kind,
            FieldEdit::XAxis(x) => working.x_axis = x,
            FieldEdit::ToggleYAxis(column) => {
                working.y_axis = Some(toggle_column(working.y_axis.take().unwrap_or_default(), column));
            }
            FieldEdit::Title(title) => working.title = title,
            FieldEdit::Description(description) => working.description = description,
        }
        self
    }

    /// Apply edits in order
    pub fn apply<I>(self, edits: I) -> Self
    where
        I: IntoIterator<Item = FieldEdit>,
    {
        edits.into_iter().fold(self, EditSession::set_field)
    }

    /// End the session, handing back the working descriptor for the caller to store
    /// and re-resolve.
    pub fn commit(self) -> VisualizationDescriptor {
        debug!(dirty = self.is_dirty(), "committing chart edit");
        self.working
    }

    /// End the session without effect
    pub fn cancel(self) {
        debug!(dirty = self.is_dirty(), "cancelling chart edit");
    }
}

/// Remove `column` if present, otherwise append it. Re-adding goes to the end.
fn toggle_column(mut y_axis: Vec<String>, column: String) -> Vec<String> {
    if y_axis.contains(&column) {
        y_axis.retain(|c| *c != column);
    } else {
        y_axis.push(column);
    }
    y_axis
}
