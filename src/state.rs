use std::path::Path;
use std::sync::Arc;

use crate::color::StateColors;
use crate::data::filter::{compare_states, filter_rows, ComparisonSeries};
use crate::data::loader::DatasetCache;
use crate::data::model::SurveyTable;
use crate::data::schema;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The active (State, Survey, Area) selector triple.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub state: String,
    pub survey: String,
    pub area: String,
}

/// The full session state, independent of rendering.
///
/// The table is immutable once loaded; the filtered subset and comparison
/// series are recomputed on every selection change, and the indicator
/// tiles are derived straight from the subset at render time.
pub struct AppState {
    /// Memoized loader, keyed by path + file signature.
    pub cache: DatasetCache,

    /// Loaded dataset (None until a file is opened).
    pub table: Option<Arc<SurveyTable>>,

    /// Current selector triple.
    pub selection: Selection,

    /// Which of the fixed indicators feeds the comparison chart
    /// (index into [`schema::INDICATORS`]).
    pub compare_indicator: usize,

    /// Row indices matching the current triple (cached view).
    pub filtered: Vec<usize>,

    /// Per-state series for the chosen indicator (cached view).
    pub comparison: Option<ComparisonSeries>,

    /// Bar colours, one per state.
    pub state_colors: Option<StateColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: DatasetCache::new(),
            table: None,
            selection: Selection::default(),
            compare_indicator: 0,
            filtered: Vec::new(),
            comparison: None,
            state_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Load a dataset file through the cache; failures become a status
    /// message rather than tearing the session down.
    pub fn load_path(&mut self, path: &Path) {
        match self.cache.load(path) {
            Ok(table) => {
                log::info!("opened {}", path.display());
                self.set_table(table);
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Try the conventional dataset filename in the working directory;
    /// quietly does nothing when it is absent.
    pub fn try_load_default(&mut self) {
        let path = Path::new("All India National Family Health Survey.csv");
        if path.exists() {
            self.load_path(path);
        }
    }

    /// Ingest a loaded table: default every selector to the first of its
    /// sorted distinct values, then derive the dependent views.
    pub fn set_table(&mut self, table: Arc<SurveyTable>) {
        self.selection = Selection {
            state: first_distinct(&table, schema::canonical::STATE),
            survey: first_distinct(&table, schema::canonical::SURVEY),
            area: first_distinct(&table, schema::canonical::AREA),
        };
        self.compare_indicator = 0;
        self.state_colors = Some(StateColors::new(&table.distinct(schema::canonical::STATE)));
        self.table = Some(table);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute the filtered subset and comparison series after a
    /// selection change.
    pub fn refresh(&mut self) {
        let Some(table) = &self.table else {
            self.filtered.clear();
            self.comparison = None;
            return;
        };
        self.filtered = filter_rows(
            table,
            &self.selection.state,
            &self.selection.survey,
            &self.selection.area,
        );
        let indicator = schema::INDICATORS[self.compare_indicator];
        self.comparison = Some(compare_states(
            table,
            &self.selection.survey,
            &self.selection.area,
            indicator.column,
        ));
    }

    pub fn set_state(&mut self, state: String) {
        self.selection.state = state;
        self.refresh();
    }

    pub fn set_survey(&mut self, survey: String) {
        self.selection.survey = survey;
        self.refresh();
    }

    pub fn set_area(&mut self, area: String) {
        self.selection.area = area;
        self.refresh();
    }

    pub fn set_compare_indicator(&mut self, index: usize) {
        self.compare_indicator = index.min(schema::INDICATORS.len() - 1);
        self.refresh();
    }
}

fn first_distinct(table: &SurveyTable, column: &str) -> String {
    table
        .distinct(column)
        .into_iter()
        .next()
        .unwrap_or_default()
}
