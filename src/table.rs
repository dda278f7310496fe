// src/table.rs
//
// Generic entity table engine: one column-descriptor-driven implementation
// of search, sort and pagination shared by every entity list view. The
// engine never mutates its input and performs no I/O; add/edit/delete stay
// with the caller.

use serde::Serialize;
use serde_json::Value;

/// Where a cell's display text comes from. A custom renderer always receives
/// the full row so it can combine fields; when present it takes precedence
/// over the accessor for display, while the accessor keeps driving search
/// and sort.
pub enum CellSource<T> {
    Accessor(String),
    Render(String, fn(&T) -> String),
}

pub struct Column<T> {
    pub header: String,
    pub source: CellSource<T>,
    pub sortable: bool,
}

impl<T> Column<T> {
    pub fn accessor(path: &str, header: &str) -> Self {
        Column {
            header: header.to_string(),
            source: CellSource::Accessor(path.to_string()),
            sortable: true,
        }
    }

    pub fn rendered(path: &str, header: &str, render: fn(&T) -> String) -> Self {
        Column {
            header: header.to_string(),
            source: CellSource::Render(path.to_string(), render),
            sortable: true,
        }
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Accessor path driving search and sort for this column.
    pub fn path(&self) -> &str {
        match &self.source {
            CellSource::Accessor(p) => p,
            CellSource::Render(p, _) => p,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// The three pieces of view-local state: search term, current page (1-based)
/// and the active sort column/direction.
#[derive(Debug, Clone)]
pub struct TableState {
    pub search: String,
    pub page: usize,
    pub sort: Option<(usize, SortDir)>,
}

impl Default for TableState {
    fn default() -> Self {
        TableState {
            search: String::new(),
            page: 1,
            sort: None,
        }
    }
}

impl TableState {
    /// Changing the search term always snaps back to the first page.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.page = 1;
    }

    /// Header-click semantics: same column toggles direction, a different
    /// column resets to ascending.
    pub fn click_header(&mut self, column: usize) {
        self.sort = match self.sort {
            Some((c, SortDir::Asc)) if c == column => Some((column, SortDir::Desc)),
            Some((c, SortDir::Desc)) if c == column => Some((column, SortDir::Asc)),
            _ => Some((column, SortDir::Asc)),
        };
    }

    pub fn goto(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

/// One evaluated page of the filtered/sorted view.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

/// Resolves a dot-delimited path into a JSON value; `None` for any missing
/// hop.
fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut cur = value;
    for part in path.split('.') {
        cur = cur.get(part)?;
    }
    Some(cur)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cmp_values(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(x), Some(y)) => stringify(x).cmp(&stringify(y)),
    }
}

/// Evaluates the table over `data` with the given state. Pure function of
/// its inputs, recomputed per call; `data` is never mutated (rows are cloned
/// into the page).
///
/// - filter: case-insensitive substring match of the search term against the
///   stringified accessor value of every column; a row stays if ANY column
///   matches. An empty term keeps everything.
/// - sort: stable, by resolved accessor value of the sort column.
/// - pagination: fixed `page_size` over the filtered set; an out-of-range
///   page clamps to the last page; page count is at least 1.
pub fn evaluate<T: Serialize + Clone>(
    data: &[T],
    columns: &[Column<T>],
    state: &TableState,
    page_size: usize,
) -> Page<T> {
    let needle = state.search.trim().to_lowercase();

    let mut filtered: Vec<(&T, Value)> = data
        .iter()
        .map(|row| (row, serde_json::to_value(row).unwrap_or(Value::Null)))
        .filter(|(_, json)| {
            if needle.is_empty() {
                return true;
            }
            columns.iter().any(|col| {
                resolve_path(json, col.path())
                    .map(stringify)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .collect();

    if let Some((col_idx, dir)) = state.sort {
        if let Some(col) = columns.get(col_idx).filter(|c| c.sortable) {
            let path = col.path().to_string();
            filtered.sort_by(|(_, a), (_, b)| {
                let ord = cmp_values(resolve_path(a, &path), resolve_path(b, &path));
                match dir {
                    SortDir::Asc => ord,
                    SortDir::Desc => ord.reverse(),
                }
            });
        }
    }

    let total = filtered.len();
    let size = page_size.max(1);
    let page_count = total.div_ceil(size).max(1);
    let page = state.page.clamp(1, page_count);
    let start = (page - 1) * size;
    let items = filtered
        .iter()
        .skip(start)
        .take(size)
        .map(|(row, _)| (*row).clone())
        .collect();

    Page {
        items,
        page,
        page_count,
        total,
    }
}

/// Display text for one cell: the renderer wins when present, otherwise the
/// stringified accessor value.
pub fn cell_text<T: Serialize>(row: &T, column: &Column<T>) -> String {
    match &column.source {
        CellSource::Render(_, render) => render(row),
        CellSource::Accessor(path) => {
            let json = serde_json::to_value(row).unwrap_or(Value::Null);
            resolve_path(&json, path).map(stringify).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Serialize)]
    struct Person {
        name: String,
        age: u32,
    }

    fn people() -> Vec<Person> {
        vec![
            Person { name: "Juan".into(), age: 34 },
            Person { name: "Ana".into(), age: 28 },
            Person { name: "Bruno".into(), age: 41 },
        ]
    }

    fn name_col() -> Vec<Column<Person>> {
        vec![Column::accessor("name", "Nombre")]
    }

    #[test]
    fn test_filter_substring_case_insensitive() {
        let data = people();
        let cols = name_col();
        let mut state = TableState::default();

        state.set_search("an");
        let page = evaluate(&data, &cols, &state, 10);
        // "Juan" and "Ana" both contain "an" case-insensitively
        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Juan", "Ana"]);

        state.set_search("ju");
        let page = evaluate(&data, &cols, &state, 10);
        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Juan"]);
    }

    #[test]
    fn test_filter_matches_any_column() {
        let data = people();
        let cols = vec![
            Column::accessor("name", "Nombre"),
            Column::accessor("age", "Edad"),
        ];
        let mut state = TableState::default();
        state.set_search("41");
        let page = evaluate(&data, &cols, &state, 10);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Bruno");
    }

    #[test]
    fn test_pagination_23_rows_page_3() {
        let data: Vec<Person> = (0..23)
            .map(|i| Person { name: format!("p{i:02}"), age: i })
            .collect();
        let cols = name_col();
        let mut state = TableState::default();
        state.goto(3);

        let page = evaluate(&data, &cols, &state, 10);
        assert_eq!(page.total, 23);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].name, "p20");
    }

    #[test]
    fn test_out_of_range_page_clamps_to_last() {
        let data = people();
        let cols = name_col();
        let mut state = TableState::default();
        state.goto(99);
        let page = evaluate(&data, &cols, &state, 2);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_empty_data_yields_single_empty_page() {
        let data: Vec<Person> = Vec::new();
        let page = evaluate(&data, &name_col(), &TableState::default(), 10);
        assert_eq!(page.total, 0);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = TableState::default();
        state.goto(3);
        state.set_search("ana");
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_sort_toggle_and_reset() {
        let mut state = TableState::default();
        state.click_header(0);
        assert_eq!(state.sort, Some((0, SortDir::Asc)));
        state.click_header(0);
        assert_eq!(state.sort, Some((0, SortDir::Desc)));
        // a different column starts ascending again
        state.click_header(1);
        assert_eq!(state.sort, Some((1, SortDir::Asc)));
    }

    #[test]
    fn test_sort_orders_rows() {
        let data = people();
        let cols = vec![
            Column::accessor("name", "Nombre"),
            Column::accessor("age", "Edad"),
        ];
        let mut state = TableState::default();
        state.click_header(1);
        let page = evaluate(&data, &cols, &state, 10);
        let ages: Vec<u32> = page.items.iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![28, 34, 41]);

        state.click_header(1);
        let page = evaluate(&data, &cols, &state, 10);
        let ages: Vec<u32> = page.items.iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![41, 34, 28]);
    }

    #[test]
    fn test_non_sortable_column_ignores_sort() {
        let data = people();
        let cols = vec![Column::accessor("name", "Nombre").not_sortable()];
        let mut state = TableState::default();
        state.click_header(0);
        let page = evaluate(&data, &cols, &state, 10);
        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
        // input order preserved
        assert_eq!(names, vec!["Juan", "Ana", "Bruno"]);
    }

    #[test]
    fn test_nested_accessor_path() {
        let data = vec![
            json!({"patient": {"name": "Rosa"}, "id": 1}),
            json!({"patient": {"name": "Luis"}, "id": 2}),
        ];
        let cols: Vec<Column<Value>> = vec![Column::accessor("patient.name", "Paciente")];
        let mut state = TableState::default();
        state.set_search("luis");
        let page = evaluate(&data, &cols, &state, 10);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0]["id"], 2);
    }

    #[test]
    fn test_missing_path_treated_as_empty() {
        let data = vec![json!({"a": 1}), json!({"b": 2})];
        let cols: Vec<Column<Value>> = vec![Column::accessor("a", "A")];
        let mut state = TableState::default();
        state.set_search("1");
        let page = evaluate(&data, &cols, &state, 10);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_renderer_takes_precedence_for_display() {
        let data = people();
        let col = Column::rendered("name", "Persona", |p: &Person| {
            format!("{} ({})", p.name, p.age)
        });
        assert_eq!(cell_text(&data[0], &col), "Juan (34)");

        let plain = Column::accessor("age", "Edad");
        assert_eq!(cell_text(&data[0], &plain), "34");
    }

    #[test]
    fn test_stable_sort_preserves_tie_order() {
        let data = vec![
            json!({"g": "x", "n": "first"}),
            json!({"g": "x", "n": "second"}),
            json!({"g": "a", "n": "third"}),
        ];
        let cols: Vec<Column<Value>> = vec![Column::accessor("g", "G")];
        let mut state = TableState::default();
        state.click_header(0);
        let page = evaluate(&data, &cols, &state, 10);
        assert_eq!(page.items[0]["n"], "third");
        assert_eq!(page.items[1]["n"], "first");
        assert_eq!(page.items[2]["n"], "second");
    }
}
