use std::rc::Rc;

use gpui::{
    App, ElementId, Entity, FontWeight, IntoElement, ParentElement, RenderOnce, SharedString,
    Styled, Window, div, px,
};
use indexmap::IndexMap;

use super::{Field, FieldProps, LabeledField, ValueChangeHandler};
use crate::{
    ElementIdExt, IconKind,
    components::{Button, ButtonSize, ButtonVariant, Icon, TextInput},
    primitives::input::InputState,
    theme::{ThemeExt, ThemeSettings},
};

/// A grid column: the key cells are stored under and its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridColumn {
    pub key: SharedString,
    pub label: SharedString,
}

impl<K: Into<SharedString>, L: Into<SharedString>> From<(K, L)> for GridColumn {
    fn from((key, label): (K, L)) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// One row. The id stays with the row when others are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub id: u64,
    pub cells: IndexMap<SharedString, SharedString>,
}

/// Rows of a data grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataGrid {
    columns: Vec<GridColumn>,
    rows: Vec<GridRow>,
    next_id: u64,
}

impl DataGrid {
    pub fn new(columns: Vec<GridColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            next_id: 0,
        }
    }

    pub fn columns(&self) -> &[GridColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// Appends a row with an empty cell for every column and returns its id.
    pub fn add_row(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let cells = self
            .columns
            .iter()
            .map(|column| (column.key.clone(), SharedString::default()))
            .collect();
        self.rows.push(GridRow { id, cells });
        id
    }

    /// Appends a row from `(key, value)` pairs. Columns without a value stay empty and
    /// keys that name no column are ignored.
    pub fn push_row<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>) -> u64
    where
        K: AsRef<str>,
        V: Into<SharedString>,
    {
        let id = self.add_row();
        let index = self.rows.len() - 1;
        for (key, value) in values {
            self.update_cell(index, key.as_ref(), value);
        }
        id
    }

    pub fn remove_row(&mut self, index: usize) -> Option<GridRow> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    /// Sets one cell. Returns false for an unknown row or column.
    pub fn update_cell(&mut self, index: usize, key: &str, value: impl Into<SharedString>) -> bool {
        let Some(cell) = self
            .rows
            .get_mut(index)
            .and_then(|row| row.cells.get_mut(key))
        else {
            return false;
        };
        *cell = value.into();
        true
    }

    fn index_of(&self, id: u64) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Cell values of every row, in column order.
    pub fn values(&self) -> Vec<IndexMap<SharedString, SharedString>> {
        self.rows.iter().map(|row| row.cells.clone()).collect()
    }
}

/// Editable table with "Add Row" and per-row remove.
#[derive(IntoElement)]
pub struct DataGridField {
    id: ElementId,
    settings: ThemeSettings,
    props: FieldProps,
    columns: Vec<GridColumn>,
    default_rows: Vec<Vec<(SharedString, SharedString)>>,
    on_change: Option<ValueChangeHandler<Vec<IndexMap<SharedString, SharedString>>>>,
}

impl DataGridField {
    pub fn new(id: impl Into<ElementId>, settings: ThemeSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            props: FieldProps::default(),
            columns: Vec::new(),
            default_rows: Vec::new(),
            on_change: None,
        }
    }

    pub fn columns<C: Into<GridColumn>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// A row present when the grid first renders. Without any, the grid starts with
    /// one empty row.
    pub fn row<K, V>(mut self, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<SharedString>,
        V: Into<SharedString>,
    {
        self.default_rows.push(
            values
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&Vec<IndexMap<SharedString, SharedString>>, &mut Window, &mut App)
        + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl LabeledField for DataGridField {
    fn props_mut(&mut self) -> &mut FieldProps {
        &mut self.props
    }
}

fn notify_grid(
    grid: &Entity<DataGrid>,
    on_change: Option<&ValueChangeHandler<Vec<IndexMap<SharedString, SharedString>>>>,
    window: &mut Window,
    cx: &mut App,
) {
    if let Some(on_change) = on_change {
        let values = grid.read(cx).values();
        on_change(&values, window, cx);
    }
}

impl RenderOnce for DataGridField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let columns = self.columns.clone();
        let default_rows = self.default_rows.clone();
        let grid =
            window.use_keyed_state(self.id.with_suffix("state:grid"), cx, move |_window, _cx| {
                let mut grid = DataGrid::new(columns);
                if default_rows.is_empty() {
                    grid.add_row();
                }
                for row in default_rows {
                    grid.push_row(row);
                }
                grid
            });
        let snapshot = grid.read(cx).clone();

        let theme = cx.get_theme();
        let caption_size = theme.layout.text.default_font.sizes.caption;
        let header_color = theme.colors.text.secondary;
        let header_bg = theme.colors.surface.secondary;
        let border_color = theme.colors.border.primary;
        let icon_color = theme.colors.text.secondary;
        let disabled = self.props.disabled;

        let header = div()
            .flex()
            .gap(px(8.))
            .px(px(8.))
            .py(px(6.))
            .bg(header_bg)
            .border_b_1()
            .border_color(border_color)
            .children(snapshot.columns().iter().map(|column| {
                div()
                    .flex_1()
                    .text_size(caption_size)
                    .font_weight(FontWeight::MEDIUM)
                    .text_color(header_color)
                    .child(column.label.clone())
            }))
            .child(div().w(px(36.)));

        let mut rows = Vec::with_capacity(snapshot.rows().len());
        for row in snapshot.rows() {
            let row_id = self.id.with_suffix(format!("row:{}", row.id));
            let mut cells = Vec::with_capacity(row.cells.len());
            for (key, value) in &row.cells {
                let initial = value.to_string();
                let input: Entity<InputState> = window.use_keyed_state(
                    row_id.with_suffix(format!("state:input:{key}")),
                    cx,
                    move |window, cx| InputState::new(window, cx).with_value(initial),
                );
                let grid = grid.clone();
                let on_change = self.on_change.clone();
                let key = key.clone();
                let stable_id = row.id;

                cells.push(
                    div().flex_1().child(
                        TextInput::new(
                            row_id.with_suffix(format!("cell:{key}")),
                            self.settings,
                            input,
                        )
                        .disabled(disabled)
                        .on_change(move |text, window, cx| {
                            let updated = grid.update(cx, |grid, _cx| {
                                grid.index_of(stable_id)
                                    .is_some_and(|ix| grid.update_cell(ix, &key, text.clone()))
                            });
                            if updated {
                                notify_grid(&grid, on_change.as_ref(), window, cx);
                            }
                        }),
                    ),
                );
            }

            let remove = {
                let grid = grid.clone();
                let on_change = self.on_change.clone();
                let stable_id = row.id;
                Button::new(row_id.with_suffix("remove"), self.settings)
                    .variant(ButtonVariant::Ghost)
                    .size(ButtonSize::Icon)
                    .disabled(disabled)
                    .child(Icon::new(IconKind::Trash).size(px(14.)).color(icon_color))
                    .on_click(move |_, window, cx| {
                        let removed = grid.update(cx, |grid, cx| {
                            let removed = grid
                                .index_of(stable_id)
                                .and_then(|ix| grid.remove_row(ix))
                                .is_some();
                            cx.notify();
                            removed
                        });
                        if removed {
                            notify_grid(&grid, on_change.as_ref(), window, cx);
                        }
                    })
            };

            rows.push(
                div()
                    .flex()
                    .items_center()
                    .gap(px(8.))
                    .px(px(8.))
                    .py(px(6.))
                    .border_b_1()
                    .border_color(border_color)
                    .children(cells)
                    .child(remove),
            );
        }

        let add_row = Button::new(self.id.with_suffix("add_row"), self.settings)
            .variant(ButtonVariant::Outline)
            .size(ButtonSize::Sm)
            .disabled(disabled)
            .child(Icon::new(IconKind::Plus).size(px(14.)).color(icon_color))
            .label("Add Row")
            .on_click({
                let grid = grid.clone();
                let on_change = self.on_change.clone();
                move |_, window, cx| {
                    grid.update(cx, |grid, cx| {
                        grid.add_row();
                        cx.notify();
                    });
                    notify_grid(&grid, on_change.as_ref(), window, cx);
                }
            });

        Field::new(self.settings, self.props.clone())
            .child(
                div()
                    .w_full()
                    .flex()
                    .flex_col()
                    .border_1()
                    .border_color(border_color)
                    .rounded(px(6.))
                    .overflow_hidden()
                    .child(header)
                    .children(rows),
            )
            .child(div().child(add_row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> DataGrid {
        DataGrid::new(vec![("name", "Name").into(), ("email", "Email").into()])
    }

    #[test]
    fn added_rows_have_an_empty_cell_per_column() {
        let mut grid = grid();
        grid.add_row();
        let row = &grid.rows()[0];
        let keys: Vec<&str> = row.cells.keys().map(|key| key.as_ref()).collect();
        assert_eq!(keys, ["name", "email"]);
        assert!(row.cells.values().all(|value| value.is_empty()));
    }

    #[test]
    fn remove_and_update_by_index() {
        let mut grid = grid();
        let first = grid.add_row();
        let second = grid.add_row();
        assert!(grid.update_cell(1, "name", "Ada"));
        assert!(!grid.update_cell(1, "phone", "x"));
        assert!(!grid.update_cell(5, "name", "x"));

        let removed = grid.remove_row(0).expect("row 0 exists");
        assert_eq!(removed.id, first);
        assert_eq!(grid.rows()[0].id, second);
        assert_eq!(grid.rows()[0].cells["name"].as_ref(), "Ada");
        assert!(grid.remove_row(3).is_none());
    }

    #[test]
    fn ids_are_not_reused() {
        let mut grid = grid();
        let a = grid.add_row();
        grid.remove_row(0);
        let b = grid.add_row();
        assert_ne!(a, b);
    }

    #[test]
    fn pushed_rows_fill_known_columns_only() {
        let mut grid = grid();
        grid.push_row([("name", "John Doe"), ("age", "30")]);
        let cells = &grid.rows()[0].cells;
        assert_eq!(cells["name"].as_ref(), "John Doe");
        assert!(cells["email"].is_empty());
        assert_eq!(cells.len(), 2);
    }
}
