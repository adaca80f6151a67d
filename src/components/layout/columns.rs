use gpui::{AnyElement, App, IntoElement, ParentElement, RenderOnce, Styled, Window, div, px};

/// A child of a column grid: one cell, or a group whose members each take a cell.
#[derive(Debug)]
pub enum ColumnChild<T> {
    Single(T),
    Group(Vec<ColumnChild<T>>),
}

impl<T> ColumnChild<T> {
    pub fn group(children: impl IntoIterator<Item = ColumnChild<T>>) -> Self {
        ColumnChild::Group(children.into_iter().collect())
    }
}

/// Flattens nested groups into cells, depth first, keeping order.
pub fn flatten_children<T>(children: Vec<ColumnChild<T>>) -> Vec<T> {
    let mut cells = Vec::new();
    let mut stack: Vec<std::vec::IntoIter<ColumnChild<T>>> = vec![children.into_iter()];
    while let Some(top) = stack.last_mut() {
        match top.next() {
            Some(ColumnChild::Single(cell)) => cells.push(cell),
            Some(ColumnChild::Group(group)) => stack.push(group.into_iter()),
            None => {
                stack.pop();
            }
        }
    }
    cells
}

/// Lays `cells` out left to right in rows of `columns`, padding the last row with `None`.
pub fn into_rows<T>(cells: Vec<T>, columns: usize) -> Vec<Vec<Option<T>>> {
    let columns = columns.max(1);
    let mut rows: Vec<Vec<Option<T>>> = Vec::new();
    for cell in cells {
        match rows.last_mut() {
            Some(row) if row.len() < columns => row.push(Some(cell)),
            _ => rows.push(vec![Some(cell)]),
        }
    }
    if let Some(last) = rows.last_mut() {
        last.resize_with(columns, || None);
    }
    rows
}

/// An N-column grid of fields (2 unless set).
#[derive(IntoElement)]
pub struct ColumnsField {
    columns: usize,
    children: Vec<ColumnChild<AnyElement>>,
}

impl Default for ColumnsField {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnsField {
    pub const DEFAULT_COLUMNS: usize = 2;

    pub fn new() -> Self {
        Self {
            columns: Self::DEFAULT_COLUMNS,
            children: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Adds several fields at once; each still takes its own cell.
    pub fn group<E: IntoElement>(mut self, elements: impl IntoIterator<Item = E>) -> Self {
        self.children.push(ColumnChild::group(
            elements
                .into_iter()
                .map(|element| ColumnChild::Single(element.into_any_element())),
        ));
        self
    }

    pub fn nested(mut self, child: ColumnChild<AnyElement>) -> Self {
        self.children.push(child);
        self
    }
}

impl ParentElement for ColumnsField {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children
            .extend(elements.into_iter().map(ColumnChild::Single));
    }
}

impl RenderOnce for ColumnsField {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let rows = into_rows(flatten_children(self.children), self.columns);

        div()
            .w_full()
            .flex()
            .flex_col()
            .gap(px(16.))
            .children(rows.into_iter().map(|row| {
                div().w_full().flex().gap(px(16.)).children(
                    row.into_iter()
                        .map(|cell| div().flex_1().min_w_0().children(cell)),
                )
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_group_of_two_takes_two_cells() {
        let children = vec![ColumnChild::group([
            ColumnChild::Single("first"),
            ColumnChild::Single("last"),
        ])];
        assert_eq!(flatten_children(children), ["first", "last"]);
    }

    #[test]
    fn nested_groups_flatten_in_order() {
        let children = vec![
            ColumnChild::Single(1),
            ColumnChild::group([
                ColumnChild::Single(2),
                ColumnChild::group([ColumnChild::Single(3), ColumnChild::Single(4)]),
                ColumnChild::Group(Vec::new()),
            ]),
            ColumnChild::Single(5),
        ];
        assert_eq!(flatten_children(children), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn rows_fill_left_to_right_and_pad_the_last() {
        let rows = into_rows(vec!['a', 'b', 'c'], 2);
        assert_eq!(rows, [vec![Some('a'), Some('b')], vec![Some('c'), None]]);
        assert!(into_rows(Vec::<char>::new(), 3).is_empty());
        assert_eq!(into_rows(vec![1], 0), [vec![Some(1)]]);
    }
}
