use bookshelf_db::RawRow;

use super::error::ListBooksError;
use super::models::{Author, Book};

/// Convert rows into books, keeping their order.
pub fn map_rows(rows: Vec<RawRow>) -> Result<Vec<Book>, ListBooksError> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| map_row(index, row))
        .collect()
}

fn map_row(index: usize, row: &RawRow) -> Result<Book, ListBooksError> {
    let malformed = |column| ListBooksError::MalformedRow { row: index, column };

    let id = row.get_i64("id").ok_or_else(|| malformed("id"))?;
    let title = row.get_str("title").ok_or_else(|| malformed("title"))?;
    let author_name = row
        .get_str("author_name")
        .ok_or_else(|| malformed("author_name"))?;

    Ok(Book {
        id,
        title: title.to_owned(),
        author: Author {
            name: author_name.to_owned(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_db::SqlValue;

    fn row(id: i64, title: &str, author: &str) -> RawRow {
        RawRow::new()
            .with("id", SqlValue::Int(id))
            .with("title", SqlValue::String(title.into()))
            .with("author_name", SqlValue::String(author.into()))
    }

    #[test]
    fn empty_input_maps_to_empty_output() {
        assert!(map_rows(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn row_order_is_preserved() {
        let books = map_rows(vec![
            row(2, "Banana", "Zed"),
            row(1, "Apple", "Amy"),
        ])
        .unwrap();

        assert_eq!(
            books,
            vec![
                Book {
                    id: 2,
                    title: "Banana".into(),
                    author: Author { name: "Zed".into() },
                },
                Book {
                    id: 1,
                    title: "Apple".into(),
                    author: Author { name: "Amy".into() },
                },
            ]
        );
    }

    #[test]
    fn missing_column_is_a_mapping_fault() {
        let broken = RawRow::new()
            .with("id", SqlValue::Int(3))
            .with("title", SqlValue::String("Orphan".into()));

        let err = map_rows(vec![row(1, "Fine", "Amy"), broken]).unwrap_err();
        assert!(matches!(
            err,
            ListBooksError::MalformedRow {
                row: 1,
                column: "author_name"
            }
        ));
    }

    #[test]
    fn null_or_mistyped_values_are_not_defaulted() {
        let null_title = row(1, "x", "y").with("title", SqlValue::Null);
        assert!(matches!(
            map_rows(vec![null_title]).unwrap_err(),
            ListBooksError::MalformedRow { column: "title", .. }
        ));

        let text_id = row(1, "x", "y").with("id", SqlValue::String("1".into()));
        assert!(matches!(
            map_rows(vec![text_id]).unwrap_err(),
            ListBooksError::MalformedRow { column: "id", .. }
        ));
    }
}
