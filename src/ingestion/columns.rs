//! Column-role resolution.
//!
//! Every ingested source assigns four reserved roles: one time column and
//! three coordinate columns. The remaining columns carry field data.
//! [`ColumnSelection`] names the reserved columns either by header name or by
//! position, and [`ColumnSelection::resolve`] validates the assignment into a
//! [`ColumnLayout`].

use crate::error::{IngestError, IngestResult};

/// Which columns play the time and coordinate roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelection {
    /// Look the reserved columns up in the header.
    ByName {
        time: String,
        coordinates: [String; 3],
    },
    /// Address the reserved columns by position.
    ByIndex {
        time: usize,
        coordinates: [usize; 3],
    },
}

impl Default for ColumnSelection {
    /// Time in the first column, coordinates in the following three.
    fn default() -> Self {
        Self::ByIndex {
            time: 0,
            coordinates: [1, 2, 3],
        }
    }
}

impl ColumnSelection {
    /// Select reserved columns by header name.
    pub fn by_name<S: Into<String>>(time: impl Into<String>, coordinates: [S; 3]) -> Self {
        Self::ByName {
            time: time.into(),
            coordinates: coordinates.map(Into::into),
        }
    }

    /// Select reserved columns by position.
    pub fn by_index(time: usize, coordinates: [usize; 3]) -> Self {
        Self::ByIndex { time, coordinates }
    }

    /// Resolve this selection against a source's header and column count.
    ///
    /// By-name selection requires a header and fails naming the first
    /// requested column missing from it; it then falls through to the same
    /// index validation as by-position selection: every reserved index must
    /// be in range and no index may be assigned two roles.
    pub fn resolve(
        &self,
        header: &[String],
        num_columns: usize,
        path: &str,
    ) -> IngestResult<ColumnLayout> {
        match self {
            Self::ByIndex { time, coordinates } => layout(num_columns, path, *time, *coordinates),
            Self::ByName { time, coordinates } => {
                if header.is_empty() {
                    return Err(IngestError::NoHeader {
                        path: path.to_string(),
                    });
                }
                let time_index = find_column(header, time, path)?;
                let mut coordinate_indices = [0usize; 3];
                for (slot, name) in coordinate_indices.iter_mut().zip(coordinates) {
                    *slot = find_column(header, name, path)?;
                }
                layout(num_columns, path, time_index, coordinate_indices)
            }
        }
    }
}

fn find_column(header: &[String], name: &str, path: &str) -> IngestResult<usize> {
    header
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| IngestError::MissingColumn {
            path: path.to_string(),
            column: name.to_string(),
        })
}

/// A validated assignment of every source column to a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Index of the time column.
    pub time: usize,
    /// Indices of the three coordinate columns.
    pub coordinates: [usize; 3],
    /// Indices of the surviving data columns, ascending.
    pub data: Vec<usize>,
}

fn layout(
    num_columns: usize,
    path: &str,
    time: usize,
    coordinates: [usize; 3],
) -> IngestResult<ColumnLayout> {
    let reserved = [time, coordinates[0], coordinates[1], coordinates[2]];
    for (i, index) in reserved.iter().enumerate() {
        if *index >= num_columns {
            return Err(IngestError::ColumnOutOfRange {
                path: path.to_string(),
                index: *index,
                columns: num_columns,
            });
        }
        if reserved[..i].contains(index) {
            return Err(IngestError::OverlappingColumns {
                path: path.to_string(),
                index: *index,
            });
        }
    }

    // Ascending set difference, so survivors keep their original relative
    // order no matter where the reserved columns sit.
    let data = (0..num_columns).filter(|i| !reserved.contains(i)).collect();

    Ok(ColumnLayout {
        time,
        coordinates,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::{ColumnLayout, ColumnSelection};
    use crate::error::IngestError;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn default_selection_reserves_the_first_four_columns() {
        let layout = ColumnSelection::default()
            .resolve(&[], 6, "mem.csv")
            .unwrap();
        assert_eq!(
            layout,
            ColumnLayout {
                time: 0,
                coordinates: [1, 2, 3],
                data: vec![4, 5],
            }
        );
    }

    #[test]
    fn by_name_resolves_to_the_same_layout_as_by_index() {
        let header = header(&["temp", "t", "x", "y", "z", "wind"]);

        let named = ColumnSelection::by_name("t", ["x", "y", "z"])
            .resolve(&header, header.len(), "mem.csv")
            .unwrap();
        let indexed = ColumnSelection::by_index(1, [2, 3, 4])
            .resolve(&header, header.len(), "mem.csv")
            .unwrap();

        assert_eq!(named, indexed);
        assert_eq!(named.data, vec![0, 5]);
    }

    #[test]
    fn by_name_fails_on_the_first_missing_column() {
        let header = header(&["t", "x", "z", "temp"]);
        let err = ColumnSelection::by_name("t", ["x", "y", "z"])
            .resolve(&header, header.len(), "mem.csv")
            .unwrap_err();

        match err {
            IngestError::MissingColumn { path, column } => {
                assert_eq!(path, "mem.csv");
                assert_eq!(column, "y");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn by_name_requires_a_header() {
        let err = ColumnSelection::by_name("t", ["x", "y", "z"])
            .resolve(&[], 5, "mem.csv")
            .unwrap_err();
        assert!(matches!(err, IngestError::NoHeader { .. }));
        assert!(err.to_string().contains("has no header"));
    }

    #[test]
    fn out_of_range_reserved_index_is_rejected() {
        let err = ColumnSelection::by_index(0, [1, 2, 7])
            .resolve(&[], 5, "mem.csv")
            .unwrap_err();

        match err {
            IngestError::ColumnOutOfRange {
                index, columns, ..
            } => {
                assert_eq!(index, 7);
                assert_eq!(columns, 5);
            }
            other => panic!("expected ColumnOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn overlapping_reserved_indices_are_rejected() {
        let err = ColumnSelection::by_index(2, [1, 2, 3])
            .resolve(&[], 5, "mem.csv")
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::OverlappingColumns { index: 2, .. }
        ));
    }

    #[test]
    fn survivors_stay_ascending_wherever_the_reserved_columns_sit() {
        let layout = ColumnSelection::by_index(5, [0, 6, 2])
            .resolve(&[], 8, "mem.csv")
            .unwrap();
        assert_eq!(layout.data, vec![1, 3, 4, 7]);
    }

    #[test]
    fn an_empty_source_has_no_room_for_reserved_columns() {
        let err = ColumnSelection::default()
            .resolve(&[], 0, "mem.csv")
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::ColumnOutOfRange { index: 0, .. }
        ));
    }
}
