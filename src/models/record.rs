//! Source dataset records.

/// One row of the source dataset.
///
/// Records are immutable once loaded; the pipeline never mutates them,
/// only pairs each with an extracted report on output.
#[derive(Debug, Clone)]
pub struct InputRecord {
    /// Zero-based position in the source dataset, used in diagnostics.
    pub index: usize,
    /// Raw cell values, in header order.
    pub fields: Vec<String>,
    /// Raw reference cell (decorated document URL), if the cell was
    /// non-empty.
    pub reference: Option<String>,
}

impl InputRecord {
    /// Create a record from its dataset position and parsed cells.
    pub fn new(index: usize, fields: Vec<String>, reference: Option<String>) -> Self {
        Self {
            index,
            fields,
            reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_fields_in_order() {
        let record = InputRecord::new(
            3,
            vec!["a".to_string(), "b".to_string()],
            Some("raw".to_string()),
        );
        assert_eq!(record.index, 3);
        assert_eq!(record.fields, vec!["a", "b"]);
        assert_eq!(record.reference.as_deref(), Some("raw"));
    }
}
