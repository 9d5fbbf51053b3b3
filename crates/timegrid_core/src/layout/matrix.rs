//! Row reshaping.

use super::LayoutError;

/// Chunks `cells` into rows of `columns`; the last row may be shorter.
///
/// # Errors
/// - `InvalidColumns` when `columns` is zero.
pub fn to_matrix<C>(cells: &[C], columns: usize) -> Result<Vec<&[C]>, LayoutError> {
    if columns == 0 {
        return Err(LayoutError::InvalidColumns(columns));
    }
    Ok(cells.chunks(columns).collect())
}

#[cfg(test)]
mod tests {
    use super::to_matrix;
    use crate::layout::LayoutError;

    #[test]
    fn chunks_into_fixed_width_rows() {
        let cells: Vec<u32> = (1..=10).collect();
        let rows = to_matrix(&cells, 4).expect("4 columns");
        assert_eq!(
            rows,
            vec![&[1u32, 2, 3, 4][..], &[5u32, 6, 7, 8][..], &[9u32, 10][..]]
        );
    }

    #[test]
    fn empty_input_has_no_rows() {
        let cells: Vec<u32> = Vec::new();
        assert!(to_matrix(&cells, 7).expect("7 columns").is_empty());
    }

    #[test]
    fn rejects_zero_columns() {
        let err = to_matrix(&[1, 2, 3], 0).expect_err("zero columns must fail");
        assert_eq!(err, LayoutError::InvalidColumns(0));
    }
}
