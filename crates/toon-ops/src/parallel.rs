//! Row-parallel output filling.
//!
//! Every operator in this crate computes one output row from read-only
//! input, so rows are independent. With the `parallel` feature they are
//! handed to Rayon; without it they run in order. Both paths produce the
//! same bytes.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `row_len`-sample row of `out`.
pub(crate) fn for_each_row<F>(out: &mut [u8], row_len: usize, f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    if row_len == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_get_their_index() {
        let mut out = vec![0u8; 4 * 5];
        for_each_row(&mut out, 4, |y, row| row.fill(y as u8));
        for (y, row) in out.chunks(4).enumerate() {
            assert!(row.iter().all(|&v| v == y as u8));
        }
    }

    #[test]
    fn test_matches_sequential_rows() {
        let (row_len, rows) = (37, 53);
        let fill = |y: usize, row: &mut [u8]| {
            for (x, v) in row.iter_mut().enumerate() {
                *v = ((x * 31) ^ (y * 17)).wrapping_add(x * y) as u8;
            }
        };

        let mut sequential = vec![0u8; row_len * rows];
        for (y, row) in sequential.chunks_mut(row_len).enumerate() {
            fill(y, row);
        }

        let mut out = vec![0u8; row_len * rows];
        for_each_row(&mut out, row_len, fill);
        assert_eq!(out, sequential);
    }

    #[test]
    fn test_zero_width_is_noop() {
        let mut out: Vec<u8> = Vec::new();
        for_each_row(&mut out, 0, |_, _| panic!("no rows expected"));
    }
}
