#[cfg(test)]
mod tests {
    use hydro_watersheds::indices::INDEX_NO_DATA;
    use hydro_watersheds::{cti, spi, Grid, HydroError};
    use ndarray::array;

    #[test]
    fn test_spi_and_cti() {
        let acc = Grid::from_array(array![[0.0, 10.0], [99.0, -1.0]], 2.0, -1.0).unwrap();
        let slope = Grid::from_array(array![[0.0, 50.0], [100.0, 10.0]], 2.0, -9999.0).unwrap();

        let s = spi(&acc, &slope).unwrap();
        let c = cti(&acc, &slope).unwrap();

        let expected_spi = (2.0_f64 * 10.001 * 0.501).ln();
        let expected_cti = (2.0_f64 * 10.001 / 0.501).ln();
        assert!((s[(1, 0)] - expected_spi).abs() < 1e-12);
        assert!((c[(1, 0)] - expected_cti).abs() < 1e-12);
        assert!((s[(0, 0)] - (2.0_f64 * 0.001 * 0.001).ln()).abs() < 1e-12);

        // no-data accumulation
        assert_eq!(s[(1, 1)], INDEX_NO_DATA);
        assert_eq!(c[(1, 1)], INDEX_NO_DATA);
        assert_eq!(s.no_data(), INDEX_NO_DATA);
        assert_eq!(s.cell_size(), 2.0);
    }

    #[test]
    fn test_valid_index_can_equal_sentinel() {
        // slope chosen so that L (A + 0.001) (S/100 + 0.001) = 1/e
        let percent = 100.0 * ((-1.0_f64).exp() / 1.001 - 0.001);
        let acc = Grid::from_array(array![[1.0, -5.0]], 1.0, -5.0).unwrap();
        let slope = Grid::from_array(array![[percent, 3.0]], 1.0, -9999.0).unwrap();

        let s = spi(&acc, &slope).unwrap();
        assert!((s[(0, 0)] - INDEX_NO_DATA).abs() < 1e-9);
        assert_eq!(s[(1, 0)], INDEX_NO_DATA);
    }

    #[test]
    fn test_dimension_mismatch() {
        let acc: Grid<f64> = Grid::new(3, 3, 1.0, -1.0).unwrap();
        let slope: Grid<f64> = Grid::new(3, 2, 1.0, -1.0).unwrap();
        assert!(matches!(spi(&acc, &slope), Err(HydroError::DimensionMismatch { .. })));
        assert!(matches!(cti(&acc, &slope), Err(HydroError::DimensionMismatch { .. })));
    }
}
