#[cfg(test)]
mod tests {
    use hydro_watersheds::{find_watersheds, read_grid, write_grid, FloodConfig, Grid};
    use ndarray::array;
    use tempfile::NamedTempFile;

    #[test]
    fn test_elevation_round_trip() {
        let dem = Grid::from_array(
            array![
                [3.0, 3.0, 3.0, 7.0],
                [3.0, 2.0, 4.0, -100.0],
                [5.0, 6.0, 8.0, 0.0],
            ],
            8.0,
            -100.0,
        )
        .unwrap();
        let tmp = NamedTempFile::new().unwrap();
        write_grid(&dem, tmp.path()).unwrap();

        let back: Grid<f64> = read_grid(tmp.path(), -1.0).unwrap();
        assert_eq!(back, dem);
        assert_eq!(back.cell_size(), 8.0);
        assert_eq!(back.no_data(), -100.0);
    }

    #[test]
    fn test_labels_round_trip() {
        let mut dem = Grid::from_array(
            array![[10.0_f32, 12.0, 10.0], [12.0, 9.0, 12.0], [10.0, 12.0, 10.0]],
            2.5,
            -3.0,
        )
        .unwrap();
        let sheds = find_watersheds(&mut dem, FloodConfig::correcting()).unwrap();
        let tmp = NamedTempFile::new().unwrap();
        write_grid(&sheds.labels, tmp.path()).unwrap();

        let back: Grid<i32> = read_grid(tmp.path(), 0).unwrap();
        assert_eq!(back, sheds.labels);
        assert_eq!(back.no_data(), -1);
    }

    #[test]
    fn test_widening_read() {
        let dem = Grid::from_array(array![[1.5_f32, 2.5], [3.5, -9999.0]], 1.0, -9999.0).unwrap();
        let tmp = NamedTempFile::new().unwrap();
        write_grid(&dem, tmp.path()).unwrap();

        let back: Grid<f64> = read_grid(tmp.path(), 0.0).unwrap();
        assert_eq!(back[(1, 0)], 2.5);
        assert_eq!(back.no_data(), -9999.0);
        assert!(back.is_no_data_at(1, 1));
    }
}
