use kakera_core::{best_grid, spawn_grid_search, CoreError, Dimensions};

#[test]
fn square_image_collapses_to_single_cell() {
    let spec = best_grid(1000, 1000).unwrap();
    assert_eq!(
        spec.dimensions,
        Dimensions {
            width: 1,
            height: 1
        }
    );
    // The downward scan finds 950x950 first: same 1:1 grid, smaller lcd.
    assert_eq!(spec.piece_size_px, 950);
}

#[test]
fn known_best_pair_is_found() {
    // In the +-5% window around 300x200 the minimal lcd is 570 at 285x190.
    let spec = best_grid(300, 200).unwrap();
    assert_eq!(spec.piece_size_px, 95);
    assert_eq!(
        spec.dimensions,
        Dimensions {
            width: 3,
            height: 2
        }
    );
}

#[test]
fn result_stays_within_tolerance() {
    for (width, height) in [(1024, 768), (801, 601), (333, 222), (1920, 1080)] {
        let spec = best_grid(width, height).unwrap();
        let spanned_w = (spec.dimensions.width * spec.piece_size_px) as f64;
        let spanned_h = (spec.dimensions.height * spec.piece_size_px) as f64;
        assert!(spanned_w >= width as f64 * 0.95 - 1.0);
        assert!(spanned_w <= width as f64 * 1.05 + 1.0);
        assert!(spanned_h >= height as f64 * 0.95 - 1.0);
        assert!(spanned_h <= height as f64 * 1.05 + 1.0);
        assert!(spec.dimensions.width >= 1);
        assert!(spec.dimensions.height >= 1);
    }
}

#[test]
fn degenerate_input_is_rejected() {
    assert!(matches!(
        best_grid(0, 600),
        Err(CoreError::InvalidImageDimensions {
            width: 0,
            height: 600
        })
    ));
    assert!(matches!(
        best_grid(800, 0),
        Err(CoreError::InvalidImageDimensions { .. })
    ));
}

#[tokio::test]
async fn background_search_matches_sync_result() {
    let task = spawn_grid_search(300, 200);
    let spec = task.finish().await.unwrap();
    assert_eq!(spec, best_grid(300, 200).unwrap());
}

#[tokio::test]
async fn background_search_reports_degenerate_input() {
    let task = spawn_grid_search(0, 0);
    assert!(matches!(
        task.finish().await,
        Err(CoreError::InvalidImageDimensions { .. })
    ));
}
