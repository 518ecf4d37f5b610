use stitch_common::db::core::{Board, Layer, Placement};
use stitch_common::error::ConfigError;
use stitch_common::geom::coord::GridCoord;
use stitch_common::geom::point::Point;
use stitch_common::geom::polygon::{Outline, Shape};
use stitch_common::geom::rect::Rect;
use stitch_common::geom::segment::Segment;
use stitch_common::util::check::run_fill_check;
use stitch_common::util::params::FillParams;
use stitch_fill::error::FillError;
use stitch_fill::grid::ZoneState;

/// 10 x 10 GND zone at the origin, board bounds equal to the zone.
fn zone_board() -> Board {
    let mut board = Board::new();
    let gnd = board.add_net("GND");
    board.add_net("VCC");
    board.add_area(
        Some(gnd),
        false,
        Outline::rectangle(&Rect::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0))),
    );
    board.update_bounds();
    board
}

/// step 1, inter 0.2 (via 0.2, no clearance).
fn params(board: &Board) -> FillParams {
    FillParams::builder()
        .net_name("GND")
        .step(1.0)
        .via_size(0.2)
        .drill(0.1)
        .clearance(0.0)
        .build(board)
        .unwrap()
}

fn coords(vias: &[Placement]) -> Vec<GridCoord> {
    vias.iter().map(|v| v.coord).collect()
}

#[test]
fn rectangular_zone_fills_interior() {
    let board = zone_board();
    let params = params(&board);
    let vias = stitch_fill::run(&board, &params).unwrap();

    assert_eq!(vias.len(), 81);
    assert!(vias.iter().all(|v| (1..=9).contains(&v.coord.x) && (1..=9).contains(&v.coord.y)));
    assert_eq!(vias[0].label, "V1_1");
    assert_eq!(vias[0].position, Point::new(1.0, 1.0));
    assert!(run_fill_check(&board, &params, &vias).is_ok());
}

#[test]
fn keepout_circle_removes_touching_cells() {
    let baseline = {
        let board = zone_board();
        stitch_fill::run(&board, &params(&board)).unwrap()
    };

    let mut board = zone_board();
    let keepout = Outline::circle(Point::new(5.0, 5.0), 2.0, 64);
    board.add_area(None, true, keepout.clone());
    let params = params(&board);
    let vias = stitch_fill::run(&board, &params).unwrap();

    let touches = |c: Point<f64>| {
        Rect::from_center(c, 0.1, 0.1)
            .corners()
            .iter()
            .any(|&p| keepout.contains(p))
    };
    let expected: Vec<GridCoord> = baseline
        .iter()
        .filter(|v| !touches(v.position))
        .map(|v| v.coord)
        .collect();

    assert!(vias.len() < baseline.len());
    assert_eq!(coords(&vias), expected);
    assert!(!coords(&vias).contains(&GridCoord::new(5, 5)));
    assert!(coords(&vias).contains(&GridCoord::new(1, 1)));
    assert!(run_fill_check(&board, &params, &vias).is_ok());
}

#[test]
fn self_intersecting_keepout_is_honoured() {
    let mut board = zone_board();
    board.add_area(
        None,
        true,
        Outline::from_contour(vec![
            Point::new(3.0, 3.0),
            Point::new(7.0, 7.0),
            Point::new(7.0, 3.0),
            Point::new(3.0, 7.0),
        ]),
    );
    let params = params(&board);
    let vias = stitch_fill::run(&board, &params).unwrap();

    assert!(vias.len() < 81);
    assert!(!coords(&vias).contains(&GridCoord::new(6, 5)));
    assert!(!coords(&vias).contains(&GridCoord::new(4, 5)));
    assert!(coords(&vias).contains(&GridCoord::new(5, 3)));
    assert!(run_fill_check(&board, &params, &vias).is_ok());
}

#[test]
fn centered_pad_leaves_a_ring() {
    let mut board = zone_board();
    board.add_pad(Point::new(5.0, 5.0), Point::new(1.0, 1.0), 0.5, board.find_net("VCC"));
    let params = params(&board);
    let vias = stitch_fill::run(&board, &params).unwrap();

    // P +- (0.5 + 0.5 + 0.2) -> cells 3..=7 blocked.
    assert_eq!(vias.len(), 81 - 25);
    assert!(vias
        .iter()
        .all(|v| !((3..=7).contains(&v.coord.x) && (3..=7).contains(&v.coord.y))));
    assert!(coords(&vias).contains(&GridCoord::new(2, 5)));
    assert!(coords(&vias).contains(&GridCoord::new(8, 5)));
    assert!(run_fill_check(&board, &params, &vias).is_ok());
}

#[test]
fn track_and_text_obstruct() {
    let mut board = zone_board();
    board.add_track(
        Segment::new(Point::new(2.0, 5.0), Point::new(8.0, 5.0)),
        0.0,
        board.find_net("VCC"),
    );
    board.add_text(
        "REV A",
        Rect::new(Point::new(2.0, 2.0), Point::new(3.0, 3.0)),
        Layer::FrontCopper,
    );
    board.add_text(
        "logo",
        Rect::new(Point::new(6.0, 6.0), Point::new(9.0, 9.0)),
        Layer::Other("F.SilkS".to_string()),
    );
    let params = params(&board);
    let vias = stitch_fill::run(&board, &params).unwrap();

    // Track removes (2..=8, 5); copper text removes (1..=4, 1..=4).
    assert_eq!(vias.len(), 81 - 7 - 16);
    assert!(coords(&vias).contains(&GridCoord::new(1, 5)));
    assert!(!coords(&vias).contains(&GridCoord::new(8, 5)));
    assert!(coords(&vias).contains(&GridCoord::new(7, 7)));
    assert!(run_fill_check(&board, &params, &vias).is_ok());
}

#[test]
fn no_target_zone_means_no_vias() {
    let mut board = Board::new();
    board.add_net("GND");
    let vcc = board.add_net("VCC");
    board.add_area(
        Some(vcc),
        false,
        Outline::rectangle(&Rect::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0))),
    );
    board.update_bounds();
    let vias = stitch_fill::run(&board, &params(&board)).unwrap();
    assert!(vias.is_empty());
}

#[test]
fn keepout_dominates_overlapping_zone() {
    let mut board = zone_board();
    let gnd = board.find_net("GND");
    let inner = Outline::rectangle(&Rect::new(Point::new(3.5, 3.5), Point::new(6.5, 6.5)));
    // A second GND zone and a keepout on exactly the same region.
    board.add_area(None, true, inner.clone());
    board.add_area(gnd, false, inner);
    let params = params(&board);

    let (grid, _) = stitch_fill::rasterize(&board, &params).unwrap();
    let cell = grid.get(GridCoord::new(5, 5)).unwrap();
    assert_eq!(cell.zone, ZoneState::Denied);

    let vias = stitch_fill::run(&board, &params).unwrap();
    assert!(vias
        .iter()
        .all(|v| !((4..=6).contains(&v.coord.x) && (4..=6).contains(&v.coord.y))));
}

#[test]
fn repeated_runs_are_identical() {
    let mut board = zone_board();
    board.add_area(None, true, Outline::circle(Point::new(3.0, 7.0), 1.3, 32));
    board.add_pad(Point::new(7.0, 3.0), Point::new(1.2, 0.6), 0.2, None);
    board.add_track(
        Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 6.0)),
        0.1,
        None,
    );
    let params = params(&board);
    let first = stitch_fill::run(&board, &params).unwrap();
    let second = stitch_fill::run(&board, &params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn adding_obstructions_never_adds_vias() {
    let mut board = zone_board();
    let params = params(&board);
    let mut previous = coords(&stitch_fill::run(&board, &params).unwrap());

    board.add_pad(Point::new(2.0, 8.0), Point::new(0.5, 0.5), 0.1, None);
    let after_pad = coords(&stitch_fill::run(&board, &params).unwrap());
    assert!(after_pad.iter().all(|c| previous.contains(c)));
    assert!(after_pad.len() < previous.len());
    previous = after_pad;

    board.add_track(
        Segment::new(Point::new(9.0, 1.0), Point::new(6.0, 4.0)),
        0.0,
        None,
    );
    let after_track = coords(&stitch_fill::run(&board, &params).unwrap());
    assert!(after_track.iter().all(|c| previous.contains(c)));
    previous = after_track;

    board.add_text(
        "X",
        Rect::new(Point::new(8.0, 8.0), Point::new(8.5, 8.5)),
        Layer::BackCopper,
    );
    let after_text = coords(&stitch_fill::run(&board, &params).unwrap());
    assert!(after_text.iter().all(|c| previous.contains(c)));
    assert!(after_text.len() < previous.len());
}

#[test]
fn features_at_the_board_edge_stay_in_range() {
    let mut board = zone_board();
    for (x, y) in [(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)] {
        board.add_pad(Point::new(x, y), Point::new(3.0, 3.0), 1.0, None);
    }
    board.add_text(
        "edge",
        Rect::new(Point::new(-1.0, 9.5), Point::new(11.0, 10.0)),
        Layer::FrontCopper,
    );
    let params = FillParams::builder()
        .net_name("GND")
        .step(0.5)
        .via_size(0.6)
        .drill(0.3)
        .clearance(0.3)
        .build(&board)
        .unwrap();
    let vias = stitch_fill::run(&board, &params).unwrap();
    assert!(!vias.is_empty());
    assert!(run_fill_check(&board, &params, &vias).is_ok());
}

#[test]
fn configuration_errors_fail_before_grid_work() {
    let board = zone_board();
    let err = stitch_fill::run_with(&board, FillParams::builder().net_name("GND").step(-1.0))
        .unwrap_err();
    assert!(matches!(err, FillError::Config(ConfigError::InvalidStep(_))));

    let err = stitch_fill::run_with(&board, FillParams::builder().net_name("/PWR")).unwrap_err();
    assert_eq!(err, FillError::Config(ConfigError::UnknownNet("/PWR".to_string())));

    // Falls back to "GND" with default distances.
    assert!(stitch_fill::run_with(&board, FillParams::builder()).is_ok());
}

#[test]
fn degenerate_boards_are_fatal() {
    let mut board = Board::new();
    board.add_net("GND");
    let params = params(&board);
    assert!(matches!(
        stitch_fill::run(&board, &params),
        Err(FillError::EmptyBoard { .. })
    ));

    let board = zone_board();
    let params = FillParams::builder()
        .net_name("GND")
        .step(0.001)
        .max_grid_cells(1_000)
        .build(&board)
        .unwrap();
    assert!(matches!(
        stitch_fill::run(&board, &params),
        Err(FillError::GridTooLarge { .. })
    ));
}
