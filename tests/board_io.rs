//! Board file roundtrip tests.
//!
//! These tests run a fanout on a board loaded from disk, write it back and
//! check that everything survives a second read.

use bga_fanout::board::{Board, BoardError, Footprint, Layer, Point, ViaType};
use bga_fanout::fanout::{BgaFanout, FanoutPlan};
use tempfile::tempdir;

const BOARD_JSON: &str = r#"{
    "footprints": [
        {
            "reference": "U1",
            "position": { "x": 10000000, "y": 8000000 },
            "orientation": 90.0,
            "pads": [
                { "name": "A1", "net_code": 1, "offset": { "x": -400000, "y": -400000 } },
                { "name": "A2", "net_code": 2, "offset": { "x": 400000, "y": -400000 } },
                { "name": "B1", "net_code": 3, "offset": { "x": -400000, "y": 400000 } },
                { "name": "B2", "net_code": 4, "offset": { "x": 400000, "y": 400000 } },
                { "name": "MH", "offset": { "x": 0, "y": 0 } }
            ]
        }
    ]
}"#;

#[test]
fn test_fanout_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.json");
    std::fs::write(&path, BOARD_JSON).unwrap();

    let mut board = Board::read(&path).unwrap();
    let mut fanout = BgaFanout::new(&mut board, "U1", FanoutPlan::default()).unwrap();
    let report = fanout.fanout(&mut board).unwrap();
    assert_eq!(report.tracks, 4);
    assert_eq!(report.vias, 4);

    let output = dir.path().join("out.json");
    board.write(&output).unwrap();

    let reread = Board::read(&output).unwrap();
    assert_eq!(reread.footprints, board.footprints);
    assert_eq!(reread.tracks, board.tracks);
    assert_eq!(reread.vias, board.vias);

    let fp = reread.footprint("U1").unwrap();
    assert!((fp.orientation - 90.0).abs() < f64::EPSILON);
    assert!(reread.tracks.iter().all(|t| t.layer == Layer::FrontCopper));
    assert!(reread.vias.iter().all(|v| v.via_type == ViaType::Through));
}

#[test]
fn test_reloaded_board_keeps_fresh_ids() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.json");
    std::fs::write(&path, BOARD_JSON).unwrap();

    let mut board = Board::read(&path).unwrap();
    BgaFanout::new(&mut board, "U1", FanoutPlan::default())
        .unwrap()
        .fanout(&mut board)
        .unwrap();
    board.write(&path).unwrap();

    let mut board = Board::read(&path).unwrap();
    let mut second = BgaFanout::new(&mut board, "U1", FanoutPlan::default()).unwrap();
    second.fanout(&mut board).unwrap();
    assert_eq!(board.tracks.len(), 8);

    // Undo on the second session leaves the first session's routing alone.
    assert_eq!(second.remove_track_via(&mut board), 8);
    assert_eq!(board.tracks.len(), 4);
    assert_eq!(board.vias.len(), 4);
}

#[test]
fn test_empty_board_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.json");

    let mut board = Board::new();
    board.add_footprint(Footprint::new("J1", Point::new(0, 0), 0.0));
    board.write(&path).unwrap();

    let reread = Board::read(&path).unwrap();
    assert_eq!(reread.footprints.len(), 1);
    assert!(reread.tracks.is_empty());
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let result = Board::read(dir.path().join("absent.json"));
    assert!(matches!(result, Err(BoardError::FileRead { .. })));
}

#[test]
fn test_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{ "footprints": [ { "reference": 3 } ] }"#).unwrap();

    let result = Board::read(&path);
    assert!(matches!(result, Err(BoardError::Parse { .. })));
}
