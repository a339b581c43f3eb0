//! Synthetic room frames through the default pipeline.

mod common;

use kaksha::flatmap::CellCoord;
use kaksha::sim::{Aabb, RoomConfig};
use kaksha::{Color, DepthMapper, KakshaConfig, Point2D, SimulationConfig, SyntheticRoom};

/// Largest distance from an indexed point to the surface it came from.
const SURFACE_TOLERANCE_M: f32 = 0.01;

fn surfaces(room: &RoomConfig) -> Vec<Aabb> {
    std::iter::once(room.bounds)
        .chain(room.obstacles.iter().copied())
        .collect()
}

#[test]
fn test_points_lie_on_room_surfaces() {
    let config = KakshaConfig::default();
    let mut mapper = DepthMapper::from_config(&config).unwrap();
    let mut room = common::synthetic_room(&config);

    let outcome = mapper.process_frame(&room.next_frame());
    assert!(outcome.is_processed());

    let boxes = surfaces(&room.config().room);
    let cloud = mapper.index().cloud_tree().unwrap();
    assert!(cloud.len() > 1000);
    for p in cloud.iter() {
        let on_surface = boxes
            .iter()
            .filter_map(|b| common::distance_to_faces(b, *p, SURFACE_TOLERANCE_M))
            .any(|d| d <= SURFACE_TOLERANCE_M);
        assert!(on_surface, "point {p:?} is not on any surface");
    }
}

#[test]
fn test_floor_and_table_classified() {
    let config = KakshaConfig::default();
    let mut mapper = DepthMapper::from_config(&config).unwrap();
    let mut room = common::synthetic_room(&config);

    let stats = mapper.process_frame(&room.next_frame()).stats().unwrap().clone();
    // Floor at z = -1.0 falls in the low band, the table top in the mid band
    assert!(stats.band_points[0] > 0);
    assert!(stats.band_points[1] > 0);
    // Nothing within 2.5m reaches above z = 0.5
    assert_eq!(stats.band_points[2], 0);
    assert!(stats.out_of_range > 0);

    let map = mapper.flat_map();
    let map = map.read();
    let (columns, rows) = map.dimensions();
    let painted = |color: Color| -> Vec<Point2D> {
        (0..rows)
            .flat_map(|r| (0..columns).map(move |c| CellCoord::new(c as i32, r as i32)))
            .filter(|&cell| map.get(cell) == Some(color))
            .map(|cell| map.cell_to_world(cell))
            .collect()
    };

    // Mid-band cells only come from the table
    let red = painted(Color::RED);
    assert!(!red.is_empty());
    for p in &red {
        assert!(p.x.abs() <= 0.61 && p.y >= -1.61 && p.y <= -0.99, "{p:?}");
    }

    // Floor visible beside the table
    let blue = painted(Color::BLUE);
    assert!(blue.iter().any(|p| p.x.abs() > 0.7));
}

#[test]
fn test_noisy_frames_still_map() {
    let config = KakshaConfig::default();
    let mut mapper = DepthMapper::from_config(&config).unwrap();
    let mut room = SyntheticRoom::new(
        SimulationConfig::default().with_noise(3),
        config.sensor.to_intrinsics(),
        config.camera.to_pose(),
    );

    let mut processed = 0;
    for _ in 0..9 {
        if mapper.process_frame(&room.next_frame()).is_processed() {
            processed += 1;
        }
    }
    assert_eq!(processed, 3);
    assert!(mapper.flat_map().read().painted_count() > 100);
    assert_eq!(mapper.totals().frames, 3);
}
