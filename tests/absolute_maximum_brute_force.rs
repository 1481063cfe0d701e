mod common;

use approx::assert_relative_eq;
use ecliptic_apex::absolute_maximum::{find_absolute_maximum, top_candidates};
use ecliptic_apex::apex_search::search_apex;
use ecliptic_apex::constants::OBLIQUITY_J2000_DEG;
use ecliptic_apex::direction::pole_direction_at_angle;
use ecliptic_apex::elevation::{build_hemisphere_grid, generate_ellipsoid_grid};
use ecliptic_apex::hemisphere::Hemisphere;

use crate::common::{brute_force_max_height, random_band};

#[test]
fn test_closed_form_matches_sampled_rotation() {
    for (seed, hemisphere) in [(7, Hemisphere::North), (11, Hemisphere::South)] {
        let grid = build_hemisphere_grid(random_band(hemisphere, 7, 9, seed), hemisphere);
        let best = find_absolute_maximum(&grid, hemisphere).unwrap();
        let brute = brute_force_max_height(&grid, hemisphere, 100_000);
        assert_relative_eq!(best.height_km * 1000.0, brute, max_relative = 1e-6);
    }
}

#[test]
fn test_angle_points_the_search_at_the_maximum() {
    let hemisphere = Hemisphere::North;
    let grid = build_hemisphere_grid(random_band(hemisphere, 7, 9, 3), hemisphere);
    let best = find_absolute_maximum(&grid, hemisphere).unwrap();

    let e = pole_direction_at_angle(best.angle, hemisphere, OBLIQUITY_J2000_DEG.to_radians());
    let apex = search_apex(&grid, &e).unwrap();
    assert_eq!(apex.index, best.index);
    assert_relative_eq!(apex.height_km, best.height_km, max_relative = 1e-12);
}

#[test]
fn test_topography_beats_the_ellipsoid() {
    let hemisphere = Hemisphere::South;
    let grid = build_hemisphere_grid(random_band(hemisphere, 7, 9, 5), hemisphere);
    let best = find_absolute_maximum(&grid, hemisphere).unwrap();
    assert!(best.elevation > 0.0);
    assert!(best.advantage > 0.0);

    let ranked = top_candidates(&grid, hemisphere, 5);
    assert_eq!(ranked[0].index, best.index);
    assert!(ranked.windows(2).all(|w| w[0].height_km >= w[1].height_km));
}

#[test]
fn test_analytic_grid_has_the_ellipsoid_optimum() {
    for hemisphere in Hemisphere::ALL {
        let grid = generate_ellipsoid_grid(hemisphere, 0.05);
        let best = find_absolute_maximum(&grid, hemisphere).unwrap();
        assert!(best.advantage.abs() < 1e-6);
        assert!((best.latitude.abs() - 66.55).abs() < 1e-9);
    }
}
