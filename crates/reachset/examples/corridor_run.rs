//! Reachable sets on a straight road with a parked obstacle and a crossing one.
//!
//! Prints the node count, drivable-area cell count, and summed position area
//! of every step. The pipeline's `tracing` events need a subscriber, which
//! this example does not install.

use reachset::prelude::*;

fn main() -> Result<(), ReachError> {
    let config = Configuration::from_json(
        r#"{
            "planning": {"dt": 0.2, "steps_computation": 12, "v_lon_initial": 8.0},
            "reachable_set": {"size_grid": 0.2, "size_grid_2nd": 0.1, "radius_terminal_split": 0.4},
            "vehicle": {"v_lat_min": -2.0, "v_lat_max": 2.0}
        }"#,
    )?;
    let oracle = ObstacleOracle::new()
        .with_static(Rect::new(12.0, -1.0, 16.0, 0.5))
        .with_dynamic(8, Rect::new(13.0, 0.5, 14.0, 2.0))
        .with_dynamic(9, Rect::new(14.0, 0.0, 15.0, 1.5));

    let mut set = ReachableSet::new(config, oracle)?;
    set.compute_all()?;

    println!("step  nodes  cells  area");
    for &step in set.steps_computed() {
        println!(
            "{step:>4}  {:>5}  {:>5}  {:.3}",
            set.reachable_set_at_step(step).len(),
            set.drivable_area_at_step(step).len(),
            set.area_of_reachable_set(step)
        );
    }
    Ok(())
}
