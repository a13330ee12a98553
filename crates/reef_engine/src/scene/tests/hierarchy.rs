//! Parent/child transform composition across frames

use super::{scene, Probe};
use crate::foundation::math::{constants::HALF_PI, Vec3};
use approx::assert_relative_eq;

#[test]
fn test_child_follows_parent_delta() {
    let mut scene = scene();
    let parent = scene.add(Probe::new("parent", Vec3::new(0.0, -5.0, 0.0)).moving(Vec3::new(2.0, 0.0, 0.0)).boxed());
    let child = scene.add(Probe::new("child", Vec3::new(0.0, 1.0, 0.0)).child_of(parent).boxed());

    scene.update(0.5);
    let parent_before = scene.get(parent).expect("parent").node().world_position();
    let child_before = scene.get(child).expect("child").node().world_position();
    assert_relative_eq!(child_before, parent_before + Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-5);

    scene.update(0.5);
    let parent_after = scene.get(parent).expect("parent").node().world_position();
    let child_after = scene.get(child).expect("child").node().world_position();

    // Same frame: the child already sees the parent's new matrix
    assert_relative_eq!(child_after - child_before, parent_after - parent_before, epsilon = 1e-5);
    assert_relative_eq!(parent_after - parent_before, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
}

#[test]
fn test_child_offset_rotates_with_parent() {
    let mut scene = scene();
    let parent = scene.add(Probe::new("parent", Vec3::new(3.0, 0.0, 0.0)).spinning(HALF_PI).boxed());
    let child = scene.add(Probe::new("fin", Vec3::new(1.0, 0.0, 0.0)).child_of(parent).boxed());

    // One second of spin: a quarter turn about Y sends +X to -Z
    scene.update(1.0);
    let world = scene.get(child).expect("child").node().world_position();
    assert_relative_eq!(world, Vec3::new(3.0, 0.0, -1.0), epsilon = 1e-5);
}

#[test]
fn test_root_world_equals_local() {
    let mut scene = scene();
    let id = scene.add(Probe::new("rock", Vec3::new(4.0, -15.0, 2.0)).spinning(0.3).boxed());
    scene.update(0.25);

    let node = scene.get(id).expect("rock").node();
    assert_relative_eq!(*node.world_matrix(), node.transform.to_matrix(), epsilon = 1e-6);
}

#[test]
fn test_zero_dt_still_recomposes() {
    let mut scene = scene();
    let parent = scene.add(Probe::new("parent", Vec3::zeros()).boxed());
    let child = scene.add(Probe::new("child", Vec3::new(0.0, 0.0, 1.0)).child_of(parent).boxed());
    scene.update(0.0);

    // Move the parent from outside, then run a paused frame
    scene
        .get_mut(parent)
        .expect("parent")
        .node_mut()
        .transform
        .position = Vec3::new(0.0, 7.0, 0.0);
    scene.update(0.0);

    let world = scene.get(child).expect("child").node().world_position();
    assert_relative_eq!(world, Vec3::new(0.0, 7.0, 1.0), epsilon = 1e-6);
    assert_eq!(scene.time(), 0.0);
}

#[test]
fn test_added_child_is_composed_before_first_update() {
    let mut scene = scene();
    let parent = scene.add(Probe::new("parent", Vec3::new(2.0, -4.0, 0.0)).boxed());
    let child = scene.add(Probe::new("child", Vec3::new(0.0, 1.0, 0.0)).child_of(parent).boxed());

    let world = scene.get(child).expect("child").node().world_position();
    assert_relative_eq!(world, Vec3::new(2.0, -3.0, 0.0), epsilon = 1e-6);
}
