use glam::{Mat4, Vec3, Vec4};

use super::*;

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, 1e-5)
}

#[test]
fn root_world_equals_local() {
    let mut transforms = Transforms::new();
    let local = Transform::IDENTITY
        .with_position(Vec3::new(1.0, 2.0, 3.0))
        .with_rotation(Vec3::new(0.0, 45.0, 0.0))
        .with_uniform_scale(2.0);
    let key = transforms.insert(local.clone(), None).unwrap();

    let world = transforms.world(key).unwrap().clone();
    assert_eq!(world.position, local.position);
    assert_eq!(world.rotation, local.rotation);
    assert_eq!(world.scale, local.scale);
    assert_eq!(world.matrix, local.to_matrix());
}

#[test]
fn child_composes_with_parent() {
    let mut transforms = Transforms::new();
    let parent = transforms
        .insert(
            Transform::IDENTITY
                .with_position(Vec3::new(10.0, 0.0, 0.0))
                .with_rotation(Vec3::new(0.0, 0.0, 30.0))
                .with_scale(Vec3::new(2.0, 3.0, 4.0)),
            None,
        )
        .unwrap();
    let child = transforms
        .insert(
            Transform::IDENTITY
                .with_position(Vec3::new(1.0, 1.0, 1.0))
                .with_rotation(Vec3::new(0.0, 0.0, 15.0))
                .with_uniform_scale(0.5),
            Some(parent),
        )
        .unwrap();

    assert!(approx_vec3(
        transforms.world_position(child).unwrap(),
        Vec3::new(12.0, 3.0, 4.0)
    ));
    assert!(approx_vec3(
        transforms.world_rotation(child).unwrap(),
        Vec3::new(0.0, 0.0, 45.0)
    ));
    assert!(approx_vec3(
        transforms.world_scale(child).unwrap(),
        Vec3::new(1.0, 1.5, 2.0)
    ));
}

#[test]
fn matrix_layout_is_column_major() {
    let matrix = compose_matrix(
        Vec3::new(5.0, 6.0, 7.0),
        Vec3::new(0.0, 0.0, 90.0),
        Vec3::new(2.0, 1.0, 1.0),
    );

    // translation in the last column
    assert_eq!(matrix.w_axis, Vec4::new(5.0, 6.0, 7.0, 1.0));
    // 90 degrees about z swings x onto y, then scale stretches it
    assert!(matrix.x_axis.abs_diff_eq(Vec4::new(0.0, 2.0, 0.0, 0.0), 1e-5));
    assert!(matrix.y_axis.abs_diff_eq(Vec4::new(-1.0, 0.0, 0.0, 0.0), 1e-5));

    let identity = compose_matrix(Vec3::ZERO, Vec3::ZERO, Vec3::ONE);
    assert_eq!(identity, Mat4::IDENTITY);
}

#[test]
fn rotation_order_is_z_then_y_then_x() {
    let rotation = Vec3::new(30.0, 45.0, 60.0);
    let expected = Mat4::from_rotation_z(60f32.to_radians())
        * Mat4::from_rotation_y(45f32.to_radians())
        * Mat4::from_rotation_x(30f32.to_radians());

    assert!(compose_matrix(Vec3::ZERO, rotation, Vec3::ONE).abs_diff_eq(expected, 1e-5));
}

#[test]
fn dirtiness_propagates_eagerly_and_clears_lazily() {
    let mut transforms = Transforms::new();
    let root = transforms.insert(Transform::IDENTITY, None).unwrap();
    let middle = transforms.insert(Transform::IDENTITY, Some(root)).unwrap();
    let leaf = transforms.insert(Transform::IDENTITY, Some(middle)).unwrap();

    transforms.update_world();
    assert!(!transforms.is_dirty(root));
    assert!(!transforms.is_dirty(leaf));

    transforms.translate(root, Vec3::X).unwrap();
    assert!(transforms.is_dirty(root));
    assert!(transforms.is_dirty(middle));
    assert!(transforms.is_dirty(leaf));

    // reading the middle node cleans it and its ancestors, not its children
    assert!(approx_vec3(
        transforms.world_position(middle).unwrap(),
        Vec3::X
    ));
    assert!(!transforms.is_dirty(root));
    assert!(!transforms.is_dirty(middle));
    assert!(transforms.is_dirty(leaf));

    assert!(approx_vec3(transforms.world_position(leaf).unwrap(), Vec3::X));
    assert!(!transforms.is_dirty(leaf));
}

#[test]
fn grandchild_follows_root_changes() {
    let mut transforms = Transforms::new();
    let root = transforms.insert(Transform::IDENTITY, None).unwrap();
    let middle = transforms
        .insert(Transform::IDENTITY.with_position(Vec3::Y), Some(root))
        .unwrap();
    let leaf = transforms
        .insert(Transform::IDENTITY.with_position(Vec3::Z), Some(middle))
        .unwrap();

    transforms.update_world();
    transforms.set_scale(root, Vec3::splat(2.0)).unwrap();
    transforms.set_position(root, Vec3::new(1.0, 0.0, 0.0)).unwrap();

    // (1,0,0) + (0,1,0)*2 = (1,2,0), then + (0,0,1)*2
    assert!(approx_vec3(
        transforms.world_position(leaf).unwrap(),
        Vec3::new(1.0, 2.0, 2.0)
    ));
    assert!(approx_vec3(
        transforms.world_scale(leaf).unwrap(),
        Vec3::splat(2.0)
    ));
}

#[test]
fn set_parent_rejects_cycles() {
    let mut transforms = Transforms::new();
    let a = transforms.insert(Transform::IDENTITY, None).unwrap();
    let b = transforms.insert(Transform::IDENTITY, Some(a)).unwrap();
    let c = transforms.insert(Transform::IDENTITY, Some(b)).unwrap();

    assert_eq!(
        transforms.set_parent(a, Some(c)),
        Err(AwsmTransformError::Cycle {
            child: a,
            parent: c
        })
    );
    assert_eq!(
        transforms.set_parent(a, Some(a)),
        Err(AwsmTransformError::Cycle {
            child: a,
            parent: a
        })
    );
    assert_eq!(transforms.parent(a), None);
}

#[test]
fn reparenting_moves_child_and_marks_dirty() {
    let mut transforms = Transforms::new();
    let left = transforms
        .insert(Transform::IDENTITY.with_position(Vec3::X * -5.0), None)
        .unwrap();
    let right = transforms
        .insert(Transform::IDENTITY.with_position(Vec3::X * 5.0), None)
        .unwrap();
    let child = transforms
        .insert(Transform::IDENTITY.with_position(Vec3::Y), Some(left))
        .unwrap();
    transforms.update_world();

    transforms.set_parent(child, Some(right)).unwrap();
    assert!(transforms.is_dirty(child));
    assert_eq!(transforms.parent(child), Some(right));
    assert!(transforms.children(left).is_empty());
    assert_eq!(transforms.children(right), &[child]);
    assert!(approx_vec3(
        transforms.world_position(child).unwrap(),
        Vec3::new(5.0, 1.0, 0.0)
    ));

    transforms.set_parent(child, None).unwrap();
    assert!(approx_vec3(
        transforms.world_position(child).unwrap(),
        Vec3::Y
    ));
}

#[test]
fn removing_parent_orphans_children() {
    let mut transforms = Transforms::new();
    let parent = transforms
        .insert(Transform::IDENTITY.with_position(Vec3::splat(3.0)), None)
        .unwrap();
    let child = transforms
        .insert(Transform::IDENTITY.with_position(Vec3::X), Some(parent))
        .unwrap();
    transforms.update_world();

    let removed = transforms.remove(parent).unwrap();
    assert_eq!(removed.position, Vec3::splat(3.0));
    assert!(!transforms.contains(parent));
    assert_eq!(transforms.parent(child), None);
    assert!(transforms.is_dirty(child));
    assert!(approx_vec3(transforms.world_position(child).unwrap(), Vec3::X));

    assert_eq!(
        transforms.remove(parent),
        Err(AwsmTransformError::LocalNotFound(parent))
    );
    assert!(transforms.world(parent).is_err());
}

#[test]
fn insert_with_missing_parent_fails() {
    let mut transforms = Transforms::new();
    let gone = transforms.insert(Transform::IDENTITY, None).unwrap();
    transforms.remove(gone).unwrap();

    assert_eq!(
        transforms.insert(Transform::IDENTITY, Some(gone)),
        Err(AwsmTransformError::ParentNotFound(gone))
    );
    assert!(transforms.is_empty());
}

#[test]
fn parent_attached_after_child_position_is_set() {
    let mut transforms = Transforms::new();
    let child = transforms.insert(Transform::IDENTITY, None).unwrap();
    transforms
        .set_position(child, Vec3::new(1.0, 2.0, 3.0))
        .unwrap();
    assert!(approx_vec3(
        transforms.world_position(child).unwrap(),
        Vec3::new(1.0, 2.0, 3.0)
    ));

    let parent = transforms
        .insert(
            Transform::IDENTITY
                .with_position(Vec3::splat(10.0))
                .with_scale(Vec3::new(2.0, 3.0, 4.0)),
            None,
        )
        .unwrap();
    transforms.set_parent(child, Some(parent)).unwrap();

    assert!(transforms.is_dirty(child));
    assert!(approx_vec3(
        transforms.world_position(child).unwrap(),
        Vec3::new(12.0, 16.0, 22.0)
    ));
}
