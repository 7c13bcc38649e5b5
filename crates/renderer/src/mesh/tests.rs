use super::*;

fn positions(vertex_count: usize) -> Vec<f32> {
    (0..vertex_count * 3).map(|i| i as f32).collect()
}

fn triangle_indices(vertex_count: u32, index_count: usize) -> Vec<u32> {
    (0..index_count as u32).map(|i| i % vertex_count).collect()
}

#[test]
fn offsets_accumulate_in_registration_order() {
    let mut registry = MeshRegistry::new();

    let sphere = registry
        .register_mesh("sphere", &positions(20), &triangle_indices(20, 30))
        .unwrap();
    let cube = registry
        .register_mesh("cube", &positions(8), &triangle_indices(8, 36))
        .unwrap();

    assert_eq!(sphere.vertex_offset, 0);
    assert_eq!(sphere.index_offset, 0);
    assert_eq!(cube.vertex_offset, 20);
    assert_eq!(cube.index_offset, 30);
    assert_eq!(cube.vertex_float_offset(), 60);
    assert_eq!(cube.base_vertex(), 20);

    assert_eq!(registry.combined_vertices().len(), 28 * 3);
    assert_eq!(registry.combined_indices().len(), 66);
    assert_eq!(registry.mesh_index("sphere").unwrap(), 0);
    assert_eq!(registry.mesh_index("cube").unwrap(), 1);
}

#[test]
fn rebased_indices_stay_in_bounds() {
    let mut registry = MeshRegistry::new();
    registry
        .register_mesh("a", &positions(4), &[0, 1, 2, 2, 3, 0])
        .unwrap();
    registry
        .register_mesh("b", &positions(3), &[0, 1, 2])
        .unwrap();

    let total_vertices = (registry.combined_vertices().len() / 3) as i32;
    for mesh in registry.iter() {
        for &index in registry.indices_of(&mesh.id).unwrap() {
            let resolved = index as i32 + mesh.base_vertex();
            assert!(resolved >= mesh.base_vertex());
            assert!(resolved < total_vertices);
        }
    }
}

#[test]
fn per_mesh_slices_round_trip() {
    let mut registry = MeshRegistry::new();
    registry
        .register_mesh("first", &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2])
        .unwrap();
    registry
        .register_mesh("second", &[5.0, 5.0, 5.0], &[])
        .unwrap();

    assert_eq!(registry.vertices_of("second").unwrap(), &[5.0, 5.0, 5.0]);
    assert_eq!(registry.indices_of("first").unwrap(), &[0, 1, 2]);
    assert!(registry.indices_of("second").unwrap().is_empty());
    assert!(!registry.get_mesh("second").unwrap().is_indexed());
}

#[test]
fn rejects_invalid_registrations() {
    let mut registry = MeshRegistry::new();
    registry
        .register_mesh("tri", &positions(3), &[0, 1, 2])
        .unwrap();

    assert_eq!(
        registry.register_mesh("tri", &positions(3), &[0, 1, 2]),
        Err(AwsmMeshError::DuplicateMesh("tri".to_string()))
    );
    assert_eq!(
        registry.register_mesh("empty", &[], &[]),
        Err(AwsmMeshError::EmptyVertices("empty".to_string()))
    );
    assert_eq!(
        registry.register_mesh("ragged", &[0.0; 4], &[]),
        Err(AwsmMeshError::VertexStride {
            id: "ragged".to_string(),
            len: 4
        })
    );
    assert_eq!(
        registry.register_mesh("oob", &positions(3), &[0, 1, 3]),
        Err(AwsmMeshError::IndexOutOfRange {
            id: "oob".to_string(),
            index: 3,
            vertex_count: 3
        })
    );

    // failed registrations leave no trace
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.combined_vertices().len(), 9);
    assert_eq!(registry.version(), 1);
}

#[test]
fn missing_mesh_is_an_error() {
    let registry = MeshRegistry::new();
    assert!(registry.get_mesh("nope").is_none());
    assert_eq!(
        registry.mesh("nope"),
        Err(AwsmMeshError::MeshNotFound("nope".to_string()))
    );
}

#[test]
fn materials_pack_to_eight_floats() {
    let mut registry = MeshRegistry::new();
    let red = registry.register_material(MaterialData::new([1.0, 0.0, 0.0, 1.0]).with_roughness(0.25));
    let glow = registry.register_material(MaterialData::default().with_emissive(2.0));

    assert_eq!(red.index(), 0);
    assert_eq!(glow.index(), 1);
    assert_eq!(registry.version(), 2);

    let floats: &[f32] = bytemuck::cast_slice(registry.material_data());
    assert_eq!(floats.len(), 16);
    assert_eq!(&floats[..8], &[1.0, 0.0, 0.0, 1.0, 0.0, 0.25, 0.0, 0.0]);
    assert_eq!(floats[8 + 6], 2.0);
    assert_eq!(
        std::mem::size_of::<MaterialData>(),
        MaterialData::BYTE_SIZE
    );

    assert_eq!(
        registry.material(MaterialId::new(5)),
        Err(AwsmMeshError::MaterialNotFound(MaterialId::new(5)))
    );
}
