//! Turning batches into draw commands, and picking between direct and indirect submission.

use awsm_unified_renderer_core::command::render_pass::RenderPassEncoder;

use crate::{
    config::RendererConfig,
    instances::RenderBatch,
    mesh::{MeshDefinition, MeshRegistry, Result},
};

/// Size of one record in the indirect buffer, large enough for an indexed draw
pub const INDIRECT_COMMAND_WORDS: usize = 5;
pub const INDIRECT_COMMAND_STRIDE: usize = INDIRECT_COMMAND_WORDS * 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    Indexed {
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        base_vertex: i32,
        first_instance: u32,
    },
    NonIndexed {
        vertex_count: u32,
        instance_count: u32,
        first_vertex: u32,
        first_instance: u32,
    },
}

impl DrawCall {
    pub fn for_mesh(mesh: &MeshDefinition, instance_count: u32, first_instance: u32) -> Self {
        if mesh.is_indexed() {
            Self::Indexed {
                index_count: mesh.index_count,
                instance_count,
                first_index: mesh.index_offset,
                base_vertex: mesh.base_vertex(),
                first_instance,
            }
        } else {
            Self::NonIndexed {
                vertex_count: mesh.vertex_count,
                instance_count,
                first_vertex: mesh.vertex_offset,
                first_instance,
            }
        }
    }

    pub fn instance_count(&self) -> u32 {
        match self {
            Self::Indexed { instance_count, .. } | Self::NonIndexed { instance_count, .. } => {
                *instance_count
            }
        }
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self, Self::Indexed { .. })
    }

    /// Layout matches `GPUDrawIndexedIndirectArgs` / `GPUDrawIndirectArgs`.
    /// Non-indexed draws leave the fifth word zeroed
    pub fn to_indirect_words(&self) -> [u32; INDIRECT_COMMAND_WORDS] {
        match *self {
            Self::Indexed {
                index_count,
                instance_count,
                first_index,
                base_vertex,
                first_instance,
            } => [
                index_count,
                instance_count,
                first_index,
                base_vertex as u32,
                first_instance,
            ],
            Self::NonIndexed {
                vertex_count,
                instance_count,
                first_vertex,
                first_instance,
            } => [vertex_count, instance_count, first_vertex, first_instance, 0],
        }
    }

    pub fn encode(&self, render_pass: &RenderPassEncoder) {
        match *self {
            Self::Indexed {
                index_count,
                instance_count,
                first_index,
                base_vertex,
                first_instance,
            } => render_pass.draw_indexed_instanced(
                index_count,
                instance_count,
                first_index,
                base_vertex,
                first_instance,
            ),
            Self::NonIndexed {
                vertex_count,
                instance_count,
                first_vertex,
                first_instance,
            } => render_pass.draw_instanced(vertex_count, instance_count, first_vertex, first_instance),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DrawStrategy {
    Direct,
    Indirect,
}

impl DrawStrategy {
    /// Indirect once the instance count reaches the threshold
    pub fn select(instance_count: usize, threshold: u32) -> Self {
        if instance_count >= threshold as usize {
            Self::Indirect
        } else {
            Self::Direct
        }
    }
}

/// Everything needed to encode one frame's draws
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPlan {
    Empty,
    Direct(Vec<RenderBatch>),
    Indirect(Vec<DrawCall>),
}

impl DrawPlan {
    /// Fails if any batch names a mesh that is not registered, before anything is encoded.
    ///
    /// Falls back to direct draws when the indirect path is unavailable
    /// (the device lacks `indirect-first-instance`) or when there are more
    /// batches than `max_draw_commands`.
    pub fn build(
        batches: &[RenderBatch],
        instance_count: usize,
        registry: &MeshRegistry,
        config: &RendererConfig,
        indirect_supported: bool,
    ) -> Result<Self> {
        if instance_count == 0 || batches.is_empty() {
            return Ok(Self::Empty);
        }

        let calls = batches
            .iter()
            .map(|batch| {
                registry
                    .mesh(&batch.mesh_id)
                    .map(|mesh| DrawCall::for_mesh(mesh, batch.instance_count, batch.first_instance))
            })
            .collect::<Result<Vec<_>>>()?;

        match DrawStrategy::select(instance_count, config.indirect_draw_threshold) {
            DrawStrategy::Direct => Ok(Self::Direct(batches.to_vec())),
            DrawStrategy::Indirect if !indirect_supported => Ok(Self::Direct(batches.to_vec())),
            DrawStrategy::Indirect if calls.len() > config.max_draw_commands as usize => {
                tracing::warn!(
                    "{} batches exceed max draw commands ({}), drawing directly",
                    calls.len(),
                    config.max_draw_commands
                );
                Ok(Self::Direct(batches.to_vec()))
            }
            DrawStrategy::Indirect => Ok(Self::Indirect(calls)),
        }
    }

    pub fn strategy(&self) -> Option<DrawStrategy> {
        match self {
            Self::Empty => None,
            Self::Direct(_) => Some(DrawStrategy::Direct),
            Self::Indirect(_) => Some(DrawStrategy::Indirect),
        }
    }

    pub fn draw_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Direct(batches) => batches.len(),
            Self::Indirect(calls) => calls.len(),
        }
    }

    pub fn instance_total(&self) -> u32 {
        match self {
            Self::Empty => 0,
            Self::Direct(batches) => batches.iter().map(|batch| batch.instance_count).sum(),
            Self::Indirect(calls) => calls.iter().map(DrawCall::instance_count).sum(),
        }
    }

    /// Packed contents of the indirect buffer, empty unless indirect
    pub fn indirect_words(&self) -> Vec<u32> {
        match self {
            Self::Indirect(calls) => calls
                .iter()
                .flat_map(|call| call.to_indirect_words())
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instances::{build_batches, InstanceRecord};
    use crate::mesh::MaterialId;

    fn registry() -> MeshRegistry {
        let mut registry = MeshRegistry::new();
        registry
            .register_mesh("sphere", &[0.0; 60], &(0..30).map(|i| i % 20).collect::<Vec<u32>>())
            .unwrap();
        registry
            .register_mesh("cube", &[0.0; 24], &(0..36).map(|i| i % 8).collect::<Vec<u32>>())
            .unwrap();
        registry.register_mesh("points", &[0.0; 9], &[]).unwrap();
        registry
    }

    fn batches_for(meshes: &[(&str, usize)]) -> (Vec<RenderBatch>, usize) {
        let records: Vec<InstanceRecord> = meshes
            .iter()
            .flat_map(|(mesh_id, count)| {
                (0..*count).map(|object_id| InstanceRecord {
                    world_transform: glam::Mat4::IDENTITY,
                    material_id: MaterialId::new(0),
                    mesh_id: mesh_id.to_string(),
                    object_id: object_id as u32,
                })
            })
            .collect();
        (build_batches(&records), records.len())
    }

    #[test]
    fn strategy_switches_at_threshold() {
        assert_eq!(DrawStrategy::select(0, 20), DrawStrategy::Direct);
        assert_eq!(DrawStrategy::select(19, 20), DrawStrategy::Direct);
        assert_eq!(DrawStrategy::select(20, 20), DrawStrategy::Indirect);
        assert_eq!(DrawStrategy::select(5000, 20), DrawStrategy::Indirect);
    }

    #[test]
    fn both_paths_draw_every_instance() {
        let registry = registry();
        let config = RendererConfig::default();

        let (batches, count) = batches_for(&[("sphere", 10), ("cube", 9)]);
        let direct = DrawPlan::build(&batches, count, &registry, &config, true).unwrap();
        assert_eq!(direct.strategy(), Some(DrawStrategy::Direct));
        assert_eq!(direct.draw_count(), 2);
        assert_eq!(direct.instance_total(), 19);
        assert!(direct.indirect_words().is_empty());

        let (batches, count) = batches_for(&[("sphere", 10), ("cube", 10)]);
        let indirect = DrawPlan::build(&batches, count, &registry, &config, true).unwrap();
        assert_eq!(indirect.strategy(), Some(DrawStrategy::Indirect));
        assert_eq!(indirect.draw_count(), 2);
        assert_eq!(indirect.instance_total(), 20);
    }

    #[test]
    fn indirect_words_follow_gpu_layout() {
        let registry = registry();
        let (batches, count) = batches_for(&[("sphere", 15), ("cube", 5), ("points", 2)]);
        let plan =
            DrawPlan::build(&batches, count, &registry, &RendererConfig::default(), true).unwrap();

        assert_eq!(
            plan.indirect_words(),
            vec![
                30, 15, 0, 0, 0, //
                36, 5, 30, 20, 15, //
                3, 2, 28, 20, 0,
            ]
        );
        assert_eq!(plan.indirect_words().len() * 4, 3 * INDIRECT_COMMAND_STRIDE);
    }

    #[test]
    fn direct_call_uses_base_vertex() {
        let registry = registry();
        let cube = registry.mesh("cube").unwrap();

        assert_eq!(
            DrawCall::for_mesh(cube, 4, 11),
            DrawCall::Indexed {
                index_count: 36,
                instance_count: 4,
                first_index: 30,
                base_vertex: 20,
                first_instance: 11,
            }
        );
    }

    #[test]
    fn too_many_batches_fall_back_to_direct() {
        let registry = registry();
        let config = RendererConfig::default()
            .with_indirect_draw_threshold(2)
            .with_max_draw_commands(2);
        let (batches, count) = batches_for(&[("sphere", 1), ("cube", 1), ("sphere", 1)]);

        let plan = DrawPlan::build(&batches, count, &registry, &config, true).unwrap();
        assert_eq!(plan.strategy(), Some(DrawStrategy::Direct));
        assert_eq!(plan.draw_count(), 3);
    }

    #[test]
    fn unsupported_indirect_falls_back_to_direct() {
        let registry = registry();
        let (batches, count) = batches_for(&[("cube", 50)]);

        let plan =
            DrawPlan::build(&batches, count, &registry, &RendererConfig::default(), false).unwrap();
        assert_eq!(plan, DrawPlan::Direct(batches));
    }

    #[test]
    fn empty_and_unknown() {
        let registry = registry();
        let config = RendererConfig::default();

        assert_eq!(
            DrawPlan::build(&[], 0, &registry, &config, true).unwrap(),
            DrawPlan::Empty
        );

        let (batches, count) = batches_for(&[("cube", 1), ("torus", 1)]);
        assert!(DrawPlan::build(&batches, count, &registry, &config, true).is_err());
    }
}
