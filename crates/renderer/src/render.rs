pub mod textures;

use awsm_unified_renderer_core::command::{
    color::Color,
    render_pass::{ColorAttachment, DepthStencilAttachment, RenderPassDescriptor, RenderPassEncoder},
    LoadOp, StoreOp,
};

use crate::{
    draw::{DrawPlan, DrawStrategy, INDIRECT_COMMAND_STRIDE},
    error::{AwsmError, Result},
    AwsmRenderer,
};

/// What the last `render` call submitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub instance_count: usize,
    pub batch_count: usize,
    pub draw_calls: usize,
    pub strategy: Option<DrawStrategy>,
}

impl FrameStats {
    pub fn from_plan(plan: &DrawPlan, instance_count: usize, batch_count: usize) -> Self {
        Self {
            instance_count,
            batch_count,
            draw_calls: plan.draw_count(),
            strategy: plan.strategy(),
        }
    }
}

impl AwsmRenderer {
    /// Draws the last packed instances in one pass.
    ///
    /// With no instances the pass only clears. A bind group must have been
    /// built with `update_bind_group` first; if a bound buffer has been
    /// reallocated since, it is rebuilt here.
    pub fn render(&mut self) -> Result<FrameStats> {
        let _maybe_span_guard = if self.logging.render_timings {
            Some(tracing::span!(tracing::Level::INFO, "Render").entered())
        } else {
            None
        };

        if self.disposed {
            return Err(AwsmError::Disposed);
        }

        if self.bind_group.bind_group().is_none() {
            return Err(AwsmError::NotInitialized("bind group"));
        }

        self.camera.write_gpu(&self.gpu, &self.logging)?;
        self.geometry
            .upload_if_changed(&self.gpu, &self.meshes, &self.logging)?;

        if self.bind_group_is_stale() {
            tracing::debug!("bound buffer reallocated, rebuilding bind group");
            self.update_bind_group()?;
        }

        let plan = DrawPlan::build(
            self.instances.batches(),
            self.instances.instance_count(),
            &self.meshes,
            &self.config,
            self.indirect_supported,
        )?;

        if let DrawPlan::Indirect(_) = &plan {
            self.indirect_buffer
                .write(&self.gpu, bytemuck::cast_slice(&plan.indirect_words()))?;
        }

        let color_view = self.gpu.current_context_texture_view()?;
        let depth_view = if self.config.depth_test {
            Some(self.depth_texture.view(&self.gpu)?)
        } else {
            None
        };

        let command_encoder = self.gpu.create_command_encoder(Some("Unified Renderer"));

        let render_pass = command_encoder.begin_render_pass(RenderPassDescriptor {
            color_attachments: vec![ColorAttachment::new(
                &color_view,
                LoadOp::Clear,
                StoreOp::Store,
            )
            .with_clear_color(Color::from(self.config.clear_color))],
            depth_stencil_attachment: depth_view.as_ref().map(|view| {
                DepthStencilAttachment::new(view)
                    .with_depth_clear_value(1.0)
                    .with_depth_load_op(LoadOp::Clear)
                    .with_depth_store_op(StoreOp::Store)
            }),
            label: Some("Unified"),
        })?;

        if !matches!(plan, DrawPlan::Empty) {
            self.encode_draws(&render_pass, &plan)?;
        }

        render_pass.end();
        command_encoder.submit(&self.gpu);

        Ok(FrameStats::from_plan(
            &plan,
            self.instances.instance_count(),
            self.instances.batches().len(),
        ))
    }

    fn encode_draws(&self, render_pass: &RenderPassEncoder, plan: &DrawPlan) -> Result<()> {
        let bind_group = self
            .bind_group
            .bind_group()
            .ok_or(AwsmError::NotInitialized("bind group"))?;

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, bind_group, None)?;
        self.geometry.bind(render_pass)?;

        match plan {
            DrawPlan::Empty => {}
            DrawPlan::Direct(batches) => {
                for batch in batches {
                    self.geometry.draw_mesh(
                        render_pass,
                        &self.meshes,
                        &batch.mesh_id,
                        batch.instance_count,
                        batch.first_instance,
                    )?;
                }
            }
            DrawPlan::Indirect(calls) => {
                let indirect_buffer = self
                    .indirect_buffer
                    .gpu_buffer()
                    .ok_or(AwsmError::NotInitialized("indirect buffer"))?;

                for (index, call) in calls.iter().enumerate() {
                    let offset = (index * INDIRECT_COMMAND_STRIDE) as u64;
                    if call.is_indexed() {
                        render_pass.draw_indexed_indirect(indirect_buffer, offset);
                    } else {
                        render_pass.draw_indirect(indirect_buffer, offset);
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::RendererConfig,
        instances::{InstanceRecord, Instances},
        mesh::{MaterialId, MeshRegistry},
    };

    #[test]
    fn stats_reflect_the_plan() {
        let mut registry = MeshRegistry::new();
        registry.register_mesh("tri", &[0.0; 9], &[0, 1, 2]).unwrap();

        let mut instances = Instances::new(1024);
        for object_id in 0..25 {
            instances.push(InstanceRecord {
                world_transform: glam::Mat4::IDENTITY,
                material_id: MaterialId::new(0),
                mesh_id: "tri".to_string(),
                object_id,
            });
        }
        instances.prepare(&registry).unwrap();

        let plan = DrawPlan::build(
            instances.batches(),
            instances.instance_count(),
            &registry,
            &RendererConfig::default(),
            true,
        )
        .unwrap();
        let stats = FrameStats::from_plan(&plan, instances.instance_count(), instances.batches().len());

        assert_eq!(
            stats,
            FrameStats {
                instance_count: 25,
                batch_count: 1,
                draw_calls: 1,
                strategy: Some(DrawStrategy::Indirect),
            }
        );
    }

    #[test]
    fn empty_frame_has_no_strategy() {
        let stats = FrameStats::from_plan(&DrawPlan::Empty, 0, 0);
        assert_eq!(stats.strategy, None);
        assert_eq!(stats.draw_calls, 0);
    }
}
