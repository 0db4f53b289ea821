//! Device Offload
//!
//! Fills the buffer on a separate compute device: copy in, run an
//! elementwise kernel writing each element's flat index, copy back, all
//! synchronized before returning. Availability is an explicit capability
//! probe — a real compute adapter must be present, and software
//! rasterizers do not count. Built without the `gpu` cargo feature the
//! probe always reports unavailable, so the driver skips the strategy and
//! marks it inapplicable instead of running it against an unfilled buffer.

use crate::strategy::Availability;

/// Probe for a usable compute device.
pub fn device_availability() -> Availability {
    #[cfg(feature = "gpu")]
    {
        gpu::probe()
    }
    #[cfg(not(feature = "gpu"))]
    {
        Availability::Unavailable {
            reason: "built without gpu support".to_string(),
        }
    }
}

/// Fill the buffer via the compute device.
///
/// Only invoked after [`device_availability`] reported `Ready`; without
/// the `gpu` feature the probe never does, so this body is unreachable in
/// that configuration.
pub fn device_offload(buf: &mut [u32]) {
    #[cfg(feature = "gpu")]
    gpu::fill(buf);
    #[cfg(not(feature = "gpu"))]
    let _ = buf;
}

#[cfg(feature = "gpu")]
mod gpu {
    use crate::strategy::Availability;
    use std::sync::OnceLock;
    use wgpu::util::DeviceExt;

    const WORKGROUP_SIZE: u32 = 256;
    /// Workgroups per dispatch, kept under the per-dimension limit; the
    /// kernel strides by the grid size so any buffer length is covered.
    const MAX_WORKGROUPS: u32 = 32_768;

    // Grid-stride loop: each invocation fills every stride-th element so a
    // single 1D dispatch covers buffers larger than one grid.
    const KERNEL: &str = r#"
@group(0) @binding(0)
var<storage, read_write> data: array<u32>;

@compute @workgroup_size(256)
fn fill_index(
    @builtin(global_invocation_id) gid: vec3<u32>,
    @builtin(num_workgroups) groups: vec3<u32>,
) {
    let stride = groups.x * 256u;
    var i = gid.x;
    loop {
        if (i >= arrayLength(&data)) {
            break;
        }
        data[i] = i;
        i = i + stride;
    }
}
"#;

    struct Context {
        device: wgpu::Device,
        queue: wgpu::Queue,
        pipeline: wgpu::ComputePipeline,
    }

    impl Context {
        fn create() -> Option<Context> {
            let instance = wgpu::Instance::default();
            let adapter = pollster::block_on(instance.request_adapter(
                &wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    force_fallback_adapter: false,
                    compatible_surface: None,
                },
            ))?;
            // A CPU adapter is the reference/emulated path; measuring it
            // would report "device" numbers for what is host code.
            if adapter.get_info().device_type == wgpu::DeviceType::Cpu {
                return None;
            }
            let (device, queue) = pollster::block_on(adapter.request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("fillbench"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            ))
            .ok()?;
            let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("fill_index"),
                source: wgpu::ShaderSource::Wgsl(KERNEL.into()),
            });
            let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some("fill_index"),
                layout: None,
                module: &module,
                entry_point: "fill_index",
            });
            Some(Context {
                device,
                queue,
                pipeline,
            })
        }
    }

    // Adapter, device, and pipeline are created once and reused across
    // trials; per-trial cost is the transfer and dispatch, as with the
    // other strategies whose pools outlive a single call.
    fn context() -> Option<&'static Context> {
        static CONTEXT: OnceLock<Option<Context>> = OnceLock::new();
        CONTEXT.get_or_init(Context::create).as_ref()
    }

    pub(super) fn probe() -> Availability {
        match context() {
            Some(_) => Availability::Ready,
            None => Availability::Unavailable {
                reason: "no compute adapter found".to_string(),
            },
        }
    }

    pub(super) fn fill(buf: &mut [u32]) {
        let Some(ctx) = context() else {
            return;
        };

        let storage = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("fill storage"),
                contents: bytemuck::cast_slice(buf),
                usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            });
        let readback = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fill readback"),
            size: std::mem::size_of_val(buf) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fill bind"),
            layout: &ctx.pipeline.get_bind_group_layout(0),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: storage.as_entire_binding(),
            }],
        });

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("fill") });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("fill_index"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&ctx.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            let needed = (buf.len() as u32).div_ceil(WORKGROUP_SIZE).max(1);
            pass.dispatch_workgroups(needed.min(MAX_WORKGROUPS), 1, 1);
        }
        encoder.copy_buffer_to_buffer(&storage, 0, &readback, 0, readback.size());
        ctx.queue.submit(Some(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = ctx.device.poll(wgpu::Maintain::Wait);
        // A device error past this point leaves the host buffer untouched;
        // verification then attributes the failure to this strategy.
        if rx.recv().map_or(true, |r| r.is_err()) {
            return;
        }
        {
            let view = slice.get_mapped_range();
            buf.copy_from_slice(bytemuck::cast_slice(&view));
        }
        readback.unmap();
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "gpu"))]
    #[test]
    fn probe_reports_unavailable_without_gpu_feature() {
        let availability = device_availability();
        assert!(!availability.is_ready());
        assert_eq!(
            availability.skip_reason(),
            Some("built without gpu support")
        );
    }

    #[cfg(not(feature = "gpu"))]
    #[test]
    fn offload_without_backend_leaves_buffer_untouched() {
        let mut buf = vec![0u32; 16];
        device_offload(&mut buf);
        assert!(buf.iter().all(|&v| v == 0));
    }
}
