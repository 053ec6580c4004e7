use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_raster::core::{
    draw_line, draw_mesh, draw_text, ClipPos, FnShader, IndexBuffer, MeshMode, PipeData,
    ShaderPipeline, Surface, VertexBuffer, VertexView,
};
use tui_raster::term::frame_fingerprint;
use tui_raster::types::{AttribLayout, ComponentKind};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn raster_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut surface = Surface::with_size(80, 24).unwrap();
    let shader = FnShader::new(
        |v: VertexView<'_>, pipe: &mut PipeData| {
            let [x, y, z] = v.attrib_f32::<3>(0).unwrap_or_default();
            pipe.write_f32(0, z);
            ClipPos::new(x, y, z)
        },
        |pipe: &PipeData| {
            if pipe.read_f32(0).unwrap_or(0.0) > 0.0 {
                b'#'
            } else {
                b'.'
            }
        },
    );
    let layout = AttribLayout::default().with(3, ComponentKind::Float);
    let mut pipeline = ShaderPipeline::new(shader, layout, 4).unwrap();
    let data: Vec<u8> = [[1.0f32, 2.0, 0.5], [40.0, 10.0, -0.5], [79.0, 23.0, 0.0]]
        .iter()
        .flatten()
        .flat_map(|v| v.to_ne_bytes())
        .collect();
    let vertices = VertexBuffer::from_bytes(&data, pipeline.stride()).unwrap();
    let index_data = [0u32, 1, 2, 1, 0];
    let indices = IndexBuffer::new(&index_data);

    // Warm-up.
    let _ = surface.render();

    let allocs = with_alloc_counting(|| {
        for frame in 0..200 {
            surface.clear();
            draw_line(&mut surface, 0, 0, frame % 80, 23);
            draw_line(&mut surface, -10, 5, 90, 5);
            draw_text(&mut surface, 10, 16, b"hello");
            draw_mesh(
                &mut surface,
                &mut pipeline,
                &indices,
                &vertices,
                MeshMode::Points,
            );
            let frame = surface.render();
            let _ = frame_fingerprint(frame);
        }
    });

    assert!(allocs == 0);
}
