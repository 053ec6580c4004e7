//! Terminal rasterizer demo (default binary).
//!
//! Draws a sweeping line, a text run and a spinning point mesh every frame.
//! Set `TUI_RASTER_CONFIG` to a JSON file holding surface options, e.g.
//! `{"clear_color": 46, "bounds": "clip"}`. Quit with `q`, `Esc` or `Ctrl-C`.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use log::info;

use tui_raster::core::{
    draw_line, draw_mesh, draw_text, ClipPos, IndexBuffer, MeshMode, PipeData, Shader,
    ShaderPipeline, VertexBuffer, VertexView,
};
use tui_raster::term::{
    frame_fingerprint, terminal_size, PresentThrottle, SurfaceHost, TerminalRenderer,
};
use tui_raster::types::{AttribLayout, ComponentKind, SurfaceOptions, DEFAULT_FRAME_MS};

/// Re-present an unchanged frame at least this often.
const STATIC_REPRESENT_MS: u64 = 500;

const GREETING: &[u8] = b"hello";
const GREETING_COL: u16 = 10;

/// Cube corners in normalized device coordinates.
const CUBE: [[f32; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];

/// Rotates positions about the Y axis and maps NDC to surface cells.
///
/// The rotated depth travels to the fragment stage through pipe data and picks
/// a brighter glyph for nearer vertices.
struct SpinShader {
    angle: f32,
    cols: f32,
    rows: f32,
}

impl Shader for SpinShader {
    fn vertex(&self, vertex: VertexView<'_>, pipe: &mut PipeData) -> ClipPos {
        let [x, y, z] = vertex.attrib_f32::<3>(0).unwrap_or_default();
        let (s, c) = self.angle.sin_cos();
        let rx = x * c + z * s;
        let rz = -x * s + z * c;
        pipe.write_f32(0, rz);
        ClipPos::new(
            (rx + 1.0) * 0.5 * self.cols,
            (y + 1.0) * 0.5 * self.rows,
            rz,
        )
    }

    fn fragment(&self, pipe: &PipeData) -> u8 {
        match pipe.read_f32(0).unwrap_or(0.0) {
            z if z < -0.25 => b'@',
            z if z < 0.25 => b'o',
            _ => b'.',
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = load_options()?;
    info!("surface options: {:?}", options);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, options);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn load_options() -> Result<SurfaceOptions> {
    let Ok(path) = std::env::var("TUI_RASTER_CONFIG") else {
        return Ok(SurfaceOptions::default());
    };
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path))
}

fn run(term: &mut TerminalRenderer, options: SurfaceOptions) -> Result<()> {
    let (cols, rows) = terminal_size();
    let mut host = SurfaceHost::new(cols, rows, options)?;
    let mut throttle = PresentThrottle::new(STATIC_REPRESENT_MS);

    let vertex_bytes: Vec<u8> = CUBE
        .iter()
        .flatten()
        .flat_map(|v| v.to_ne_bytes())
        .collect();
    let indices: Vec<u32> = (0..CUBE.len() as u32).collect();

    let layout = AttribLayout::default().with(3, ComponentKind::Float);
    let shader = SpinShader {
        angle: 0.0,
        cols: cols as f32,
        rows: rows as f32,
    };
    let mut pipeline = ShaderPipeline::new(shader, layout, 4)?;
    let vertices = VertexBuffer::from_bytes(&vertex_bytes, pipeline.stride())?;
    let indices = IndexBuffer::new(&indices);

    let start = Instant::now();
    let frame_duration = Duration::from_millis(DEFAULT_FRAME_MS);
    let mut timer = 0.0f32;

    loop {
        let (cols, rows) = terminal_size();
        if host.sync(cols, rows)? {
            throttle.invalidate();
        }

        let shader = pipeline.shader_mut();
        shader.angle = timer;
        shader.cols = cols as f32;
        shader.rows = rows as f32;

        let surface = host.surface_mut();
        surface.clear();
        if cols > 0 && rows > 0 {
            draw_line(
                surface,
                0,
                0,
                ((timer / 10.0).cos().abs() * cols.saturating_sub(1) as f32) as i32,
                ((timer / 14.0).sin().abs() * rows.saturating_sub(1) as f32) as i32,
            );
            if let Some((x, y)) = text_origin(cols, rows) {
                draw_text(surface, x, y, GREETING);
            }
            draw_mesh(surface, &mut pipeline, &indices, &vertices, MeshMode::Points);
        }

        let frame = surface.render();
        let now_ms = start.elapsed().as_millis() as u64;
        if throttle.should_present(now_ms, frame_fingerprint(frame)) {
            term.present(frame)?;
        }

        timer += 0.05;

        if event::poll(frame_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && should_quit(key.code, key.modifiers) {
                    return Ok(());
                }
            }
        }
    }
}

/// Where the greeting starts, or `None` when the surface is too small for it.
fn text_origin(cols: u16, rows: u16) -> Option<(i32, i32)> {
    if rows == 0 || cols < GREETING_COL + GREETING.len() as u16 {
        return None;
    }
    Some((GREETING_COL as i32, rows as i32 * 2 / 3))
}

fn should_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
