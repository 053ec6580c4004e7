use tui_raster::core::{draw_line, draw_text, Surface};
use tui_raster::term::{encode_frame_into, SurfaceHost};
use tui_raster::types::SurfaceOptions;

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn term_frame_encodes_surface_rows() {
    let mut surface = Surface::with_size(5, 2).unwrap();
    draw_line(&mut surface, 0, 0, 4, 0);
    draw_text(&mut surface, 1, 1, b"hey");

    let mut out = Vec::new();
    encode_frame_into(surface.render_with_terminator(), &mut out).unwrap();
    assert!(contains(&out, b"00000\r\n hey "));
    assert!(!contains(&out, b"\0"));
}

#[test]
fn term_host_tracks_terminal_size_changes() {
    let mut host = SurfaceHost::new(80, 24, SurfaceOptions::default()).unwrap();
    assert!(!host.sync(80, 24).unwrap());
    assert!(host.sync(100, 30).unwrap());
    assert_eq!(host.surface_mut().render().len(), 100 * 30 + 30);
}
