//! Integration tests: widget scenarios (scribble-editor ↔ scribble-render).
//!
//! Drives a `SketchPad` over the software raster the way the host UI does
//! and checks the bitmap, the view state, and the exported image.

use base64::Engine as _;
use base64::engine::general_purpose;
use kurbo::Point;
use pretty_assertions::assert_eq;
use scribble_core::config::{Environment, SurfaceConfig};
use scribble_core::error::SurfaceError;
use scribble_core::model::{BackgroundColor, Color, FontWeight};
use scribble_editor::{DOWNLOAD_NAME, Downloader, ExportArtifact, InputEvent, SketchPad, TouchPoint};
use scribble_render::{PNG_DATA_URL_PREFIX, Raster};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_pad() -> SketchPad<Raster> {
    init_logging();
    let config = SurfaceConfig::default();
    let geometry = config.resolve(&Environment::default()).unwrap();
    SketchPad::mounted(Raster::from_geometry(&geometry).unwrap())
}

fn raster(pad: &SketchPad<Raster>) -> &Raster {
    pad.surface().expect("pad should be mounted")
}

fn draw(pad: &mut SketchPad<Raster>, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().unwrap();
    pad.pointer_down(Point::new(first.0, first.1));
    for (x, y) in rest {
        pad.pointer_move(Point::new(*x, *y));
    }
    pad.pointer_up();
}

#[derive(Default)]
struct RecordingDownloader {
    downloads: Vec<ExportArtifact>,
}

impl Downloader for RecordingDownloader {
    fn download(&mut self, artifact: &ExportArtifact) -> Result<(), SurfaceError> {
        self.downloads.push(artifact.clone());
        Ok(())
    }
}

struct FailingDownloader;

impl Downloader for FailingDownloader {
    fn download(&mut self, _artifact: &ExportArtifact) -> Result<(), SurfaceError> {
        Err(SurfaceError::Platform("blocked".to_string()))
    }
}

// ─── Drawing session ────────────────────────────────────────────────────

#[test]
fn red_background_diagonal_stroke() {
    let mut pad = make_pad();
    assert!(pad.set_background_color("#ff0000"));
    draw(&mut pad, &[(10.0, 10.0), (50.0, 50.0)]);

    let red = Color::rgb(255, 0, 0);
    let r = raster(&pad);
    for i in (10..50).step_by(5) {
        let px = r.composite_pixel(i, i, red).unwrap();
        assert_ne!(px, red, "expected stroke at ({i},{i})");
    }
    assert_eq!(r.composite_pixel(80, 20, red), Some(red));
    assert_eq!(pad.view().inline_style(), "background-color: #ff0000;");
}

#[test]
fn background_change_does_not_touch_pixels() {
    let mut pad = make_pad();
    draw(&mut pad, &[(0.0, 5.0), (100.0, 5.0)]);
    let before = raster(&pad).data().to_vec();

    pad.set_background_color("#00ff00");
    assert_eq!(raster(&pad).data(), &before[..]);
}

#[test]
fn down_up_without_move_paints_nothing() {
    let mut pad = make_pad();
    pad.pointer_down(Point::new(20.0, 20.0));
    pad.pointer_up();
    assert!(raster(&pad).is_blank());
}

#[test]
fn moves_outside_a_session_never_paint() {
    let mut pad = make_pad();

    pad.pointer_move(Point::new(10.0, 10.0));
    pad.pointer_move(Point::new(90.0, 90.0));
    assert!(raster(&pad).is_blank());

    // Released sessions do not resume.
    draw(&mut pad, &[(10.0, 10.0), (20.0, 10.0)]);
    let painted = raster(&pad).painted_pixels();
    pad.pointer_move(Point::new(200.0, 200.0));
    pad.pointer_leave();
    pad.pointer_move(Point::new(300.0, 300.0));
    assert_eq!(raster(&pad).painted_pixels(), painted);
}

#[test]
fn leave_ends_the_stroke() {
    let mut pad = make_pad();
    pad.pointer_down(Point::new(10.0, 100.0));
    pad.pointer_move(Point::new(40.0, 100.0));
    pad.pointer_leave();
    pad.pointer_move(Point::new(300.0, 100.0));

    let r = raster(&pad);
    assert_eq!(r.pixel(20, 100), Some(Color::BLACK));
    assert_eq!(r.pixel(200, 100), Some(Color::TRANSPARENT));
}

#[test]
fn new_down_starts_a_fresh_path() {
    let mut pad = make_pad();
    draw(&mut pad, &[(10.0, 10.0), (30.0, 10.0)]);
    draw(&mut pad, &[(10.0, 200.0), (30.0, 200.0)]);

    // No segment joins the end of the first stroke to the second.
    let r = raster(&pad);
    assert_eq!(r.pixel(30, 100), Some(Color::TRANSPARENT));
    assert_eq!(r.pixel(20, 200), Some(Color::BLACK));
}

#[test]
fn second_down_without_up_does_not_join_strokes() {
    let mut pad = make_pad();
    pad.pointer_down(Point::new(10.0, 10.0));
    pad.pointer_move(Point::new(30.0, 10.0));
    pad.pointer_down(Point::new(10.0, 200.0));
    pad.pointer_move(Point::new(30.0, 200.0));
    assert!(pad.is_drawing());

    let r = raster(&pad);
    assert_eq!(r.pixel(20, 10), Some(Color::BLACK));
    assert_eq!(r.pixel(20, 200), Some(Color::BLACK));
    // Nothing between the end of the first stroke and either end of the second.
    assert_eq!(r.pixel(30, 100), Some(Color::TRANSPARENT));
    assert_eq!(r.pixel(10, 100), Some(Color::TRANSPARENT));
    assert_eq!(r.pixel(20, 105), Some(Color::TRANSPARENT));
}

#[test]
fn touch_strokes_land_under_the_finger() {
    let mut pad = make_pad();
    let origin = Point::new(200.0, 150.0);

    let down = InputEvent::from_touch_start(&[TouchPoint::new(210.0, 170.0)], origin).unwrap();
    let mv = InputEvent::from_touch_move(&[TouchPoint::new(260.0, 170.0)], origin).unwrap();
    pad.handle(&down);
    pad.handle(&mv);
    pad.handle(&InputEvent::from_touch_end());

    let r = raster(&pad);
    assert_eq!(r.pixel(30, 20), Some(Color::BLACK));
    assert_eq!(r.pixel(230, 170), Some(Color::TRANSPARENT));
    assert!(!pad.is_drawing());
}

#[test]
fn high_density_surface_scales_strokes() {
    init_logging();
    let config = SurfaceConfig::from_json(r#"{"sizing":{"kind":"viewport"}}"#).unwrap();
    let env = Environment {
        viewport_width: 200.0,
        viewport_height: 200.0,
        device_pixel_ratio: 2.0,
    };
    let geometry = config.resolve(&env).unwrap();
    let mut pad = SketchPad::mounted(Raster::from_geometry(&geometry).unwrap());

    draw(&mut pad, &[(10.0, 10.0), (100.0, 10.0)]);

    let r = raster(&pad);
    assert_eq!((r.width(), r.height()), (400, 240));
    // User-space (50, 10) is device (100, 20).
    assert_eq!(r.pixel(100, 20), Some(Color::BLACK));
    assert_eq!(r.pixel(50, 10), Some(Color::TRANSPARENT));
}

// ─── Clear ──────────────────────────────────────────────────────────────

#[test]
fn clear_erases_and_resets_background() {
    let mut pad = make_pad();
    pad.set_background_color("#336699");
    pad.set_font_weight("bold");
    draw(&mut pad, &[(5.0, 5.0), (300.0, 200.0), (590.0, 390.0)]);
    assert!(!raster(&pad).is_blank());

    assert!(pad.clear());

    assert_eq!(pad.view().background, BackgroundColor::WHITE);
    assert_eq!(pad.view().font_weight, FontWeight::Bold);

    let bg = pad.view().background.color();
    let r = raster(&pad);
    for y in (0..r.height()).step_by(7) {
        for x in (0..r.width()).step_by(7) {
            assert_eq!(r.composite_pixel(x, y, bg), Some(bg), "pixel ({x},{y})");
        }
    }
    assert!(r.is_blank());
}

#[test]
fn background_follows_last_input_until_clear() {
    let mut pad = make_pad();
    for value in ["#111111", "#abcdef", "#00ff00"] {
        pad.set_background_color(value);
        assert_eq!(pad.view().background.to_hex(), value);
    }

    draw(&mut pad, &[(1.0, 1.0), (9.0, 9.0)]);
    pad.set_font_weight("semibold");
    assert_eq!(pad.view().background.to_hex(), "#00ff00");

    pad.clear();
    assert_eq!(pad.view().background.to_hex(), "#ffffff");
}

// ─── Export ─────────────────────────────────────────────────────────────

#[test]
fn export_issues_one_png_download() {
    let mut pad = make_pad();
    pad.set_background_color("#ff0000");
    draw(&mut pad, &[(10.0, 10.0), (50.0, 50.0)]);

    let mut downloader = RecordingDownloader::default();
    assert!(pad.export(&mut downloader));
    assert_eq!(downloader.downloads.len(), 1);

    let artifact = &downloader.downloads[0];
    assert_eq!(artifact.file_name, DOWNLOAD_NAME);
    assert_eq!(DOWNLOAD_NAME, "canvas.png");
    assert!(artifact.data_url.starts_with(PNG_DATA_URL_PREFIX));

    // The image holds the stroke but not the CSS background.
    let bytes = general_purpose::STANDARD
        .decode(&artifact.data_url[PNG_DATA_URL_PREFIX.len()..])
        .unwrap();
    let decoder = png::Decoder::new(bytes.as_slice());
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    assert_eq!((info.width, info.height), (600, 400));

    let at = |x: usize, y: usize| {
        let i = (y * info.width as usize + x) * 4;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    };
    assert_eq!(at(30, 30), [0, 0, 0, 255]);
    assert_eq!(at(300, 300), [0, 0, 0, 0]);
}

#[test]
fn each_export_call_downloads_once() {
    let pad = make_pad();
    let mut downloader = RecordingDownloader::default();
    pad.export(&mut downloader);
    pad.export(&mut downloader);
    assert_eq!(downloader.downloads.len(), 2);
}

#[test]
fn export_without_surface_is_a_no_op() {
    init_logging();
    let pad: SketchPad<Raster> = SketchPad::new();
    let mut downloader = RecordingDownloader::default();
    assert!(!pad.export(&mut downloader));
    assert!(downloader.downloads.is_empty());
}

#[test]
fn export_reports_download_failure() {
    let pad = make_pad();
    assert!(!pad.export(&mut FailingDownloader));
}
