use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};

use arena_view::adapter::decode_line;
use arena_view::engine::resources::{LAYOUT, STYLESHEET};
use arena_view::engine::{Boundary, FsResources, InlineResources, JsonMount, Outcome};
use arena_view::html::HtmlMount;
use arena_view::term::{TerminalMount, TerminalRenderer, Viewport};
use arena_view::types::BOARD_TICK;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("arena-view-{tag}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn tick_line(name: &str, powered: u32) -> String {
    json!({
        "event": "board_tick",
        "payload": {
            "settings": {"width": 80, "height": 40},
            "players": [{
                "pid": "p1", "name": name, "color": "#f00",
                "pos_x": 40, "pos_y": 20, "size": 10,
                "powered": powered, "status": "normal", "status_timer": 0
            }],
            "fruits": [{"pos_x": 10, "pos_y": 10, "size": 6, "type": "power_up"}]
        }
    })
    .to_string()
}

fn deliver<M: arena_view::core::Mount>(boundary: &mut Boundary<M>, line: &str) -> Outcome {
    let envelope = decode_line(line).unwrap();
    boundary.handle_event(&envelope.event, &envelope.payload)
}

#[test]
fn html_page_tracks_latest_tick_and_escapes_names() {
    let dir = scratch_dir("html");
    let res = InlineResources::new()
        .with(STYLESHEET, ".player { cursor: default }")
        .with(LAYOUT, "<p>waiting</p>");
    let out = dir.join("arena.html");
    let mut boundary = Boundary::new(HtmlMount::new(&out), &res);
    assert!(fs::read_to_string(&out).unwrap().contains("<p>waiting</p>"));

    assert_eq!(
        deliver(&mut boundary, &tick_line("<b>Ann</b>", 0)),
        Outcome::Rendered { generation: 1 }
    );
    let page = fs::read_to_string(&out).unwrap();
    assert!(page.contains(".player { cursor: default }"));
    assert!(page.contains("&lt;b&gt;Ann&lt;/b&gt;"));
    assert!(page.contains("id=\"fruit-10-10\""));
    assert!(!page.contains("waiting"));

    deliver(&mut boundary, &tick_line("Bob", 1));
    let page = fs::read_to_string(&out).unwrap();
    assert!(page.contains(">Bob</span>"));
    assert!(!page.contains("Ann"));
    fs::remove_dir_all(dir).ok();
}

#[test]
fn terminal_frame_shows_board_and_label() {
    let res = InlineResources::new().with(STYLESHEET, "").with(LAYOUT, "<h1>Arena</h1>");
    let mount = TerminalMount::new(TerminalRenderer::with_writer(Vec::new()))
        .with_viewport(Viewport::new(82, 22));
    let mut boundary = Boundary::new(mount, &res);
    assert!(boundary.mount().framebuffer().text().contains("Arena"));

    deliver(&mut boundary, &tick_line("Ann", 1));
    let fb = boundary.mount().framebuffer();
    let text = fb.text();

    // 80x40 board in 80x20 content cells plus border.
    assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('┌'));
    assert_eq!(fb.get(81, 21).map(|c| c.ch), Some('┘'));
    assert!(text.contains("Ann"));
    assert!(text.contains('█'));
    assert!(text.contains('░'));
    assert!(!text.contains("Arena"));
}

#[test]
fn json_mount_emits_one_scene_per_tick() {
    let mut boundary = Boundary::new(JsonMount::new(Vec::new()), &InlineResources::new());
    deliver(&mut boundary, &tick_line("Ann", 0));
    deliver(&mut boundary, r#"{"event":"chat","payload":{"text":"hi"}}"#);
    assert_eq!(boundary.handle_event(BOARD_TICK, &json!([1, 2])), Outcome::Skipped);
    deliver(&mut boundary, &tick_line("Bob", 0));

    let out = String::from_utf8(boundary.into_mount().into_inner()).unwrap();
    let scenes: Vec<Value> = out.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0]["elements"][0]["label"]["text"], "Ann");
    assert_eq!(scenes[1]["elements"][0]["label"]["text"], "Bob");
    assert_eq!(scenes[1]["elements"][1]["effects"][0]["effect"], "glow");
}

#[test]
fn bundled_assets_load_from_disk() {
    let res = FsResources::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"));
    let boundary = Boundary::new(JsonMount::new(Vec::new()), &res);
    assert!(!boundary.assets().is_degraded());
    assert!(boundary.assets().layout.as_deref().unwrap_or("").contains("Waiting"));
}
