//! TerminalMount: the terminal back end behind the render boundary.

use std::io::{self, Write};

use tracing::debug;

use crate::core::{Assets, Mount, MountError, Scene};
use crate::fb::FrameBuffer;
use crate::renderer::TerminalRenderer;
use crate::scene_view::{SceneView, Viewport};

const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};

/// Draws each published scene as one full terminal frame.
///
/// The viewport follows the terminal size unless it was pinned with
/// [`TerminalMount::with_viewport`].
pub struct TerminalMount<W: Write = io::Stdout> {
    renderer: TerminalRenderer<W>,
    view: SceneView,
    fb: FrameBuffer,
    pinned: Option<Viewport>,
    last: Option<Scene>,
}

impl TerminalMount<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(TerminalRenderer::new())
    }
}

impl<W: Write> TerminalMount<W> {
    pub fn new(renderer: TerminalRenderer<W>) -> Self {
        Self {
            renderer,
            view: SceneView::default(),
            fb: FrameBuffer::new(0, 0),
            pinned: None,
            last: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.pinned = Some(viewport);
        self
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.renderer
    }

    /// The framebuffer of the most recent frame.
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn is_styled(&self) -> bool {
        self.view.is_styled()
    }

    /// Draw the last published scene again, e.g. after a terminal resize.
    pub fn redraw(&mut self) -> Result<(), MountError> {
        let Some(scene) = self.last.take() else {
            return Ok(());
        };
        let result = self.draw(&scene);
        self.last = Some(scene);
        result
    }

    fn viewport(&self) -> Viewport {
        self.pinned.unwrap_or_else(|| {
            crossterm::terminal::size()
                .map(|(w, h)| Viewport::new(w, h))
                .unwrap_or(FALLBACK_VIEWPORT)
        })
    }

    fn draw(&mut self, scene: &Scene) -> Result<(), MountError> {
        let viewport = self.viewport();
        self.view.render_into(scene, viewport, &mut self.fb);
        self.present()
    }

    fn present(&mut self) -> Result<(), MountError> {
        self.renderer
            .present(&self.fb)
            .map_err(|e| MountError::Unavailable(format!("terminal write failed: {e:#}")))
    }
}

impl<W: Write> Mount for TerminalMount<W> {
    fn install(&mut self, assets: &Assets) -> Result<(), MountError> {
        self.view = self.view.with_styled(assets.stylesheet.is_some());
        self.last = None;

        let text = assets.layout.as_deref().map(markup_text).unwrap_or_default();
        debug!(styled = self.view.is_styled(), "terminal mount installed");
        let viewport = self.viewport();
        self.view.render_text_into(&text, viewport, &mut self.fb);
        self.present()
    }

    fn replace(&mut self, scene: &Scene) -> Result<(), MountError> {
        self.draw(scene)?;
        self.last = Some(scene.clone());
        Ok(())
    }
}

/// Visible text of a markup document: tags removed, `<style>` and
/// `<script>` bodies skipped, the common entities decoded.
pub fn markup_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            rest = "";
            break;
        };
        let tag = after[..close].trim().to_ascii_lowercase();
        rest = &after[close + 1..];

        for raw in ["style", "script"] {
            if tag == raw || tag.starts_with(&format!("{raw} ")) {
                let end = format!("</{raw}>");
                rest = match rest.to_ascii_lowercase().find(&end) {
                    Some(i) => &rest[i + end.len()..],
                    None => "",
                };
            }
        }
        if matches!(tag.trim_start_matches('/'), "br" | "p" | "div" | "h1" | "h2" | "h3") {
            out.push('\n');
        }
    }
    out.push_str(rest);

    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compose;
    use crate::core::types::{Player, Settings, Snapshot};

    fn mount() -> TerminalMount<Vec<u8>> {
        TerminalMount::new(TerminalRenderer::with_writer(Vec::new()))
            .with_viewport(Viewport::new(82, 22))
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            settings: Settings {
                width: 80.0,
                height: 40.0,
            },
            players: vec![Player::new("p1", "Ann")
                .at(40.0, 20.0, 10.0)
                .with_color("#f00")],
            fruits: Vec::new(),
        }
    }

    #[test]
    fn strips_markup_to_visible_text() {
        let html = "<html><head><style>body { color: red; }</style></head>\
                    <body><h1>Arena</h1><p>Waiting &amp; watching</p></body></html>";
        let text = markup_text(html);
        assert!(text.contains("Arena"));
        assert!(text.contains("Waiting & watching"));
        assert!(!text.contains("color"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn install_shows_layout_text() {
        let mut m = mount();
        let assets = Assets {
            stylesheet: Some("body {}".into()),
            layout: Some("<div>Waiting for ticks</div>".into()),
        };
        m.install(&assets).unwrap();
        assert!(m.is_styled());
        assert!(m.framebuffer().text().contains("Waiting for ticks"));
    }

    #[test]
    fn missing_stylesheet_renders_unstyled() {
        let mut m = mount();
        m.install(&Assets::default()).unwrap();
        assert!(!m.is_styled());

        m.replace(&compose(&snapshot())).unwrap();
        let plain = crate::fb::CellStyle::default();
        assert!(m
            .framebuffer()
            .cells()
            .iter()
            .all(|c| c.style.fg == plain.fg && c.style.bg == plain.bg));
    }

    #[test]
    fn replace_draws_a_full_frame_and_keeps_it_for_redraw() {
        let mut m = mount();
        m.install(&Assets::default()).unwrap();
        m.replace(&compose(&snapshot())).unwrap();

        let first = m.framebuffer().clone();
        assert_eq!(first.width(), 82);
        assert_eq!(first.height(), 22);
        assert!(first.text().contains("Ann"));

        m.redraw().unwrap();
        assert_eq!(m.framebuffer(), &first);
    }
}
