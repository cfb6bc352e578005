//! Scene composer: one snapshot in, one scene out.

use crate::layout::{extent, label_anchor, place};
use crate::scene::{Element, ElementKind, Frame, Label, Scene, Stroke};
use crate::style::{fruit_style, label_font_size, player_style};
use crate::types::{Color, Fruit, Player, Settings, Snapshot};

/// Space around the bordered board.
pub const FRAME_PADDING: f64 = 30.0;
pub const FRAME_BORDER_WIDTH: f64 = 1.0;
pub const FRAME_BORDER_COLOR: &str = "#333";
pub const FRAME_BACKGROUND: &str = "black";
pub const FRAME_FOREGROUND: &str = "white";

/// Build the scene for `snapshot`: frame, players in order, fruits in order.
///
/// Pure and deterministic. Equal snapshots give equal scenes.
pub fn compose(snapshot: &Snapshot) -> Scene {
    let mut elements = Vec::with_capacity(snapshot.players.len() + snapshot.fruits.len());
    elements.extend(snapshot.players.iter().map(player_element));
    elements.extend(snapshot.fruits.iter().map(fruit_element));

    Scene {
        frame: frame(&snapshot.settings),
        elements,
    }
}

pub fn frame(settings: &Settings) -> Frame {
    Frame {
        width: extent(settings.width),
        height: extent(settings.height),
        padding: FRAME_PADDING,
        border: Stroke::new(FRAME_BORDER_WIDTH, FRAME_BORDER_COLOR),
        background: Color::new(FRAME_BACKGROUND),
        foreground: Color::new(FRAME_FOREGROUND),
    }
}

pub fn player_element(player: &Player) -> Element {
    let bounds = place(player.pos_x, player.pos_y, player.size);
    let style = player_style(player);
    Element {
        kind: ElementKind::Player,
        key: player.pid.clone(),
        bounds,
        shape: style.base,
        effects: style.effects,
        label: Some(Label {
            text: player.name.clone(),
            anchor: label_anchor(&bounds),
            font_size: label_font_size(player.size),
        }),
    }
}

pub fn fruit_element(fruit: &Fruit) -> Element {
    let style = fruit_style(fruit);
    Element {
        kind: ElementKind::Fruit,
        key: fruit_key(fruit),
        bounds: place(fruit.pos_x, fruit.pos_y, fruit.size),
        shape: style.base,
        effects: style.effects,
        label: None,
    }
}

/// Position-derived key; distinct within one render pass only.
pub fn fruit_key(fruit: &Fruit) -> String {
    format!("fruit-{}-{}", fruit.pos_x, fruit.pos_y)
}
