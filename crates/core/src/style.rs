//! Style rule engine.
//!
//! Each rule is a pure predicate-to-directive function. Rules never see each
//! other's output; [`player_style`] and [`fruit_style`] concatenate whatever
//! fires, in the order the rule tables list them.
//!
//! All glow parameters scale with the entity's `size`.

use arrayvec::ArrayVec;

use crate::layout::extent;
use crate::scene::{BaseShape, Effect, Glow, GlowKind, ShadowLayer, Stroke, MAX_EFFECTS};
use crate::types::{Color, Fruit, FruitKind, Player, PlayerStatus};

/// Border color of every fruit.
pub const FRUIT_BORDER_COLOR: &str = "gold";
/// Border width of every fruit, independent of size.
pub const FRUIT_BORDER_WIDTH: f64 = 4.0;
/// Flat outline drawn around fleeing players.
pub const FLEEING_OUTLINE_WIDTH: f64 = 2.0;
pub const FLEEING_OUTLINE_COLOR: &str = "grey";
/// Used when a player arrives without a usable color.
pub const DEFAULT_PLAYER_COLOR: &str = "white";

/// Base shape plus composed effect directives for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub base: BaseShape,
    pub effects: ArrayVec<Effect, MAX_EFFECTS>,
}

type PlayerRule = fn(&Player) -> Option<Effect>;

/// Status rules first, then the power rule.
const PLAYER_RULES: [PlayerRule; MAX_EFFECTS] = [digesting_glow, fleeing_outline, powered_glow];

pub fn player_style(player: &Player) -> Style {
    let color = if player.color.as_str().trim().is_empty() {
        Color::new(DEFAULT_PLAYER_COLOR)
    } else {
        player.color.clone()
    };

    Style {
        base: BaseShape {
            border: Stroke::new(extent(player.size) / 5.0, color),
        },
        effects: PLAYER_RULES.iter().filter_map(|rule| rule(player)).collect(),
    }
}

pub fn fruit_style(fruit: &Fruit) -> Style {
    Style {
        base: BaseShape {
            border: Stroke::new(FRUIT_BORDER_WIDTH, FRUIT_BORDER_COLOR),
        },
        effects: power_up_glow(fruit).into_iter().collect(),
    }
}

/// Label font size for a player of the given size.
pub fn label_font_size(size: f64) -> f64 {
    2.0 * (extent(size) / 3.0)
}

/// Blinks with the status timer: on for even ticks, off for odd ones.
pub fn digesting_glow(player: &Player) -> Option<Effect> {
    if player.status != PlayerStatus::Digesting || player.status_timer % 2 != 0 {
        return None;
    }
    let s = extent(player.size);
    Some(glow(
        GlowKind::Digesting,
        [
            ShadowLayer::outset(s / 2.0, s / 3.0, "#fff"),
            ShadowLayer::outset(s / 1.5, s / 2.0, "#ff0"),
            ShadowLayer::outset(s, s, "#f0f"),
        ],
    ))
}

pub fn fleeing_outline(player: &Player) -> Option<Effect> {
    (player.status == PlayerStatus::Fleeing)
        .then(|| Effect::Outline(Stroke::new(FLEEING_OUTLINE_WIDTH, FLEEING_OUTLINE_COLOR)))
}

pub fn powered_glow(player: &Player) -> Option<Effect> {
    if player.powered.is_nan() || player.powered <= 0.0 {
        return None;
    }
    let s = extent(player.size);
    Some(glow(
        GlowKind::Powered,
        [
            ShadowLayer::outset(s / 5.0, s / 6.0, "#fff"),
            ShadowLayer::outset(s / 3.0, s / 5.0, "#f0f"),
            ShadowLayer::outset(s / 2.15, s / 3.5, "#0ff"),
        ],
    ))
}

/// Three inset rings and three outset rings.
pub fn power_up_glow(fruit: &Fruit) -> Option<Effect> {
    if fruit.kind != FruitKind::PowerUp {
        return None;
    }
    let s = extent(fruit.size);
    Some(glow(
        GlowKind::PowerUp,
        [
            ShadowLayer::inset(0.0, s / 6.0, "#fff"),
            ShadowLayer::inset(s / 15.0, s / 3.75, "#f0f"),
            ShadowLayer::inset(-s / 15.0, s / 3.75, "#0ff"),
            ShadowLayer::outset(s / 6.0, 0.0, "#fff"),
            ShadowLayer::outset(s / 3.75, 0.0, "#f0f").shifted(-s / 30.0),
            ShadowLayer::outset(s / 3.75, 0.0, "#0ff").shifted(s / 30.0),
        ],
    ))
}

fn glow<const N: usize>(kind: GlowKind, layers: [ShadowLayer; N]) -> Effect {
    Effect::Glow(Glow {
        kind,
        layers: layers.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(status: PlayerStatus, timer: u64, powered: f64) -> Player {
        Player::new("p1", "Ann")
            .at(100.0, 100.0, 40.0)
            .with_color("#f00")
            .with_status(status, timer)
            .with_powered(powered)
    }

    #[test]
    fn normal_player_has_only_base_border() {
        let style = player_style(&player(PlayerStatus::Normal, 0, 0.0));
        assert!(style.effects.is_empty());
        assert_eq!(style.base.border, Stroke::new(8.0, "#f00"));
    }

    #[test]
    fn digesting_blinks_on_even_ticks() {
        for timer in [0, 2, 100] {
            let style = player_style(&player(PlayerStatus::Digesting, timer, 0.0));
            assert_eq!(style.effects.len(), 1, "timer {timer}");
        }
        for timer in [1, 3, 101] {
            let style = player_style(&player(PlayerStatus::Digesting, timer, 0.0));
            assert!(style.effects.is_empty(), "timer {timer}");
        }
    }

    #[test]
    fn digesting_glow_scales_with_size() {
        let Some(Effect::Glow(g)) = digesting_glow(&player(PlayerStatus::Digesting, 0, 0.0)) else {
            panic!("expected a glow");
        };
        assert_eq!(g.kind, GlowKind::Digesting);
        let params: Vec<(f64, f64, &str)> = g
            .layers
            .iter()
            .map(|l| (l.blur, l.spread, l.color.as_str()))
            .collect();
        assert_eq!(
            params,
            vec![
                (20.0, 40.0 / 3.0, "#fff"),
                (40.0 / 1.5, 20.0, "#ff0"),
                (40.0, 40.0, "#f0f")
            ]
        );
    }

    #[test]
    fn fleeing_replaces_border_without_glow() {
        let style = player_style(&player(PlayerStatus::Fleeing, 0, 0.0));
        assert_eq!(
            style.effects.as_slice(),
            &[Effect::Outline(Stroke::new(2.0, "grey"))]
        );
    }

    #[test]
    fn status_effect_precedes_powered_glow() {
        let style = player_style(&player(PlayerStatus::Digesting, 4, 2.0));
        let kinds: Vec<GlowKind> = style
            .effects
            .iter()
            .filter_map(Effect::as_glow)
            .map(|g| g.kind)
            .collect();
        assert_eq!(kinds, vec![GlowKind::Digesting, GlowKind::Powered]);

        let style = player_style(&player(PlayerStatus::Fleeing, 0, 2.0));
        assert!(matches!(style.effects[0], Effect::Outline(_)));
        assert!(matches!(&style.effects[1], Effect::Glow(g) if g.kind == GlowKind::Powered));
    }

    #[test]
    fn powered_glow_has_three_layers() {
        let Some(Effect::Glow(g)) = powered_glow(&player(PlayerStatus::Normal, 0, 1.0)) else {
            panic!("expected a glow");
        };
        assert_eq!(g.layers.len(), 3);
        assert_eq!(g.layers[0].blur, 8.0);
        assert_eq!(g.layers[2].color.as_str(), "#0ff");
        assert!(powered_glow(&player(PlayerStatus::Normal, 0, 0.0)).is_none());
        assert!(powered_glow(&player(PlayerStatus::Normal, 0, f64::NAN)).is_none());
    }

    #[test]
    fn unknown_status_is_base_only() {
        let status = PlayerStatus::Unknown("frozen".to_string());
        let style = player_style(&player(status, 0, 0.0));
        assert!(style.effects.is_empty());
    }

    #[test]
    fn missing_color_falls_back_to_white() {
        let style = player_style(&Player::new("x", "").at(0.0, 0.0, 10.0));
        assert_eq!(style.base.border.color.as_str(), DEFAULT_PLAYER_COLOR);
    }

    #[test]
    fn power_up_fruit_glows_with_six_layers() {
        let fruit = Fruit::new(50.0, 50.0, 30.0, FruitKind::PowerUp);
        let style = fruit_style(&fruit);
        let Effect::Glow(g) = &style.effects[0] else {
            panic!("expected a glow");
        };
        assert_eq!(g.layers.len(), 6);
        assert_eq!(g.layers.iter().filter(|l| l.inset).count(), 3);
        assert_eq!(g.layers[1].offset_x, 2.0);
        assert_eq!(g.layers[4].offset_x, -1.0);
        assert_eq!(style.base.border, Stroke::new(4.0, "gold"));
    }

    #[test]
    fn other_fruits_have_no_effect() {
        for kind in [FruitKind::Normal, FruitKind::Unknown("golden".into())] {
            let style = fruit_style(&Fruit::new(0.0, 0.0, 20.0, kind));
            assert!(style.effects.is_empty());
        }
    }
}
