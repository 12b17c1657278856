//! Booth polygons drawn on a ratatui canvas.
//!
//! The same painter serves the interactive map and print snapshots.

use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Context, Line, Rectangle};
use ratatui::widgets::Block;

use crate::models::{MapPoint, Stand};
use crate::services::geometry::vertex_centroid;
use crate::tui::theme::Theme;
use crate::view::{ImageOverlay, MapViewport};

/// Minimum on-screen width, in columns, for a stand to get its label drawn.
const LABEL_MIN_COLUMNS: f64 = 6.0;

/// What to draw.
#[derive(Debug, Clone, Copy)]
pub struct MapScene<'a> {
    pub stands: &'a [Stand],
    pub overlay: Option<&'a ImageOverlay>,
    pub favorites: &'a [String],
    pub selected: Option<&'a str>,
    pub favorites_only: bool,
}

impl MapScene<'_> {
    fn is_favorite(&self, stand: &Stand) -> bool {
        self.favorites.iter().any(|f| *f == stand.label)
    }

    fn is_selected(&self, stand: &Stand) -> bool {
        self.selected == Some(stand.label.as_str())
    }
}

fn draw_outline(ctx: &mut Context<'_>, points: &[MapPoint], color: Color) {
    let Some(first) = points.first() else {
        return;
    };
    for pair in points.windows(2) {
        ctx.draw(&Line {
            x1: pair[0].lng,
            y1: pair[0].lat,
            x2: pair[1].lng,
            y2: pair[1].lat,
            color,
        });
    }
    if let Some(last) = points.last() {
        ctx.draw(&Line {
            x1: last.lng,
            y1: last.lat,
            x2: first.lng,
            y2: first.lat,
            color,
        });
    }
}

/// Paints `scene` in the coordinate system of `viewport`.
pub fn paint(ctx: &mut Context<'_>, scene: &MapScene<'_>, viewport: &MapViewport, theme: &Theme) {
    if let Some(overlay) = scene.overlay {
        let b = overlay.bounds;
        ctx.draw(&Rectangle {
            x: b.south_west.lng,
            y: b.south_west.lat,
            width: b.width(),
            height: b.height(),
            color: theme.hall_frame,
        });
    }
    ctx.layer();

    // Selected stand last so its outline stays on top
    let mut selected = None;
    for stand in scene.stands {
        let favorite = scene.is_favorite(stand);
        if scene.is_selected(stand) {
            selected = Some((stand, favorite));
            continue;
        }
        if scene.favorites_only && !favorite {
            continue;
        }
        let color = if favorite { theme.favorite } else { theme.booth };
        draw_outline(ctx, &stand.points, color);
    }
    if let Some((stand, _)) = selected {
        draw_outline(ctx, &stand.points, theme.accent);
    }
    ctx.layer();

    let units_per_column = viewport.units_per_column();
    for stand in scene.stands {
        let favorite = scene.is_favorite(stand);
        let chosen = scene.is_selected(stand);
        if scene.favorites_only && !favorite && !chosen {
            continue;
        }
        let Ok(center) = vertex_centroid(&stand.points) else {
            continue;
        };
        let wide_enough = stand
            .bounds()
            .is_some_and(|b| b.width() / units_per_column >= LABEL_MIN_COLUMNS);
        if favorite {
            ctx.print(center.lng, center.lat, ratatui::text::Span::styled(
                if wide_enough { format!("★{}", short_label(&stand.label)) } else { "★".to_string() },
                theme.favorite,
            ));
        } else if wide_enough || chosen {
            let color = if chosen { theme.accent } else { theme.text_secondary };
            ctx.print(
                center.lng,
                center.lat,
                ratatui::text::Span::styled(short_label(&stand.label).to_string(), color),
            );
        }
    }
}

/// Label without its hall prefix (`1.E211` → `E211`).
fn short_label(label: &str) -> &str {
    label.rsplit('.').next().unwrap_or(label)
}

/// Canvas widget showing `scene` through `viewport`.
pub fn map_canvas<'a>(
    scene: MapScene<'a>,
    viewport: &'a MapViewport,
    theme: &'a Theme,
    marker: Marker,
    block: Option<Block<'a>>,
) -> Canvas<'a, impl Fn(&mut Context<'_>) + 'a> {
    let visible = viewport.visible_bounds();
    let canvas = Canvas::default()
        .marker(marker)
        .background_color(theme.background)
        .x_bounds([visible.south_west.lng, visible.north_east.lng])
        .y_bounds([visible.south_west.lat, visible.north_east.lat])
        .paint(move |ctx| paint(ctx, &scene, viewport, theme));
    match block {
        Some(block) => canvas.block(block),
        None => canvas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExhibitorInfo, MapBounds};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::widgets::Widget;
    use std::path::PathBuf;

    fn stand(label: &str, x: f64, y: f64, w: f64, h: f64) -> Stand {
        let points = vec![
            MapPoint::from_raster(x, y),
            MapPoint::from_raster(x + w, y),
            MapPoint::from_raster(x + w, y + h),
            MapPoint::from_raster(x, y + h),
        ];
        Stand {
            label: label.to_string(),
            points,
            info: ExhibitorInfo::default(),
        }
    }

    fn render(scene: MapScene<'_>, viewport: &MapViewport) -> String {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, viewport.size().0, viewport.size().1);
        let mut buffer = Buffer::empty(area);
        map_canvas(scene, viewport, &theme, Marker::Braille, None).render(area, &mut buffer);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_labels_and_favorites_are_printed() {
        let stands = vec![stand("1.A1", 0.0, 0.0, 200.0, 100.0), stand("1.B2", 300.0, 0.0, 200.0, 100.0)];
        let favorites = vec!["1.B2".to_string()];
        let overlay = ImageOverlay {
            path: PathBuf::from("hall.png"),
            bounds: MapBounds::for_raster(500.0, 100.0),
        };
        let mut viewport = MapViewport::new(60, 10);
        viewport.fit_bounds(&overlay.bounds);

        let text = render(
            MapScene {
                stands: &stands,
                overlay: Some(&overlay),
                favorites: &favorites,
                selected: None,
                favorites_only: false,
            },
            &viewport,
        );
        assert!(text.contains("A1"));
        assert!(text.contains("★B2"));
    }

    #[test]
    fn test_favorites_only_hides_others() {
        let stands = vec![stand("1.A1", 0.0, 0.0, 200.0, 100.0), stand("1.B2", 300.0, 0.0, 200.0, 100.0)];
        let favorites = vec!["1.B2".to_string()];
        let mut viewport = MapViewport::new(60, 10);
        viewport.fit_bounds(&MapBounds::for_raster(500.0, 100.0));

        let text = render(
            MapScene {
                stands: &stands,
                overlay: None,
                favorites: &favorites,
                selected: None,
                favorites_only: true,
            },
            &viewport,
        );
        assert!(!text.contains("A1"));
        assert!(text.contains("B2"));
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("1.E211"), "E211");
        assert_eq!(short_label("E211"), "E211");
    }
}
