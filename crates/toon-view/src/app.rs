//! eframe application drawing one image per viewport.

use egui::{Color32, ColorImage, TextureHandle, TextureOptions, ViewportBuilder, ViewportId};
use toon_core::RgbImage;

use crate::{fit_size, window_size, Pane};

/// A pane whose image has been uploaded as a texture.
struct LoadedPane {
    title: String,
    texture: TextureHandle,
    initial_size: [f32; 2],
}

/// Preview application: the first pane is drawn in the root viewport, the
/// rest in immediate child viewports.
pub struct PreviewApp {
    panes: Vec<LoadedPane>,
}

impl PreviewApp {
    /// Uploads every pane's image as a texture.
    pub fn new(ctx: &egui::Context, panes: Vec<Pane>, max_window_size: [f32; 2]) -> Self {
        let panes = panes
            .into_iter()
            .enumerate()
            .map(|(i, pane)| LoadedPane {
                initial_size: window_size(pane.image.dimensions(), max_window_size),
                texture: ctx.load_texture(
                    format!("toon_pane_{}", i),
                    to_color_image(&pane.image),
                    TextureOptions::LINEAR,
                ),
                title: pane.title,
            })
            .collect();
        Self { panes }
    }
}

/// Converts an RGB buffer to an egui image.
pub(crate) fn to_color_image(image: &RgbImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgb(size, image.data())
}

/// True when the current viewport saw a key press or a close request.
fn dismiss_requested(ctx: &egui::Context) -> bool {
    ctx.input(|i| {
        i.viewport().close_requested()
            || i.events
                .iter()
                .any(|e| matches!(e, egui::Event::Key { pressed: true, .. }))
    })
}

fn draw_texture(ctx: &egui::Context, texture: &TextureHandle) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(Color32::BLACK))
        .show(ctx, |ui| {
            let available = ui.available_size();
            let [w, h] = fit_size(texture.size_vec2().into(), available.into());
            let (rect, _) = ui.allocate_exact_size(available, egui::Sense::hover());
            let image_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(w, h));
            ui.painter().image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        });
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Some((root, children)) = self.panes.split_first() else {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        };

        draw_texture(ctx, &root.texture);
        let mut dismiss = dismiss_requested(ctx);

        for (i, pane) in children.iter().enumerate() {
            let builder = ViewportBuilder::default()
                .with_title(&pane.title)
                .with_inner_size(pane.initial_size);
            let closed = ctx.show_viewport_immediate(
                ViewportId::from_hash_of(("toon_pane", i)),
                builder,
                |ctx, _class| {
                    draw_texture(ctx, &pane.texture);
                    dismiss_requested(ctx)
                },
            );
            dismiss |= closed;
        }

        if dismiss {
            ctx.send_viewport_cmd_to(ViewportId::ROOT, egui::ViewportCommand::Close);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_image_matches_buffer() {
        let image = RgbImage::from_fn(3, 2, |x, y| [x as u8 * 50, y as u8 * 100, 7]);
        let color = to_color_image(&image);
        assert_eq!(color.size, [3, 2]);
        assert_eq!(color.pixels[4], Color32::from_rgb(50, 100, 7));
    }

    #[test]
    fn app_loads_one_texture_per_pane() {
        let ctx = egui::Context::default();
        let app = PreviewApp::new(
            &ctx,
            vec![
                Pane::new("a", RgbImage::new(4, 4)),
                Pane::new("b", RgbImage::new(8, 2)),
            ],
            [100.0, 100.0],
        );
        assert_eq!(app.panes.len(), 2);
        assert_eq!(app.panes[1].texture.size(), [8, 2]);
        assert_eq!(app.panes[1].title, "b");
    }
}
