use crate::app::radar::RadarScan;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::Frame;

/// Sweep display shown while the mesh pulses the local area. Dots are the
/// transient echoes accumulated by the scan; `animation` drives the sweep arm.
pub fn render_sweep(f: &mut Frame<'_>, area: Rect, scan: Option<&RadarScan>, animation: f64) {
    if area.width < 8 || area.height < 6 {
        return;
    }

    let size = area.width.min(area.height);
    let square = Rect {
        x: area.x + (area.width - size) / 2,
        y: area.y + (area.height - size) / 2,
        width: size,
        height: size,
    };

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                let width = f64::from(square.width);
                let height = f64::from(square.height);
                let center_x = width / 2.0;
                let center_y = height / 2.0;
                let max_radius = width.min(height) / 2.0 * 0.9;

                for i in 1..=3 {
                    let ring_radius = max_radius * (f64::from(i) / 3.0);
                    ctx.draw(&Circle {
                        x: center_x,
                        y: center_y,
                        radius: ring_radius,
                        color: Color::DarkGray,
                    });
                }

                ctx.draw(&CanvasLine {
                    x1: center_x,
                    y1: center_y - max_radius,
                    x2: center_x,
                    y2: center_y + max_radius,
                    color: Color::DarkGray,
                });
                ctx.draw(&CanvasLine {
                    x1: center_x - max_radius,
                    y1: center_y,
                    x2: center_x + max_radius,
                    y2: center_y,
                    color: Color::DarkGray,
                });

                let pulse = (animation * 0.8).sin().mul_add(0.5, 0.5);
                ctx.draw(&Circle {
                    x: center_x,
                    y: center_y,
                    radius: max_radius * (0.3 + pulse * 0.6),
                    color: Color::Rgb(0, 80, 0),
                });

                if let Some(scan) = scan {
                    for dot in &scan.dots {
                        // Dot coordinates are percentages of the dish, top-left
                        // origin, so the y axis flips when mapped onto canvas
                        // space.
                        let dx = (dot.x / 100.0).mul_add(2.0, -1.0);
                        let dy = (dot.y / 100.0).mul_add(-2.0, 1.0);
                        ctx.draw(&Circle {
                            x: dx.mul_add(max_radius, center_x),
                            y: dy.mul_add(max_radius, center_y),
                            radius: max_radius * 0.04,
                            color: Color::LightGreen,
                        });
                    }
                }

                let sweep_angle = animation * 1.4;
                let sweep_x = sweep_angle.cos().mul_add(max_radius, center_x);
                let sweep_y = sweep_angle.sin().mul_add(max_radius, center_y);
                ctx.draw(&CanvasLine {
                    x1: center_x,
                    y1: center_y,
                    x2: sweep_x,
                    y2: sweep_y,
                    color: Color::LightGreen,
                });

                let ghost_angle = sweep_angle + (std::f64::consts::PI / 20.0);
                let ghost_x = ghost_angle.cos().mul_add(max_radius * 0.92, center_x);
                let ghost_y = ghost_angle.sin().mul_add(max_radius * 0.92, center_y);
                ctx.draw(&CanvasLine {
                    x1: center_x,
                    y1: center_y,
                    x2: ghost_x,
                    y2: ghost_y,
                    color: Color::Green,
                });

                ctx.draw(&Circle {
                    x: center_x,
                    y: center_y,
                    radius: max_radius * 0.06,
                    color: Color::LightGreen,
                });
            })
            .x_bounds([0.0, f64::from(square.width)])
            .y_bounds([0.0, f64::from(square.height)]),
        square,
    );
}
