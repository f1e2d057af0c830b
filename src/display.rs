use crossterm::terminal;
use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
const DISPLAY_BYTES: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT / 8;

/// The 64x32 one-bit framebuffer. Owned by the interpreter and mutated only
/// through `clear` and the XOR blit; renderers just read the packed
/// snapshot. Bits are row-major, most significant bit leftmost, same layout
/// the COSMAC kept in its display page.
pub struct Framebuffer {
    bits: [u8; DISPLAY_BYTES],
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            bits: [0; DISPLAY_BYTES],
        }
    }

    pub fn clear(&mut self) {
        self.bits = [0; DISPLAY_BYTES];
    }

    /// XOR one sprite onto the grid. The origin wraps modulo the screen
    /// dimensions; pixels that then fall off the right or bottom edge are
    /// clipped, not wrapped. Returns true if any pixel flipped from set to
    /// unset (the collision flag).
    pub fn blit_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let ox = x as usize % DISPLAY_WIDTH;
        let oy = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;
        for (i, row) in rows.iter().enumerate() {
            let py = oy + i;
            if py >= DISPLAY_HEIGHT {
                break;
            }
            for j in 0..8 {
                if (row >> (7 - j)) & 1 == 0 {
                    continue;
                }
                let px = ox + j;
                if px >= DISPLAY_WIDTH {
                    continue;
                }
                collision |= self.xor_pixel(px, py);
            }
        }
        collision
    }

    /// flip one pixel; true if it was set before the flip
    fn xor_pixel(&mut self, x: usize, y: usize) -> bool {
        let index = y * DISPLAY_WIDTH + x;
        let mask = 0x80 >> (index % 8);
        let was_set = self.bits[index / 8] & mask != 0;
        self.bits[index / 8] ^= mask;
        was_set
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let index = y * DISPLAY_WIDTH + x;
        self.bits[index / 8] & (0x80 >> (index % 8)) != 0
    }

    /// packed snapshot for a renderer
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn is_blank(&self) -> bool {
        self.bits.iter().all(|b| *b == 0)
    }
}

/// Display is used by the driver to put the framebuffer on a screen. It
/// abstracts the implementation details so a variety of kinds of screen
/// would work.
pub trait Display {
    /// draw a packed-bit snapshot at the display's internal resolution
    fn draw(&mut self, data: &[u8]) -> Result<(), io::Error>;

    /// how big the display data should be
    fn get_display_size_bytes(&mut self) -> usize;
}

// store useful metadata about the terminal
struct Resolution(usize, usize);

impl Resolution {
    fn pixel_count(&self) -> usize {
        self.0 * self.1
    }
    fn byte_count(&self) -> usize {
        self.0 * self.1 / 8
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    fn bitplane_from_data<'a>(
        &self,
        data: &'a [u8],
        bitplane: u8,
    ) -> impl std::iter::Iterator<Item = (f64, f64)> + 'a {
        let mut count = self.pixel_count();
        let w = self.0;
        std::iter::from_fn(move || {
            while count > 0 {
                count -= 1;
                let bit = 1 & (data[count / 8] >> (7 - count % 8));
                if bit == bitplane {
                    return Some((
                        (count % w) as f64,        // x
                        -1.0 * (count / w) as f64, // y
                    ));
                }
            }
            None
        })
    }
}

/// monochrome display in a terminal, rendered using TUI and crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
}

impl MonoTermDisplay {
    pub fn new(x: usize, y: usize) -> Result<MonoTermDisplay, io::Error> {
        terminal::enable_raw_mode()?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(x, y),
        })
    }
}

impl Drop for MonoTermDisplay {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, data: &[u8]) -> Result<(), io::Error> {
        // make sure we're given exactly the right amount of data to draw
        assert_eq!(
            data.len(),
            self.resolution.byte_count(),
            "MonoTermDisplay must have correct-sized data to draw"
        );

        // for now this assumes a 1:1 ratio between terminal, chip8 and the
        // internal TUI canvas
        self.terminal.draw(|f| {
            let size = Rect::new(
                0,
                0,
                2 + self.resolution.0 as u16,
                2 + self.resolution.1 as u16,
            );

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(self.resolution.x_bounds())
                .y_bounds(self.resolution.y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    // expand each bitplane into x, y float coords, suitable
                    // for rendering with TUI
                    ctx.draw(&Points {
                        coords: &self
                            .resolution
                            .bitplane_from_data(data, 0)
                            .collect::<Vec<_>>(),
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &self
                            .resolution
                            .bitplane_from_data(data, 1)
                            .collect::<Vec<_>>(),
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }

    fn get_display_size_bytes(&mut self) -> usize {
        self.resolution.byte_count()
    }
}

/// useful for testing non-display routines
pub struct DummyDisplay;

impl DummyDisplay {
    pub fn new() -> Result<DummyDisplay, io::Error> {
        Ok(DummyDisplay {})
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, _data: &[u8]) -> Result<(), io::Error> {
        Ok(())
    }
    fn get_display_size_bytes(&mut self) -> usize {
        DISPLAY_BYTES
    }
}
