/// Braille canvas for high-resolution terminal rendering
/// Each terminal cell contains a 2×4 grid of Braille dots, so the canvas
/// has 2× horizontal and 4× vertical resolution. A cell has one color;
/// the last shape drawn into it decides which.

pub type Rgb = [u8; 3];

pub struct BrailleCanvas {
    width: usize,  // Width in terminal cells
    height: usize, // Height in terminal cells
    dots: Vec<Vec<u8>>,
    colors: Vec<Vec<Option<Rgb>>>,
}

impl BrailleCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![vec![0; width]; height],
            colors: vec![vec![None; width]; height],
        }
    }

    /// Set a dot at pixel coordinates
    /// pixel_x: 0 to (width * 2 - 1)
    /// pixel_y: 0 to (height * 4 - 1)
    pub fn set_pixel(&mut self, pixel_x: usize, pixel_y: usize, color: Rgb) {
        let cell_x = pixel_x / 2;
        let cell_y = pixel_y / 4;

        if cell_x >= self.width || cell_y >= self.height {
            return;
        }

        // Braille dot numbering:
        // 1 4
        // 2 5
        // 3 6
        // 7 8
        let dot_index = match (pixel_x % 2, pixel_y % 4) {
            (0, 0) => 0,
            (0, 1) => 1,
            (0, 2) => 2,
            (0, _) => 6,
            (_, 0) => 3,
            (_, 1) => 4,
            (_, 2) => 5,
            (_, _) => 7,
        };

        self.dots[cell_y][cell_x] |= 1 << dot_index;
        self.colors[cell_y][cell_x] = Some(color);
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: Rgb) {
        for py in y..(y + height) {
            for px in x..(x + width) {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// One-pixel rectangle outline
    pub fn outline_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: Rgb) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x + width - 1;
        let bottom = y + height - 1;
        for px in x..=right {
            self.set_pixel(px, y, color);
            self.set_pixel(px, bottom, color);
        }
        for py in y..=bottom {
            self.set_pixel(x, py, color);
            self.set_pixel(right, py, color);
        }
    }

    /// Dashed vertical line, two pixels on and two off
    pub fn dashed_vline(&mut self, x: usize, y: usize, height: usize, color: Rgb) {
        for py in (y..y + height).step_by(4) {
            self.set_pixel(x, py, color);
            self.set_pixel(x, py + 1, color);
        }
    }

    /// Filled ellipse centered on (cx, cy). Pixels are not square, so the
    /// two radii are given separately.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Rgb) {
        let rx = rx.max(0.5);
        let ry = ry.max(0.5);
        let x0 = (cx - rx).floor().max(0.0) as usize;
        let y0 = (cy - ry).floor().max(0.0) as usize;
        let x1 = (cx + rx).ceil().max(0.0) as usize;
        let y1 = (cy + ry).ceil().max(0.0) as usize;

        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = (px as f32 + 0.5 - cx) / rx;
                let dy = (py as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.set_pixel(px, py, color);
                }
            }
        }
    }

    /// Convert dot pattern to Braille character
    /// Braille Unicode: U+2800 + dot pattern
    pub fn to_char(&self, cell_x: usize, cell_y: usize) -> char {
        if cell_x >= self.width || cell_y >= self.height {
            return ' ';
        }

        let pattern = self.dots[cell_y][cell_x];
        char::from_u32(0x2800 + pattern as u32).unwrap_or(' ')
    }

    pub fn color_at(&self, cell_x: usize, cell_y: usize) -> Option<Rgb> {
        self.colors.get(cell_y)?.get(cell_x).copied().flatten()
    }

    pub fn cell_width(&self) -> usize {
        self.width
    }

    pub fn cell_height(&self) -> usize {
        self.height
    }

    /// Get width in pixels (2 per cell)
    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    /// Get height in pixels (4 per cell)
    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }
}
