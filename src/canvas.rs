use std::io;
use std::io::{ BufWriter, Write };
use std::fs::File;
use std::path::Path;

use crate::color::Color;
use crate::consts::PPM_LINE_WIDTH;

/// A canvas for drawing pixels.
///
/// This structure stores the results of the ray tracer: one color per pixel,
/// flattened in row-major order with row 0 at the top of the image. Once a
/// frame is rendered, the canvas can be saved as a PPM image.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new canvas with specified width and height, filled with the
    /// background color.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::default(); width * height]
        }
    }

    /// Wraps already computed pixels, in row-major order.
    ///
    /// Returns `None` if the number of pixels does not match the dimensions.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>)
        -> Option<Canvas> {
        if pixels.len() != width * height {
            return None;
        }

        Some(Canvas { width, height, pixels })
    }

    /// The pixels, row by row.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. `y` is the row of the pixel, and `x`
    /// is the column. Rows and columns are zero-indexed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use whitted::color::Color;
    /// # use whitted::canvas::Canvas;
    /// let purple = Color::rgb(255.0, 0.0, 255.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// assert_eq!(canvas.read_pixel(8, 2), None);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`, or `None` if the
    /// location is out-of-bounds.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Saves the canvas to a PPM file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut out)?;
        out.flush()
    }

    /// Writes the canvas as a plain (`P3`) PPM image.
    ///
    /// Channels are clamped to `0..=255` and rounded. Alpha is dropped. Lines
    /// are kept under 70 columns: a channel that would cross that mark starts
    /// a new line.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        // Write PPM header, as well as metadata
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?; // Maximum color value

        for row in self.pixels.chunks(self.width.max(1)) {
            let mut col = 0;
            for pixel in row {
                let pixel = pixel.clamp();
                for channel in [pixel.r, pixel.g, pixel.b].iter() {
                    let value = (channel.round() as u8).to_string();

                    if col > 0 && col + 1 + value.len() >= PPM_LINE_WIDTH {
                        writeln!(out)?;
                        col = 0;
                    } else if col > 0 {
                        write!(out, " ")?;
                        col += 1;
                    }

                    write!(out, "{}", value)?;
                    col += value.len();
                }
            }

            if col > 0 {
                writeln!(out)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
fn ppm_string(canvas: &Canvas) -> String {
    let mut out = Vec::new();
    canvas.write_ppm(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn new_canvas_is_background() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.pixels().len(), 200);
    assert!(c.pixels().iter().all(|p| *p == Color::default()));
}

#[test]
fn from_pixels_checks_dimensions() {
    assert!(Canvas::from_pixels(2, 2, vec![Color::default(); 3]).is_none());
    assert!(Canvas::from_pixels(2, 2, vec![Color::default(); 4]).is_some());
}

#[test]
fn ppm_header() {
    let c = Canvas::new(5, 3);
    let ppm = ppm_string(&c);
    let lines: Vec<&str> = ppm.lines().collect();

    assert_eq!(&lines[0..3], &["P3", "5 3", "255"]);
}

#[test]
fn ppm_pixel_data_is_clamped_and_rounded() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, &Color::rgb(382.5, 0.0, 0.0));
    c.write_pixel(2, 1, &Color::rgb(0.0, 127.6, 0.0));
    c.write_pixel(4, 2, &Color::rgb(-127.5, 0.0, 255.0));

    let ppm = ppm_string(&c);
    let lines: Vec<&str> = ppm.lines().collect();

    assert_eq!(lines[3], "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0");
    assert_eq!(lines[4], "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0");
    assert_eq!(lines[5], "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255");
}

#[test]
fn ppm_long_lines_are_split() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, &Color::rgb(255.0, 204.0, 153.0));
        }
    }

    let ppm = ppm_string(&c);
    let lines: Vec<&str> = ppm.lines().collect();

    assert_eq!(lines[3],
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204");
    assert_eq!(lines[4],
        "153 255 204 153 255 204 153 255 204 153 255 204 153");
    assert_eq!(lines[5],
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204");
    assert_eq!(lines[6],
        "153 255 204 153 255 204 153 255 204 153 255 204 153");
    assert!(lines.iter().all(|l| l.len() < 70));
}

#[test]
fn ppm_ends_with_newline() {
    let ppm = ppm_string(&Canvas::new(5, 3));

    assert!(ppm.ends_with('\n'));
}
