// THEORY:
// The `Tile` module represents the smallest unit of classification: a small square
// block of HSV samples cut out of a region. Like the pixel, it is a "dumb" data
// container. It knows how to summarize itself (channel means and hue spread) but
// not what color it is; that decision belongs to the `TileClassifier`.
//
// Key architectural principles:
// 1.  **Spatial Pooling**: Averaging a 5x5 block cancels single-pixel sensor noise,
//     so the classifier reasons about coherent patches rather than samples.
// 2.  **Two views of hue**: Hue is cyclic, and red straddles the 0/180 seam. A plain
//     mean of samples at 2 and 178 lands on 90 (cyan) with a huge spread. The
//     wrapped view adds 180 to every hue below 90, which moves red to a single
//     cluster around 180 while leaving every other band's spread unchanged.

pub mod tile {
    use crate::core_modules::hsv_frame::HsvFrame;
    use crate::core_modules::pixel::pixel::HsvPixel;

    /// Hues below this value are shifted up by `HUE_WRAP_OFFSET` in the wrapped view.
    pub const HUE_WRAP_PIVOT: u8 = 90;
    pub const HUE_WRAP_OFFSET: f64 = 180.0;

    /// Summary statistics of one tile.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct TileStats {
        pub mean_hue: f64,
        /// Population standard deviation of hue.
        pub hue_std_dev: f64,
        pub mean_saturation: f64,
        pub mean_value: f64,
    }

    /// A square block of HSV samples with its frame position.
    #[derive(Debug, Clone)]
    pub struct Tile {
        /// Frame x of the top-left sample.
        pub x: u32,
        /// Frame y of the top-left sample.
        pub y: u32,
        /// Edge length in pixels.
        pub size: u32,
        /// Row-major samples, `size * size` of them.
        pub pixels: Vec<HsvPixel>,
    }

    impl Tile {
        pub fn new(x: u32, y: u32, size: u32, pixels: Vec<HsvPixel>) -> Self {
            debug_assert_eq!(pixels.len(), (size * size) as usize);
            Self { x, y, size, pixels }
        }

        /// Cuts the tile at `(x, y)` out of `frame`.
        pub fn extract(frame: &HsvFrame, x: u32, y: u32, size: u32) -> Self {
            Self::new(x, y, size, frame.block(x, y, size))
        }

        /// A tile where every sample is the same.
        pub fn uniform(size: u32, pixel: HsvPixel) -> Self {
            Self::new(0, 0, size, vec![pixel; (size * size) as usize])
        }

        /// Statistics over the raw hue channel.
        pub fn stats(&self) -> TileStats {
            self.stats_with(|hue| hue as f64)
        }

        /// Statistics over the wrapped hue channel, where red clusters around 180.
        pub fn wrapped_stats(&self) -> TileStats {
            self.stats_with(|hue| {
                if hue < HUE_WRAP_PIVOT {
                    hue as f64 + HUE_WRAP_OFFSET
                } else {
                    hue as f64
                }
            })
        }

        fn stats_with<F>(&self, hue_of: F) -> TileStats
        where
            F: Fn(u8) -> f64,
        {
            let count = self.pixels.len();
            if count == 0 {
                return TileStats {
                    mean_hue: 0.0,
                    hue_std_dev: 0.0,
                    mean_saturation: 0.0,
                    mean_value: 0.0,
                };
            }
            let n = count as f64;

            let mut sum_hue = 0.0;
            let mut sum_saturation = 0u64;
            let mut sum_value = 0u64;
            for pixel in &self.pixels {
                sum_hue += hue_of(pixel.hue);
                sum_saturation += pixel.saturation as u64;
                sum_value += pixel.value as u64;
            }
            let mean_hue = sum_hue / n;

            let variance = self
                .pixels
                .iter()
                .map(|pixel| (hue_of(pixel.hue) - mean_hue).powi(2))
                .sum::<f64>()
                / n;

            TileStats {
                mean_hue,
                hue_std_dev: variance.sqrt(),
                mean_saturation: sum_saturation as f64 / n,
                mean_value: sum_value as f64 / n,
            }
        }
    }
}
