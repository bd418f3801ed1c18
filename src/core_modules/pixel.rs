// THEORY:
// The `HsvPixel` is the most fundamental unit of the classifier. It is a "dumb"
// data container for a single pre-converted HSV sample, using the 8-bit camera
// convention: hue in 0..=179 (half degrees), saturation and value in 0..=255.
//
// Key principles:
// 1.  **No analysis here**: A single pixel says nothing about whether a tile is a
//     solid color. All statistics live in `Tile`, all decisions in the classifier.
// 2.  **Conversion is a convenience**: Frames normally arrive already converted.
//     `from_rgb` exists for synthetic frames and for callers without their own
//     conversion step; it follows the same half-degree hue scale.

pub mod pixel {
    use palette::{FromColor, Hsv, Srgb};

    pub type Channel = u8;

    /// Largest hue value in the half-degree scale.
    pub const HUE_MAX: Channel = 179;

    /// Scales a 0..1 component to 0..255.
    fn to_channel(component: f32) -> Channel {
        (component.clamp(0.0, 1.0) * 255.0).round() as Channel
    }

    /// A single HSV sample.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct HsvPixel {
        /// Hue in half degrees (0-179). Red sits at both ends of the range.
        pub hue: Channel,
        /// Saturation (0-255).
        pub saturation: Channel,
        /// Brightness (0-255).
        pub value: Channel,
    }

    impl HsvPixel {
        pub fn new(hue: Channel, saturation: Channel, value: Channel) -> Self {
            Self {
                hue,
                saturation,
                value,
            }
        }

        /// Converts an 8-bit RGB triple into the half-degree HSV scale.
        pub fn from_rgb(red: Channel, green: Channel, blue: Channel) -> Self {
            let hsv: Hsv = Hsv::from_color(Srgb::new(red, green, blue).into_format::<f32>());

            // 359 degrees rounds to 180, which wraps back to red at 0.
            let half_degrees = (hsv.hue.into_positive_degrees() / 2.0).round() as u16;
            let hue = (half_degrees % (HUE_MAX as u16 + 1)) as Channel;

            Self {
                hue,
                saturation: to_channel(hsv.saturation),
                value: to_channel(hsv.value),
            }
        }

        pub fn to_bytes(self) -> [Channel; 3] {
            [self.hue, self.saturation, self.value]
        }
    }

    impl From<image::Rgb<Channel>> for HsvPixel {
        fn from(sample: image::Rgb<Channel>) -> Self {
            let [hue, saturation, value] = sample.0;
            Self {
                hue,
                saturation,
                value,
            }
        }
    }
}
