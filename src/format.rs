use std::fmt;
use std::path::Path;

/// Container format, classified once from a file name suffix.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// PNG, via the `png` crate.
    Png,
    /// Binary PPM (P6), decoded by the built-in parser. Decode only.
    Ppm,
    /// ROI, the QOI-style lossless container.
    Roi,
}

impl ImageFormat {
    /// Every format, in dispatch order.
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Ppm, ImageFormat::Roi];

    /// File name suffix, including the leading dot.
    pub fn suffix(self) -> &'static str {
        match self {
            ImageFormat::Png => ".png",
            ImageFormat::Ppm => ".ppm",
            ImageFormat::Roi => ".roi",
        }
    }

    /// Classify a path by its exact, case-sensitive suffix.
    ///
    /// Only the end of the path is inspected: `a.png` and a bare `.png` both
    /// match, `a.PNG` and `a.png.bak` do not. No I/O is performed.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let bytes = path.as_ref().as_os_str().as_encoded_bytes();
        Self::ALL
            .into_iter()
            .find(|format| bytes.ends_with(format.suffix().as_bytes()))
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Ppm => "PPM",
            ImageFormat::Roi => "ROI",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_suffixes() {
        assert_eq!(ImageFormat::from_path("in.png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_path("dir/in.ppm"), Some(ImageFormat::Ppm));
        assert_eq!(ImageFormat::from_path("/tmp/x.y.roi"), Some(ImageFormat::Roi));
        assert_eq!(ImageFormat::from_path(".png"), Some(ImageFormat::Png));
    }

    #[test]
    fn suffix_match_is_exact_and_case_sensitive() {
        assert_eq!(ImageFormat::from_path("in.PNG"), None);
        assert_eq!(ImageFormat::from_path("in.png.bak"), None);
        assert_eq!(ImageFormat::from_path("in.qoi"), None);
        assert_eq!(ImageFormat::from_path("png"), None);
        assert_eq!(ImageFormat::from_path(""), None);
    }
}
