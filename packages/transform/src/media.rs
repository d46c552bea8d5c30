//! Photo and logo URL construction for hosted venue images.
//!
//! Images live under `{base}/{city_key}/` with one logo and a fixed number
//! of numbered photos per club. Nothing is fetched or checked here; the
//! URLs are only built.

/// Number of photos hosted per club.
pub const PHOTO_COUNT: usize = 5;

/// Image URLs for a single venue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaUrls {
    /// `{base}/{city}/{club}1.jpg` through `{club}5.jpg`.
    pub photo_urls: Vec<String>,
    /// `{base}/{city}/{club}_logo.png`.
    pub logo: String,
}

/// Builds the photo and logo URLs for a club.
///
/// `base_url` must already be stripped of a trailing `/`.
#[must_use]
pub fn build_media_urls(base_url: &str, city_key: &str, club_key: &str) -> MediaUrls {
    let photo_urls = (1..=PHOTO_COUNT)
        .map(|i| format!("{base_url}/{city_key}/{club_key}{i}.jpg"))
        .collect();

    MediaUrls {
        photo_urls,
        logo: format!("{base_url}/{city_key}/{club_key}_logo.png"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_five_numbered_photos() {
        let urls = build_media_urls("https://img.test/clubs", "tel_aviv", "xyz_club");
        assert_eq!(urls.photo_urls.len(), PHOTO_COUNT);
        for (i, url) in urls.photo_urls.iter().enumerate() {
            assert_eq!(
                *url,
                format!("https://img.test/clubs/tel_aviv/xyz_club{}.jpg", i + 1)
            );
        }
    }

    #[test]
    fn builds_logo() {
        let urls = build_media_urls("https://img.test", "berlin", "berghain");
        assert_eq!(urls.logo, "https://img.test/berlin/berghain_logo.png");
    }
}
