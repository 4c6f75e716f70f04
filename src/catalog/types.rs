use serde::Deserialize;

// ============================================================================
// Media Kind
// ============================================================================

/// The two media kinds the catalog serves.
///
/// List endpoints omit an explicit kind field; it is inferred from the
/// presence of the movie-only `title` field (series carry `name` instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    /// Path segment used by the catalog API and navigation targets.
    pub fn route_segment(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.route_segment())
    }
}

// ============================================================================
// Catalog Item
// ============================================================================

/// A localized logo image attached to a detail record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogoImage {
    #[serde(default)]
    pub iso_639_1: Option<String>,
    pub file_path: String,
}

/// Extended image set returned by detail fetches (`append_to_response=images`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub logos: Vec<LogoImage>,
}

/// Per-region content rating for series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentRatingEntry {
    pub iso_3166_1: String,
    #[serde(default)]
    pub rating: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentRatings {
    #[serde(default)]
    pub results: Vec<ContentRatingEntry>,
}

/// Per-region certification entries for movies (`release_dates` detail).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CertificationEntry {
    #[serde(default)]
    pub certification: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReleaseDateEntry {
    pub iso_3166_1: String,
    #[serde(default)]
    pub release_dates: Vec<CertificationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReleaseDates {
    #[serde(default)]
    pub results: Vec<ReleaseDateEntry>,
}

/// A single catalog entry as returned by list or detail endpoints.
///
/// Only the fields the feed consumes are modeled; everything else in the
/// payload is ignored. Summary (list) records leave the extended fields
/// (`runtime`, `number_of_seasons`, `images`, rating metadata) unset —
/// a successful spotlight detail fetch replaces the summary wholesale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    /// Movie display title. Presence marks the item as a movie.
    #[serde(default)]
    pub title: Option<String>,
    /// Series display name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub images: Option<ImageSet>,
    #[serde(default)]
    pub content_ratings: Option<ContentRatings>,
    #[serde(default)]
    pub release_dates: Option<ReleaseDates>,
}

impl CatalogItem {
    pub fn kind(&self) -> MediaKind {
        if self.title.is_some() {
            MediaKind::Movie
        } else {
            MediaKind::Series
        }
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    /// Preferred backdrop image, falling back to the poster.
    pub fn backdrop_or_poster(&self) -> Option<&str> {
        self.backdrop_path
            .as_deref()
            .or(self.poster_path.as_deref())
    }

    /// Release date for movies, first air date for series.
    pub fn release(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
    }

    /// Logo image path for the given language, if the detail record carries one.
    pub fn logo_path(&self, language: &str) -> Option<&str> {
        self.images.as_ref().and_then(|images| {
            images
                .logos
                .iter()
                .find(|logo| logo.iso_639_1.as_deref() == Some(language))
                .map(|logo| logo.file_path.as_str())
        })
    }

    /// Content rating for the given region.
    ///
    /// Series ratings come from `content_ratings`; movie certifications from
    /// the `release_dates` detail. Empty strings are treated as absent.
    pub fn content_rating(&self, region: &str) -> Option<&str> {
        if let Some(ratings) = &self.content_ratings {
            if let Some(entry) = ratings
                .results
                .iter()
                .find(|entry| entry.iso_3166_1 == region && !entry.rating.is_empty())
            {
                return Some(entry.rating.as_str());
            }
        }
        self.release_dates.as_ref().and_then(|dates| {
            dates
                .results
                .iter()
                .filter(|entry| entry.iso_3166_1 == region)
                .flat_map(|entry| entry.release_dates.iter())
                .find(|cert| !cert.certification.is_empty())
                .map(|cert| cert.certification.as_str())
        })
    }
}

// ============================================================================
// Category Row
// ============================================================================

/// One assembled category: the configured display title plus the ordered
/// items its query returned.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub title: String,
    pub items: Vec<CatalogItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_inferred_from_title_presence() {
        let movie: CatalogItem =
            serde_json::from_value(serde_json::json!({ "id": 1, "title": "Heat" })).unwrap();
        assert_eq!(movie.kind(), MediaKind::Movie);

        let series: CatalogItem =
            serde_json::from_value(serde_json::json!({ "id": 2, "name": "Dark" })).unwrap();
        assert_eq!(series.kind(), MediaKind::Series);
        assert_eq!(series.display_title(), "Dark");
    }

    #[test]
    fn test_display_title_fallback() {
        let item: CatalogItem = serde_json::from_value(serde_json::json!({ "id": 3 })).unwrap();
        assert_eq!(item.kind(), MediaKind::Series);
        assert_eq!(item.display_title(), "Untitled");
    }

    #[test]
    fn test_backdrop_falls_back_to_poster() {
        let item: CatalogItem = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Alien",
            "poster_path": "/poster.jpg"
        }))
        .unwrap();
        assert_eq!(item.backdrop_or_poster(), Some("/poster.jpg"));
    }

    #[test]
    fn test_logo_path_matches_language() {
        let item: CatalogItem = serde_json::from_value(serde_json::json!({
            "id": 5,
            "title": "Dune",
            "images": { "logos": [
                { "iso_639_1": "de", "file_path": "/de.png" },
                { "iso_639_1": "en", "file_path": "/en.png" }
            ]}
        }))
        .unwrap();
        assert_eq!(item.logo_path("en"), Some("/en.png"));
        assert_eq!(item.logo_path("fr"), None);
    }

    #[test]
    fn test_content_rating_series_and_movie() {
        let series: CatalogItem = serde_json::from_value(serde_json::json!({
            "id": 6,
            "name": "Severance",
            "content_ratings": { "results": [
                { "iso_3166_1": "DE", "rating": "16" },
                { "iso_3166_1": "US", "rating": "TV-MA" }
            ]}
        }))
        .unwrap();
        assert_eq!(series.content_rating("US"), Some("TV-MA"));

        let movie: CatalogItem = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Heat",
            "release_dates": { "results": [
                { "iso_3166_1": "US", "release_dates": [
                    { "certification": "" },
                    { "certification": "R" }
                ]}
            ]}
        }))
        .unwrap();
        assert_eq!(movie.content_rating("US"), Some("R"));
        assert_eq!(movie.content_rating("GB"), None);
    }

    #[test]
    fn test_unknown_payload_fields_ignored() {
        let item: CatalogItem = serde_json::from_value(serde_json::json!({
            "id": 8,
            "title": "Arrival",
            "genre_ids": [878],
            "popularity": 91.2
        }))
        .unwrap();
        assert_eq!(item.id, 8);
    }
}
