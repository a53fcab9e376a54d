use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use http::Uri;
use uuid::Uuid;

use crate::domain::book::errors::BookDetailsError;
use crate::domain::book::errors::BookIdError;

/// Book aggregate entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub details: BookDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub Uuid);

impl BookId {
    /// Generate a new random book ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a book ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        Uuid::parse_str(s)
            .map(BookId)
            .map_err(|e| BookIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Editable book fields.
///
/// Used both for adding a book and for the full replacement performed by an
/// update. Optional fields are `None` when absent or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
}

impl BookDetails {
    pub const MIN_YEAR: i32 = 1000;
    /// How many years past the current one a publication year may lie.
    pub const YEAR_HORIZON: i32 = 10;

    /// Check required fields and bounds, normalizing blank optionals to `None`.
    ///
    /// # Arguments
    /// * `current_year` - Calendar year the upper year bound is relative to
    ///
    /// # Errors
    /// * `MissingTitle` / `MissingAuthor` - Blank required text
    /// * `YearOutOfRange` - Year outside `1000..=current_year + 10`
    /// * `InvalidCoverImageUrl` - Cover url present but not absolute
    pub fn validated(self, current_year: i32) -> Result<Self, BookDetailsError> {
        if self.title.trim().is_empty() {
            return Err(BookDetailsError::MissingTitle);
        }
        if self.author.trim().is_empty() {
            return Err(BookDetailsError::MissingAuthor);
        }

        let max_year = current_year + Self::YEAR_HORIZON;
        if !(Self::MIN_YEAR..=max_year).contains(&self.year) {
            return Err(BookDetailsError::YearOutOfRange {
                min: Self::MIN_YEAR,
                max: max_year,
                actual: self.year,
            });
        }

        let cover_image_url = non_blank(self.cover_image_url);
        if let Some(url) = &cover_image_url {
            let absolute = url
                .parse::<Uri>()
                .map(|uri| uri.scheme().is_some() && uri.authority().is_some())
                .unwrap_or(false);
            if !absolute {
                return Err(BookDetailsError::InvalidCoverImageUrl(url.clone()));
            }
        }

        Ok(Self {
            title: self.title,
            author: self.author,
            year: self.year,
            isbn: non_blank(self.isbn),
            genre: non_blank(self.genre),
            description: non_blank(self.description),
            cover_image_url,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> BookDetails {
        BookDetails {
            title: "Laskar Pelangi".to_string(),
            author: "Andrea Hirata".to_string(),
            year: 2005,
            isbn: Some("979-3062-79-7".to_string()),
            genre: Some("".to_string()),
            description: None,
            cover_image_url: Some("https://covers.example.com/laskar.jpg".to_string()),
        }
    }

    #[test]
    fn test_validated_normalizes_blank_optionals() {
        let validated = details().validated(2025).unwrap();
        assert_eq!(validated.genre, None);
        assert_eq!(validated.isbn.as_deref(), Some("979-3062-79-7"));
        assert_eq!(
            validated.cover_image_url.as_deref(),
            Some("https://covers.example.com/laskar.jpg")
        );
    }

    #[test]
    fn test_validated_requires_title_and_author() {
        let mut missing_title = details();
        missing_title.title = "  ".to_string();
        assert_eq!(
            missing_title.validated(2025),
            Err(BookDetailsError::MissingTitle)
        );

        let mut missing_author = details();
        missing_author.author = String::new();
        assert_eq!(
            missing_author.validated(2025),
            Err(BookDetailsError::MissingAuthor)
        );
    }

    #[test]
    fn test_validated_year_bounds() {
        let mut book = details();
        book.year = 1000;
        assert!(book.clone().validated(2025).is_ok());

        book.year = 2035;
        assert!(book.clone().validated(2025).is_ok());

        book.year = 2036;
        assert_eq!(
            book.clone().validated(2025),
            Err(BookDetailsError::YearOutOfRange {
                min: 1000,
                max: 2035,
                actual: 2036
            })
        );

        book.year = 999;
        assert!(matches!(
            book.validated(2025),
            Err(BookDetailsError::YearOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validated_rejects_relative_cover_url() {
        let mut book = details();
        book.cover_image_url = Some("/covers/laskar.jpg".to_string());
        assert_eq!(
            book.validated(2025),
            Err(BookDetailsError::InvalidCoverImageUrl(
                "/covers/laskar.jpg".to_string()
            ))
        );
    }

    #[test]
    fn test_book_id_from_string() {
        let id = BookId::new();
        assert_eq!(BookId::from_string(&id.to_string()), Ok(id));
        assert!(matches!(
            BookId::from_string("not-a-uuid"),
            Err(BookIdError::InvalidFormat(_))
        ));
    }
}
