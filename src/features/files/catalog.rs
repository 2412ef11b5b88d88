//! In-memory file catalog: type inference, filter/sort pipeline and
//! storage-quota computation.
//!
//! Everything in this module is pure. The catalog is rebuilt wholesale
//! from the metadata store on every fetch and these functions derive
//! views from it without touching any external state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::STORAGE_CAPACITY;

/// Closed set of display type tags for catalog entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Image,
    Video,
    Excel,
    Ppt,
    Word,
    Other,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Excel => "excel",
            FileType::Ppt => "ppt",
            FileType::Word => "word",
            FileType::Other => "other",
        }
    }

    /// Parse a stored type tag. Unknown or empty values yield `None` so the
    /// caller falls back to filename inference.
    pub fn parse(value: &str) -> Option<FileType> {
        match value {
            "pdf" => Some(FileType::Pdf),
            "image" => Some(FileType::Image),
            "video" => Some(FileType::Video),
            "excel" => Some(FileType::Excel),
            "ppt" => Some(FileType::Ppt),
            "word" => Some(FileType::Word),
            "other" => Some(FileType::Other),
            _ => None,
        }
    }

    /// Infer the type tag from a filename extension (case-insensitive).
    ///
    /// Total: every filename, including one with no extension, maps to
    /// exactly one tag, defaulting to `Other`.
    pub fn infer_from_name(file_name: &str) -> FileType {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => FileType::Pdf,
            "jpg" | "jpeg" | "png" | "gif" | "webp" => FileType::Image,
            "mp4" | "mov" | "webm" | "avi" => FileType::Video,
            "xls" | "xlsx" | "csv" => FileType::Excel,
            "ppt" | "pptx" => FileType::Ppt,
            "doc" | "docx" => FileType::Word,
            _ => FileType::Other,
        }
    }

    /// Resolve the type for an upload: trust the MIME family for images and
    /// videos, fall back to extension inference otherwise.
    pub fn from_upload(content_type: &str, file_name: &str) -> FileType {
        if content_type.starts_with("image/") {
            FileType::Image
        } else if content_type.starts_with("video/") {
            FileType::Video
        } else {
            Self::infer_from_name(file_name)
        }
    }

    /// Resolve the display type for a catalog entry: use the stored tag when
    /// present and recognized, else infer from the filename.
    pub fn resolve(stored: Option<&str>, file_name: &str) -> FileType {
        stored
            .filter(|s| !s.is_empty())
            .and_then(Self::parse)
            .unwrap_or_else(|| Self::infer_from_name(file_name))
    }
}

/// One normalized catalog entry, derived from a file record.
/// Never persisted; rebuilt on every fetch.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub file_name: String,
    pub path: String,
    pub url: String,
    pub size: i64,
    pub file_type: FileType,
    pub download_count: i64,
    pub uploaded_at: DateTime<Utc>,
}

/// Type filter with an "all" sentinel that disables the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(FileType),
}

impl TypeFilter {
    /// Parse a query value; "all" (or empty) disables the filter and an
    /// unknown tag is rejected.
    pub fn parse(value: &str) -> Option<TypeFilter> {
        if value.is_empty() || value == "all" {
            Some(TypeFilter::All)
        } else {
            FileType::parse(value).map(TypeFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    #[default]
    Date,
    Size,
    Type,
}

impl SortKey {
    /// Direction used when a key is first selected
    fn default_order(&self) -> SortOrder {
        match self {
            // Newest first is the natural default for the upload timeline
            SortKey::Date => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn flip(self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Active sort selection. Re-selecting the active key flips the direction
/// instead of resetting it; selecting a new key starts from that key's
/// default direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            order: SortOrder::Desc,
        }
    }
}

impl SortState {
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.order = self.order.flip();
        } else {
            self.key = key;
            self.order = key.default_order();
        }
    }
}

/// Filter/sort parameters for one view derivation
#[derive(Debug, Clone, Default)]
pub struct FileQuery {
    /// Case-insensitive substring match on the filename; empty matches all
    pub search: Option<String>,
    pub type_filter: TypeFilter,
    /// Inclusive lower bound on upload time
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on upload time
    pub to: Option<DateTime<Utc>>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

/// Derive an ordered view from the catalog.
///
/// Pure and deterministic: filters are applied in order (name, type, date
/// range), then a single stable sort. Ties keep their pre-sort order,
/// which is the catalog's descending-upload-time order.
pub fn apply(catalog: &[CatalogEntry], query: &FileQuery) -> Vec<CatalogEntry> {
    let search = query
        .search
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    let mut view: Vec<CatalogEntry> = catalog
        .iter()
        .filter(|entry| {
            search.is_empty() || entry.file_name.to_lowercase().contains(&search)
        })
        .filter(|entry| match query.type_filter {
            TypeFilter::All => true,
            TypeFilter::Only(file_type) => entry.file_type == file_type,
        })
        .filter(|entry| {
            if let Some(from) = query.from {
                if entry.uploaded_at < from {
                    return false;
                }
            }
            if let Some(to) = query.to {
                if entry.uploaded_at > to {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        let ordering = match query.sort_by {
            SortKey::Name => a
                .file_name
                .to_lowercase()
                .cmp(&b.file_name.to_lowercase()),
            SortKey::Date => a.uploaded_at.cmp(&b.uploaded_at),
            SortKey::Size => a.size.cmp(&b.size),
            SortKey::Type => a.file_type.as_str().cmp(b.file_type.as_str()),
        };
        match query.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    view
}

/// Storage usage over the full catalog (never the filtered view)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageUsage {
    pub used: i64,
    pub capacity: i64,
    pub percent: f64,
}

pub fn storage_usage(catalog: &[CatalogEntry]) -> StorageUsage {
    let used: i64 = catalog.iter().map(|entry| entry.size.max(0)).sum();
    let percent = (used as f64 / STORAGE_CAPACITY as f64 * 100.0).clamp(0.0, 100.0);

    StorageUsage {
        used,
        capacity: STORAGE_CAPACITY,
        percent,
    }
}

/// Render a byte count with the largest unit keeping the mantissa < 1024,
/// two decimals.
pub fn format_size(bytes: i64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes.max(0) as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", size, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(name: &str, size: i64, date: &str, file_type: FileType) -> CatalogEntry {
        CatalogEntry {
            id: Uuid::new_v4(),
            file_name: name.to_string(),
            path: format!("owner/{}", name),
            url: format!("http://localhost:9000/uploads/owner/{}", name),
            size,
            file_type,
            download_count: 0,
            uploaded_at: date.parse().unwrap(),
        }
    }

    fn sample_catalog() -> Vec<CatalogEntry> {
        vec![
            entry("report.pdf", 1000, "2024-01-01T00:00:00Z", FileType::Pdf),
            entry("photo.png", 2000, "2024-02-01T00:00:00Z", FileType::Image),
        ]
    }

    #[test]
    fn test_infer_type_is_total() {
        assert_eq!(FileType::infer_from_name("a.pdf"), FileType::Pdf);
        assert_eq!(FileType::infer_from_name("a.JPEG"), FileType::Image);
        assert_eq!(FileType::infer_from_name("a.webp"), FileType::Image);
        assert_eq!(FileType::infer_from_name("clip.MOV"), FileType::Video);
        assert_eq!(FileType::infer_from_name("sheet.csv"), FileType::Excel);
        assert_eq!(FileType::infer_from_name("deck.pptx"), FileType::Ppt);
        assert_eq!(FileType::infer_from_name("letter.docx"), FileType::Word);
        assert_eq!(FileType::infer_from_name("archive.zip"), FileType::Other);
        assert_eq!(FileType::infer_from_name("no-extension"), FileType::Other);
        assert_eq!(FileType::infer_from_name(""), FileType::Other);
        assert_eq!(FileType::infer_from_name("trailing.dot."), FileType::Other);
    }

    #[test]
    fn test_resolve_prefers_stored_tag() {
        assert_eq!(FileType::resolve(Some("video"), "a.pdf"), FileType::Video);
        assert_eq!(FileType::resolve(Some(""), "a.pdf"), FileType::Pdf);
        assert_eq!(FileType::resolve(Some("bogus"), "a.pdf"), FileType::Pdf);
        assert_eq!(FileType::resolve(None, "a.png"), FileType::Image);
    }

    #[test]
    fn test_from_upload_trusts_mime_family() {
        assert_eq!(
            FileType::from_upload("image/png", "weird-name"),
            FileType::Image
        );
        assert_eq!(
            FileType::from_upload("video/mp4", "weird-name"),
            FileType::Video
        );
        assert_eq!(
            FileType::from_upload("application/pdf", "doc.pdf"),
            FileType::Pdf
        );
        assert_eq!(
            FileType::from_upload("application/octet-stream", "letter.docx"),
            FileType::Word
        );
    }

    #[test]
    fn test_type_filter_matches_only_that_type() {
        let catalog = sample_catalog();
        let query = FileQuery {
            type_filter: TypeFilter::Only(FileType::Pdf),
            ..Default::default()
        };

        let view = apply(&catalog, &query);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].file_name, "report.pdf");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = sample_catalog();
        let query = FileQuery {
            search: Some("REPORT".to_string()),
            ..Default::default()
        };

        let view = apply(&catalog, &query);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].file_name, "report.pdf");
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let catalog = sample_catalog();
        let with_empty = apply(
            &catalog,
            &FileQuery {
                search: Some(String::new()),
                ..Default::default()
            },
        );
        let without = apply(&catalog, &FileQuery::default());

        let names = |v: &[CatalogEntry]| v.iter().map(|e| e.file_name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&with_empty), names(&without));
        assert_eq!(with_empty.len(), 2);
    }

    #[test]
    fn test_date_range_bounds_are_inclusive() {
        let catalog = sample_catalog();
        let jan = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let query = FileQuery {
            from: Some(jan),
            to: Some(jan),
            ..Default::default()
        };
        let view = apply(&catalog, &query);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].file_name, "report.pdf");

        // Unset bounds impose no restriction
        let open = apply(
            &catalog,
            &FileQuery {
                from: Some(jan),
                ..Default::default()
            },
        );
        assert_eq!(open.len(), 2);
    }

    #[test]
    fn test_sort_size_desc_then_toggle() {
        let catalog = sample_catalog();
        let mut sort = SortState::default();

        sort.toggle(SortKey::Size); // new key, ascending default
        sort.toggle(SortKey::Size); // same key, flips to descending

        let query = FileQuery {
            sort_by: sort.key,
            sort_order: sort.order,
            ..Default::default()
        };
        let view = apply(&catalog, &query);
        assert_eq!(view[0].file_name, "photo.png");
        assert_eq!(view[1].file_name, "report.pdf");

        sort.toggle(SortKey::Size); // flips back to ascending
        let view = apply(
            &catalog,
            &FileQuery {
                sort_by: sort.key,
                sort_order: sort.order,
                ..Default::default()
            },
        );
        assert_eq!(view[0].file_name, "report.pdf");
        assert_eq!(view[1].file_name, "photo.png");
    }

    #[test]
    fn test_toggle_new_key_uses_default_direction() {
        let mut sort = SortState::default();
        assert_eq!(sort.key, SortKey::Date);
        assert_eq!(sort.order, SortOrder::Desc);

        sort.toggle(SortKey::Name);
        assert_eq!(sort.key, SortKey::Name);
        assert_eq!(sort.order, SortOrder::Asc);

        sort.toggle(SortKey::Date);
        assert_eq!(sort.order, SortOrder::Desc);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let catalog = sample_catalog();
        let query = FileQuery {
            search: Some("o".to_string()),
            sort_by: SortKey::Name,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };

        let once = apply(&catalog, &query);
        let twice = apply(&once, &query);

        let names = |v: &[CatalogEntry]| v.iter().map(|e| e.file_name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn test_reversing_direction_reverses_list_without_ties() {
        let catalog = vec![
            entry("a.pdf", 10, "2024-01-01T00:00:00Z", FileType::Pdf),
            entry("b.pdf", 20, "2024-01-02T00:00:00Z", FileType::Pdf),
            entry("c.pdf", 30, "2024-01-03T00:00:00Z", FileType::Pdf),
        ];

        for key in [SortKey::Name, SortKey::Date, SortKey::Size] {
            let asc = apply(
                &catalog,
                &FileQuery {
                    sort_by: key,
                    sort_order: SortOrder::Asc,
                    ..Default::default()
                },
            );
            let desc = apply(
                &catalog,
                &FileQuery {
                    sort_by: key,
                    sort_order: SortOrder::Desc,
                    ..Default::default()
                },
            );

            let forward: Vec<_> = asc.iter().map(|e| e.file_name.clone()).collect();
            let mut backward: Vec<_> = desc.iter().map(|e| e.file_name.clone()).collect();
            backward.reverse();
            assert_eq!(forward, backward, "key {:?}", key);
        }
    }

    #[test]
    fn test_sort_ties_keep_catalog_order() {
        // Same type for every entry; the tie-broken order is the input order.
        let catalog = vec![
            entry("z.pdf", 10, "2024-01-03T00:00:00Z", FileType::Pdf),
            entry("a.pdf", 20, "2024-01-02T00:00:00Z", FileType::Pdf),
            entry("m.pdf", 30, "2024-01-01T00:00:00Z", FileType::Pdf),
        ];

        let view = apply(
            &catalog,
            &FileQuery {
                sort_by: SortKey::Type,
                sort_order: SortOrder::Asc,
                ..Default::default()
            },
        );

        let names: Vec<_> = view.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(names, vec!["z.pdf", "a.pdf", "m.pdf"]);
    }

    #[test]
    fn test_storage_usage_sums_full_catalog() {
        let usage = storage_usage(&sample_catalog());
        assert_eq!(usage.used, 3000);
        assert_eq!(usage.capacity, STORAGE_CAPACITY);
        assert!(usage.percent > 0.0 && usage.percent < 1.0);
    }

    #[test]
    fn test_storage_percent_is_bounded() {
        let empty = storage_usage(&[]);
        assert_eq!(empty.used, 0);
        assert_eq!(empty.percent, 0.0);

        let huge = vec![entry(
            "big.bin",
            STORAGE_CAPACITY * 50,
            "2024-01-01T00:00:00Z",
            FileType::Other,
        )];
        let usage = storage_usage(&huge);
        assert_eq!(usage.percent, 100.0);
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(100 * 1024 * 1024), "100.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.00 GB");
    }

    #[test]
    fn test_type_filter_parse() {
        assert_eq!(TypeFilter::parse("all"), Some(TypeFilter::All));
        assert_eq!(TypeFilter::parse(""), Some(TypeFilter::All));
        assert_eq!(
            TypeFilter::parse("pdf"),
            Some(TypeFilter::Only(FileType::Pdf))
        );
        assert_eq!(TypeFilter::parse("bogus"), None);
    }
}
