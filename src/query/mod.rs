// src/query/mod.rs

pub mod filter;
pub mod page;

pub use filter::{FilterSettings, ProgramFilter, TimeFilterMode, TimeWindow};
pub use page::PageRequest;

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::dataset::{load_dataset, ProgramRecord};
use crate::error::DataError;

/// Filters plus the page to return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramQuery {
    pub filter: ProgramFilter,
    pub page: PageRequest,
}

/// One page of matching programs and the pre-pagination match count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramPage {
    pub records: Vec<ProgramRecord>,
    pub total_count: usize,
}

/// Answers [`ProgramQuery`]s against a CSV file on disk.
///
/// Holds no data between calls: every query re-reads the file.
#[derive(Debug, Clone)]
pub struct ProgramCatalog {
    data_path: PathBuf,
    settings: FilterSettings,
}

impl ProgramCatalog {
    pub fn new(data_path: impl Into<PathBuf>, settings: FilterSettings) -> Self {
        Self {
            data_path: data_path.into(),
            settings,
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Load the dataset, narrow it with `query.filter`, and cut out `query.page`.
    #[tracing::instrument(level = "debug", skip_all, fields(page = query.page.page, limit = query.page.limit))]
    pub fn query(&self, query: &ProgramQuery) -> Result<ProgramPage, DataError> {
        let ds = load_dataset(&self.data_path)?;
        let matching = query.filter.apply(&ds, &self.settings)?;
        let records = query
            .page
            .slice(&matching)
            .iter()
            .map(|&row| ds.record(row))
            .collect();

        debug!(total = ds.len(), matched = matching.len(), "query done");
        Ok(ProgramPage {
            records,
            total_count: matching.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// 45 rows; even rows are in Seoul, every third row runs on Monday.
    fn catalog_file() -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "ID,CTPRVN_NM,PROGRAM_ESTBL_TIZN_VALUE,MON").unwrap();
        for i in 0..45 {
            let region = if i % 2 == 0 { "서울특별시" } else { "경기도" };
            let time = if i % 4 < 2 { "오전 10:00" } else { "오후 14:00" };
            let mon = if i % 3 == 0 { "Y" } else { "" };
            writeln!(tmp, "{i},{region},{time},{mon}").unwrap();
        }
        tmp
    }

    fn query(filter: ProgramFilter, page: usize, limit: usize) -> ProgramQuery {
        ProgramQuery {
            filter,
            page: PageRequest::new(page, limit).unwrap(),
        }
    }

    fn ids(page: &ProgramPage) -> Vec<i64> {
        page.records
            .iter()
            .map(|r| r["ID"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_unfiltered_pages() {
        let tmp = catalog_file();
        let catalog = ProgramCatalog::new(tmp.path(), FilterSettings::default());

        let p1 = catalog.query(&query(ProgramFilter::default(), 1, 20)).unwrap();
        let p3 = catalog.query(&query(ProgramFilter::default(), 3, 20)).unwrap();
        let p4 = catalog.query(&query(ProgramFilter::default(), 4, 20)).unwrap();

        assert_eq!(p1.total_count, 45);
        assert_eq!(p1.records.len(), 20);
        assert_eq!(ids(&p3), (40..45).collect::<Vec<_>>());
        assert!(p4.records.is_empty());
        assert_eq!(p4.total_count, 45);
    }

    #[test]
    fn test_region_pages_are_exhaustive() {
        let tmp = catalog_file();
        let catalog = ProgramCatalog::new(tmp.path(), FilterSettings::default());
        let filter = ProgramFilter {
            region: Some("서울특별시".into()),
            ..Default::default()
        };

        let first = catalog.query(&query(filter.clone(), 1, 7)).unwrap();
        assert_eq!(first.total_count, 23);
        let pages = first.total_count.div_ceil(7);

        let mut all = Vec::new();
        for p in 1..=pages {
            let page = catalog.query(&query(filter.clone(), p, 7)).unwrap();
            for r in &page.records {
                assert_eq!(r["CTPRVN_NM"], json!("서울특별시"));
            }
            all.extend(ids(&page));
        }
        assert_eq!(all, (0..45).step_by(2).collect::<Vec<_>>());
    }

    #[test]
    fn test_combined_filters() {
        let tmp = catalog_file();
        let catalog = ProgramCatalog::new(tmp.path(), FilterSettings::default());
        let filter = ProgramFilter {
            region: Some("서울특별시".into()),
            time: Some(TimeWindow::Morning),
            days: vec!["MON".into()],
        };
        let page = catalog.query(&query(filter, 1, 100)).unwrap();
        let expected: Vec<i64> = (0..45)
            .filter(|i| i % 2 == 0 && i % 4 < 2 && i % 3 == 0)
            .collect();
        assert_eq!(ids(&page), expected);
        assert_eq!(page.total_count, expected.len());
    }

    #[test]
    fn test_na_weekday_cells_do_not_match() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "ID,CTPRVN_NM,Mon\n1,서울특별시,Y\n2,서울특별시,NaN\n3,서울특별시,NA\n").unwrap();
        let catalog = ProgramCatalog::new(tmp.path(), FilterSettings::default());
        let filter = ProgramFilter {
            days: vec!["Mon".into()],
            ..Default::default()
        };
        let page = catalog.query(&query(filter, 1, 20)).unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(ids(&page), vec![1]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = ProgramCatalog::new(dir.path().join("program.csv"), FilterSettings::default());
        let err = catalog
            .query(&query(ProgramFilter::default(), 1, 20))
            .unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
