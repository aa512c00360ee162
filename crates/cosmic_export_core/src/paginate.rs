use crate::errors::ExportError;
use crate::models::{ObjectsPage, RemoteRecord, StatusFilter};

/// Consecutive pages without an objects collection before pagination is
/// declared stalled.
pub const MAX_MALFORMED_PAGES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStep {
    /// Request the page with this index next.
    Fetch(u32),
    Done,
}

/// Sequential pagination over one object type, driven page by page.
///
/// Termination is based on the unfiltered cumulative count reaching the
/// server-declared total, so an active status filter cannot keep the loop
/// alive forever. A page without an objects collection still advances the
/// page index, but only `MAX_MALFORMED_PAGES` times in a row.
#[derive(Debug)]
pub struct Paginator {
    status: StatusFilter,
    expected_total: u64,
    page_index: u32,
    fetched: u64,
    malformed_streak: u32,
    records: Vec<RemoteRecord>,
}

impl Paginator {
    pub fn new(expected_total: u64, status: StatusFilter) -> Self {
        Self {
            status,
            expected_total,
            page_index: 0,
            fetched: 0,
            malformed_streak: 0,
            records: Vec::new(),
        }
    }

    pub fn next_step(&self) -> PaginationStep {
        if self.fetched >= self.expected_total {
            PaginationStep::Done
        } else {
            PaginationStep::Fetch(self.page_index)
        }
    }

    pub fn ingest(&mut self, page: ObjectsPage) -> Result<(), ExportError> {
        self.page_index += 1;
        match page.objects {
            Some(objects) if !objects.is_empty() => {
                self.malformed_streak = 0;
                self.fetched += objects.len() as u64;
                let status = self.status;
                self.records
                    .extend(objects.into_iter().filter(|record| status.matches(record)));
            }
            _ => {
                self.malformed_streak += 1;
                if self.malformed_streak >= MAX_MALFORMED_PAGES {
                    return Err(ExportError::PaginationStalled {
                        pages: self.malformed_streak,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    pub fn expected_total(&self) -> u64 {
        self.expected_total
    }

    pub fn into_records(self) -> Vec<RemoteRecord> {
        self.records
    }
}
