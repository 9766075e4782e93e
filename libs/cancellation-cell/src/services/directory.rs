// libs/cancellation-cell/src/services/directory.rs
use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info};

use shared_config::SearchTuning;
use shared_meevo::{ClientRecord, MeevoClient};
use shared_utils::phone::normalize_phone;

use crate::models::LinkedProfile;

/// Page ranges scanned when hunting for linked profiles, in priority order.
/// Recently created clients cluster at the high page numbers, and minors and
/// guests are usually added after the guardian's own record.
const LINKED_PAGE_RANGES: [(u32, u32); 4] = [(150, 200), (100, 150), (50, 100), (1, 50)];

const LINKED_PAGES_PER_BATCH: u32 = 10;
const DETAIL_FETCH_CHUNK: usize = 50;

/// Lookups against the Meevo client directory.
///
/// The directory has no query-by-phone or query-by-guardian endpoint, so both
/// operations enumerate list pages in concurrent batches. Every page fetch is
/// best-effort: a timeout or remote error yields an empty page instead of
/// failing the scan.
pub struct ClientDirectoryService {
    meevo: Arc<MeevoClient>,
    tuning: SearchTuning,
}

impl ClientDirectoryService {
    pub fn new(meevo: Arc<MeevoClient>, tuning: SearchTuning) -> Self {
        Self { meevo, tuning }
    }

    async fn fetch_page(&self, token: &str, page: u32) -> Vec<ClientRecord> {
        match self
            .meevo
            .list_clients_page(token, page, self.tuning.items_per_page)
            .await
        {
            Ok(records) => records,
            Err(e) => {
                debug!("Directory page {} treated as empty: {}", page, e);
                Vec::new()
            }
        }
    }

    /// Scan the directory for a client whose normalized phone or lowercased
    /// email matches. Stops at the first match, when an entire batch of pages
    /// comes back empty, or after `max_batches` batches.
    pub async fn find_client(
        &self,
        token: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Option<ClientRecord> {
        let wanted_phone = phone.map(normalize_phone).filter(|p| !p.is_empty());
        let wanted_email = email.map(str::to_lowercase).filter(|e| !e.is_empty());

        if wanted_phone.is_none() && wanted_email.is_none() {
            return None;
        }

        for batch in 0..self.tuning.max_batches {
            let start_page = batch * self.tuning.pages_per_batch + 1;
            let fetches =
                (0..self.tuning.pages_per_batch).map(|i| self.fetch_page(token, start_page + i));
            let pages = join_all(fetches).await;

            let mut empty_pages = 0;
            for page in &pages {
                if page.is_empty() {
                    empty_pages += 1;
                }

                for record in page {
                    if let Some(wanted) = &wanted_phone {
                        let candidate = record
                            .primary_phone_number
                            .as_deref()
                            .map(normalize_phone)
                            .unwrap_or_default();
                        if &candidate == wanted {
                            info!("Found client by phone: {}", record.display_name());
                            return Some(record.clone());
                        }
                    }

                    if let Some(wanted) = &wanted_email {
                        let candidate = record.email_address.as_deref().map(str::to_lowercase);
                        if candidate.as_deref() == Some(wanted.as_str()) {
                            info!("Found client by email: {}", record.display_name());
                            return Some(record.clone());
                        }
                    }
                }
            }

            // A fully empty batch is the end of the directory.
            if empty_pages == self.tuning.pages_per_batch {
                break;
            }
        }

        None
    }

    /// Cheap discriminator for a dependent (minor/guest) profile: the list
    /// view carries no guardian reference, but dependents are booked through
    /// the guardian and have no phone number of their own.
    pub fn is_linked_candidate(record: &ClientRecord) -> bool {
        record
            .primary_phone_number
            .as_deref()
            .map_or(true, str::is_empty)
    }

    /// Find client records whose detail view points back at `guardian_id`.
    ///
    /// Two-phase scan: list pages are filtered with [`Self::is_linked_candidate`]
    /// to bound the number of detail fetches, then candidates are detail-fetched
    /// in concurrent chunks since only the detail view exposes the guardian id.
    /// An empty result is not an error.
    pub async fn find_linked_profiles(&self, token: &str, guardian_id: &str) -> Vec<LinkedProfile> {
        let mut linked: Vec<LinkedProfile> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        debug!("Finding linked profiles for guardian {}", guardian_id);

        for (range_start, range_end) in LINKED_PAGE_RANGES {
            let mut batch_start = range_start;

            while batch_start < range_end {
                let pages: Vec<u32> = (batch_start..batch_start + LINKED_PAGES_PER_BATCH)
                    .filter(|page| *page <= range_end)
                    .collect();
                let results = join_all(pages.iter().map(|page| self.fetch_page(token, *page))).await;

                let mut empty_pages = 0;
                let mut candidates: Vec<ClientRecord> = Vec::new();

                for page in &results {
                    if page.is_empty() {
                        empty_pages += 1;
                        continue;
                    }

                    for record in page {
                        if seen.contains(&record.client_id) {
                            continue;
                        }
                        if Self::is_linked_candidate(record) {
                            candidates.push(record.clone());
                        }
                    }
                }

                for chunk in candidates.chunks(DETAIL_FETCH_CHUNK) {
                    let details = join_all(chunk.iter().map(|candidate| async {
                        self.meevo
                            .get_client_detail(token, &candidate.client_id)
                            .await
                            .ok()
                    }))
                    .await;

                    for detail in details.into_iter().flatten() {
                        if !seen.insert(detail.client_id.clone()) {
                            continue;
                        }

                        if detail.guardian_id.as_deref() == Some(guardian_id) {
                            info!(
                                "Found linked profile: {} {}",
                                detail.first_name, detail.last_name
                            );
                            linked.push(LinkedProfile {
                                client_id: detail.client_id.clone(),
                                first_name: detail.first_name.clone(),
                                last_name: detail.last_name.clone(),
                                name: format!("{} {}", detail.first_name, detail.last_name),
                            });
                        }
                    }
                }

                if empty_pages >= LINKED_PAGES_PER_BATCH {
                    break;
                }
                batch_start += LINKED_PAGES_PER_BATCH;
            }

            // A hit anywhere in a range ends the scan; dependents of one
            // guardian cluster together.
            if !linked.is_empty() {
                break;
            }
        }

        linked
    }
}
