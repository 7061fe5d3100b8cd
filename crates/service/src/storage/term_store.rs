use std::{
    collections::HashMap,
    future::Future,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::model::Term;

/// Search rank for terms whose name does not contain the query. Name hits
/// rank by the character position of the first occurrence.
const NO_NAME_MATCH: usize = usize::MAX;

/// On-disk document: `{"terms": [...]}`.
#[derive(Deserialize)]
struct TermDocument {
    #[serde(default)]
    terms: Vec<Term>,
}

#[derive(Serialize)]
struct TermDocumentRef<'a> {
    terms: Vec<&'a Term>,
}

/// JSON file-backed term collection.
///
/// The whole collection lives in memory and is rewritten to disk on every
/// mutation, sorted by lowercased name so the file is stable across runs.
/// One mutex guards the map and the file; every operation holds it for its
/// full duration, file write included, so operations are linearized.
///
/// Mutations run on a task owned by the store. A caller that stops polling
/// midway (a dropped request) does not interrupt the write or its rollback.
pub struct TermStore {
    terms: Arc<Mutex<HashMap<String, Term>>>,
    file_path: PathBuf,
}

impl TermStore {
    /// Open the store at `path`. Creates the parent directory and an empty
    /// document if the file is missing; a file that does not parse is an error.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(format!("create {}: {e}", parent.display())))?;
        }

        let terms = match fs::read(&file_path).await {
            Ok(bytes) => decode(&file_path, &bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let empty = HashMap::new();
                write_document(&file_path, &empty).await?;
                info!(path = %file_path.display(), "created empty term file");
                empty
            }
            Err(e) => return Err(load_error(&file_path, e)),
        };

        info!(path = %file_path.display(), count = terms.len(), "term store opened");
        Ok(Arc::new(Self { terms: Arc::new(Mutex::new(terms)), file_path }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub async fn len(&self) -> usize {
        self.terms.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.terms.lock().await.is_empty()
    }

    /// All terms ordered by lowercased name, then id.
    pub async fn list(&self) -> Vec<Term> {
        let terms = self.terms.lock().await;
        sorted(&terms).into_iter().cloned().collect()
    }

    pub async fn get(&self, id: &str) -> Option<Term> {
        let terms = self.terms.lock().await;
        terms.get(id).cloned()
    }

    /// Insert or wholesale-replace a term and persist.
    ///
    /// An empty id is replaced by a fresh UUID. If the write fails the map is
    /// restored to its previous state and the error is returned.
    pub async fn upsert(&self, term: Term) -> Result<Term, ServiceError> {
        term.validate()?;
        let terms = Arc::clone(&self.terms);
        let path = self.file_path.clone();
        detached(async move {
            let mut terms = terms.lock().await;
            upsert_locked(&mut terms, &path, term).await
        })
        .await
    }

    /// Remove a term and strip its id from every other term's `related_ids`.
    ///
    /// Returns `false` without touching the file when the id is unknown.
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let terms = Arc::clone(&self.terms);
        let path = self.file_path.clone();
        let id = id.to_string();
        detached(async move {
            let mut terms = terms.lock().await;
            delete_locked(&mut terms, &path, &id).await
        })
        .await
    }

    /// Case-insensitive substring search over name, definition and tags.
    ///
    /// Hits whose name contains the query come first, earliest match first;
    /// body-only hits follow. Ties break on lowercased name, then id. At most
    /// `max(limit, 1)` results are returned; a blank query returns nothing.
    pub async fn search(&self, query: &str, limit: i64) -> Vec<Term> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let limit = usize::try_from(limit.max(1)).unwrap_or(usize::MAX);

        let terms = self.terms.lock().await;
        let mut hits: Vec<(usize, String, &Term)> = terms
            .values()
            .filter_map(|t| {
                let haystack =
                    format!("{}\n{}\n{}", t.term, t.definition, t.tags.join(" ")).to_lowercase();
                if !haystack.contains(&needle) {
                    return None;
                }
                let name = t.sort_name();
                let rank = name
                    .find(&needle)
                    .map(|byte| name[..byte].chars().count())
                    .unwrap_or(NO_NAME_MATCH);
                Some((rank, name, t))
            })
            .collect();

        hits.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| a.1.cmp(&b.1))
                .then_with(|| a.2.id.cmp(&b.2.id))
        });
        hits.into_iter().take(limit).map(|(_, _, t)| t.clone()).collect()
    }

    /// Rewrite the file from the in-memory collection.
    pub async fn flush(&self) -> Result<(), ServiceError> {
        let terms = Arc::clone(&self.terms);
        let path = self.file_path.clone();
        detached(async move {
            let terms = terms.lock().await;
            write_document(&path, &terms).await?;
            debug!(path = %path.display(), count = terms.len(), "term store flushed");
            Ok(())
        })
        .await
    }
}

/// Run `op` on its own task and wait for it. Dropping the returned future
/// leaves the task running to completion.
async fn detached<T, F>(op: F) -> Result<T, ServiceError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, ServiceError>> + Send + 'static,
{
    tokio::spawn(op)
        .await
        .map_err(|e| ServiceError::Storage(format!("store task failed: {e}")))?
}

async fn upsert_locked(
    terms: &mut HashMap<String, Term>,
    path: &Path,
    mut term: Term,
) -> Result<Term, ServiceError> {
    if term.id.is_empty() {
        term.id = fresh_id(terms);
    }

    let previous = terms.insert(term.id.clone(), term.clone());
    if let Err(e) = write_document(path, terms).await {
        match previous {
            Some(prev) => terms.insert(prev.id.clone(), prev),
            None => terms.remove(&term.id),
        };
        error!(id = %term.id, error = %e, "persist failed; upsert rolled back");
        return Err(e);
    }

    debug!(id = %term.id, replaced = previous.is_some(), "term upserted");
    Ok(term)
}

async fn delete_locked(
    terms: &mut HashMap<String, Term>,
    path: &Path,
    id: &str,
) -> Result<bool, ServiceError> {
    if !terms.contains_key(id) {
        return Ok(false);
    }

    let snapshot = terms.clone();
    terms.remove(id);
    let mut unlinked = 0usize;
    for t in terms.values_mut() {
        let before = t.related_ids.len();
        t.related_ids.retain(|rid| rid != id);
        if t.related_ids.len() != before {
            unlinked += 1;
        }
    }

    if let Err(e) = write_document(path, terms).await {
        *terms = snapshot;
        error!(%id, error = %e, "persist failed; delete rolled back");
        return Err(e);
    }

    debug!(%id, unlinked, "term deleted");
    Ok(true)
}

fn fresh_id(terms: &HashMap<String, Term>) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !terms.contains_key(&id) {
            return id;
        }
    }
}

fn sorted(terms: &HashMap<String, Term>) -> Vec<&Term> {
    let mut list: Vec<&Term> = terms.values().collect();
    list.sort_by_cached_key(|t| (t.sort_name(), t.id.clone()));
    list
}

fn load_error(path: &Path, reason: impl std::fmt::Display) -> ServiceError {
    ServiceError::Load { path: path.display().to_string(), reason: reason.to_string() }
}

fn decode(path: &Path, bytes: &[u8]) -> Result<HashMap<String, Term>, ServiceError> {
    let doc: TermDocument = serde_json::from_slice(bytes).map_err(|e| load_error(path, e))?;
    let mut terms = HashMap::with_capacity(doc.terms.len());
    for (idx, term) in doc.terms.into_iter().enumerate() {
        if term.id.is_empty() {
            return Err(load_error(path, format!("terms[{idx}] has an empty id")));
        }
        term.validate()
            .map_err(|e| load_error(path, format!("terms[{idx}] ({}): {}", term.id, e.message())))?;
        if terms.contains_key(&term.id) {
            return Err(load_error(path, format!("terms[{idx}] repeats id {}", term.id)));
        }
        terms.insert(term.id.clone(), term);
    }
    Ok(terms)
}

/// Serialize the sorted collection and swap it in via a temp file + rename.
async fn write_document(path: &Path, terms: &HashMap<String, Term>) -> Result<(), ServiceError> {
    let doc = TermDocumentRef { terms: sorted(terms) };
    let mut data = serde_json::to_vec_pretty(&doc).map_err(|e| ServiceError::Storage(e.to_string()))?;
    data.push(b'\n');

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, &data)
        .await
        .map_err(|e| ServiceError::Storage(format!("write {}: {e}", tmp.display())))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| ServiceError::Storage(format!("rename onto {}: {e}", path.display())))?;
    Ok(())
}
