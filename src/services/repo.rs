//! Repository service
//!
//! Background worker that owns the [`Repository`] and answers requests over
//! mpsc channels. Every call runs on the blocking pool under a deadline, so a
//! hung store reports a timeout instead of freezing navigation.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use crate::logic::errors::TimedOut;
use crate::logic::jump;
use crate::logic::paste::{MoveCall, PastePlan};
use crate::model::tab::{JumpPlan, NavTicket};
use crate::model::types::{Column, TabId};
use crate::repo::{Item, ItemKind, Repository};

/// Priority level for repository requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,   // Navigation and mutations the user is waiting on
    Medium, // Reloads after a mutation
    Low,    // Preview and palette index
}

/// Which tabs a folder reload is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadScope {
    /// Only the tab that made the change
    Tab(TabId),
    /// Every tab showing the folder (paste)
    AllTabs,
}

/// Repository request types
#[derive(Debug, Clone)]
pub enum RepoRequest {
    /// Children for a root load or a descend
    LoadChildren {
        ticket: NavTicket,
        folder_id: Option<String>,
    },

    /// Rebuild a scoped stack for jump-to
    ResolveJump {
        ticket: NavTicket,
        base: Column,
        index: HashMap<String, Option<String>>,
        target_id: String,
    },

    /// Refresh every column showing a folder
    ReloadFolder {
        folder_id: Option<String>,
        scope: ReloadScope,
        /// Item to focus once the listing lands (newly created items)
        focus_id: Option<String>,
    },

    /// Children of the focused folder for the preview pane
    LoadPreview { tab_id: TabId, folder_id: String },

    /// Flat list of every item for the jump palette
    LoadIndex,

    Create {
        tab_id: TabId,
        kind: ItemKind,
        title: String,
        parent_id: Option<String>,
    },

    Rename {
        tab_id: TabId,
        item: Item,
        title: String,
    },

    Delete { tab_id: TabId, item: Item },

    Move { plan: PastePlan },
}

impl RepoRequest {
    /// Extract priority from request
    fn priority(&self) -> Priority {
        match self {
            RepoRequest::ReloadFolder { .. } => Priority::Medium,
            RepoRequest::LoadPreview { .. } | RepoRequest::LoadIndex => Priority::Low,
            _ => Priority::High,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            RepoRequest::LoadChildren { .. } => "get_children",
            RepoRequest::ResolveJump { .. } => "resolve_jump",
            RepoRequest::ReloadFolder { .. } => "reload",
            RepoRequest::LoadPreview { .. } => "preview",
            RepoRequest::LoadIndex => "list_all",
            RepoRequest::Create { .. } => "create",
            RepoRequest::Rename { .. } => "rename",
            RepoRequest::Delete { .. } => "delete",
            RepoRequest::Move { .. } => "move",
        }
    }
}

/// Repository response types
#[derive(Debug)]
pub enum RepoResponse {
    ChildrenLoaded {
        ticket: NavTicket,
        items: Result<Vec<Item>>,
        elapsed_ms: u64,
    },

    JumpResolved {
        ticket: NavTicket,
        plan: Result<Option<JumpPlan>>,
    },

    FolderReloaded {
        folder_id: Option<String>,
        scope: ReloadScope,
        focus_id: Option<String>,
        items: Result<Vec<Item>>,
    },

    PreviewLoaded {
        tab_id: TabId,
        folder_id: String,
        items: Result<Vec<Item>>,
    },

    IndexLoaded { items: Result<Vec<Item>> },

    Created {
        tab_id: TabId,
        parent_id: Option<String>,
        result: Result<Item>,
    },

    Renamed {
        tab_id: TabId,
        item: Item,
        title: String,
        result: Result<()>,
    },

    Deleted {
        tab_id: TabId,
        item: Item,
        result: Result<()>,
    },

    /// `Ok(true)` only when at least one item actually moved
    Moved { plan: PastePlan, result: Result<bool> },
}

/// Repository service worker that processes requests in the background
pub struct RepoService {
    repo: Arc<dyn Repository>,
    timeout: Duration,
    request_queue: VecDeque<(RepoRequest, Priority)>,
    in_flight: usize,
    response_tx: mpsc::UnboundedSender<RepoResponse>,
    completion_tx: mpsc::UnboundedSender<()>,
    max_concurrent: usize,
}

impl RepoService {
    pub fn new(
        repo: Arc<dyn Repository>,
        timeout: Duration,
        response_tx: mpsc::UnboundedSender<RepoResponse>,
        completion_tx: mpsc::UnboundedSender<()>,
    ) -> Self {
        Self {
            repo,
            timeout,
            request_queue: VecDeque::new(),
            in_flight: 0,
            response_tx,
            completion_tx,
            max_concurrent: 4, // SQLite serializes anyway
        }
    }

    /// Add a request to the queue
    fn enqueue(&mut self, request: RepoRequest) {
        let priority = request.priority();

        // Insert based on priority (high priority at front, FIFO within a level)
        let insert_pos = self
            .request_queue
            .iter()
            .position(|(_, p)| *p > priority)
            .unwrap_or(self.request_queue.len());

        self.request_queue.insert(insert_pos, (request, priority));
    }

    /// Process the next request from the queue
    fn process_next(&mut self) {
        if self.in_flight >= self.max_concurrent {
            return; // At capacity, wait for some to complete
        }

        let Some((request, _)) = self.request_queue.pop_front() else {
            return; // Queue is empty
        };
        self.in_flight += 1;

        let repo = Arc::clone(&self.repo);
        let timeout = self.timeout;
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let name = request.name();
            let started = Instant::now();
            let response = Self::execute_request(repo, timeout, request).await;
            tracing::debug!("repo {} finished in {:?}", name, started.elapsed());

            let _ = response_tx.send(response);
            let _ = completion_tx.send(());
        });
    }

    /// Execute a request and return the response
    async fn execute_request(repo: Arc<dyn Repository>, timeout: Duration, request: RepoRequest) -> RepoResponse {
        match request {
            RepoRequest::LoadChildren { ticket, folder_id } => {
                let started = Instant::now();
                let items = call(&repo, timeout, "get_children", move |r| {
                    r.get_children(folder_id.as_deref())
                })
                .await;
                RepoResponse::ChildrenLoaded {
                    ticket,
                    items,
                    elapsed_ms: started.elapsed().as_millis() as u64,
                }
            }

            RepoRequest::ResolveJump {
                ticket,
                base,
                index,
                target_id,
            } => {
                let plan = call(&repo, timeout, "resolve_jump", move |r| {
                    jump::plan_jump(r, &index, &base, &target_id)
                })
                .await;
                RepoResponse::JumpResolved { ticket, plan }
            }

            RepoRequest::ReloadFolder {
                folder_id,
                scope,
                focus_id,
            } => {
                let key = folder_id.clone();
                let items = call(&repo, timeout, "get_children", move |r| r.get_children(key.as_deref())).await;
                RepoResponse::FolderReloaded {
                    folder_id,
                    scope,
                    focus_id,
                    items,
                }
            }

            RepoRequest::LoadPreview { tab_id, folder_id } => {
                let key = folder_id.clone();
                let items = call(&repo, timeout, "get_children", move |r| r.get_children(Some(&key))).await;
                RepoResponse::PreviewLoaded {
                    tab_id,
                    folder_id,
                    items,
                }
            }

            RepoRequest::LoadIndex => {
                let items = call(&repo, timeout, "list_all", |r| r.list_all()).await;
                RepoResponse::IndexLoaded { items }
            }

            RepoRequest::Create {
                tab_id,
                kind,
                title,
                parent_id,
            } => {
                let parent = parent_id.clone();
                let result = call(&repo, timeout, "create", move |r| {
                    r.create(kind, &title, parent.as_deref())
                })
                .await;
                RepoResponse::Created {
                    tab_id,
                    parent_id,
                    result,
                }
            }

            RepoRequest::Rename { tab_id, item, title } => {
                let (id, kind, new_title) = (item.id.clone(), item.kind, title.clone());
                let result = call(&repo, timeout, "rename", move |r| r.rename(kind, &id, &new_title)).await;
                RepoResponse::Renamed {
                    tab_id,
                    item,
                    title,
                    result,
                }
            }

            RepoRequest::Delete { tab_id, item } => {
                let (id, kind) = (item.id.clone(), item.kind);
                let result = call(&repo, timeout, "delete", move |r| r.delete(kind, &id)).await;
                RepoResponse::Deleted { tab_id, item, result }
            }

            RepoRequest::Move { plan } => {
                let call_plan = plan.call.clone();
                let target = plan.target.clone();
                let result = call(&repo, timeout, "move", move |r| match call_plan {
                    MoveCall::None => Ok(false),
                    MoveCall::Single { id, kind } => r.move_item(&id, kind, target.as_deref()),
                    MoveCall::Batch(items) => {
                        let outcome = r.move_items(&items, target.as_deref())?;
                        Ok(!outcome.moved.is_empty())
                    }
                })
                .await;
                RepoResponse::Moved { plan, result }
            }
        }
    }
}

/// Run one repository call on the blocking pool with a deadline
async fn call<T, F>(repo: &Arc<dyn Repository>, timeout: Duration, operation: &'static str, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn Repository) -> Result<T> + Send + 'static,
{
    let repo = Arc::clone(repo);
    let task = tokio::task::spawn_blocking(move || f(repo.as_ref()));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(anyhow::anyhow!("{} worker failed: {}", operation, join_err)),
        Err(_) => {
            tracing::warn!("repo {} timed out after {:?}", operation, timeout);
            Err(anyhow::Error::new(TimedOut {
                operation,
                after_ms: timeout.as_millis() as u64,
            }))
        }
    }
}

/// Spawn the repository service worker
pub fn spawn_repo_service(
    repo: Arc<dyn Repository>,
    timeout: Duration,
) -> (
    mpsc::UnboundedSender<RepoRequest>,
    mpsc::UnboundedReceiver<RepoResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<RepoRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<RepoResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<()>();

    tokio::spawn(async move {
        let mut service = RepoService::new(repo, timeout, response_tx, completion_tx);

        // Ticker for processing queue
        let mut tick = interval(Duration::from_millis(5));

        loop {
            tokio::select! {
                request = request_rx.recv() => {
                    match request {
                        Some(request) => service.enqueue(request),
                        // App dropped its sender: shut down
                        None => break,
                    }
                }

                Some(()) = completion_rx.recv() => {
                    service.in_flight = service.in_flight.saturating_sub(1);
                }

                _ = tick.tick() => {
                    while !service.request_queue.is_empty() && service.in_flight < service.max_concurrent {
                        service.process_next();
                    }
                }
            }
        }
    });

    (request_tx, response_rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::errors::{classify_error, ErrorKind};
    use crate::model::tab::NavKind;
    use crate::repo::MoveOutcome;
    use crate::store::{seed_demo_tree, NoteStore};

    fn seeded() -> Arc<dyn Repository> {
        let store = NoteStore::new_in_memory().unwrap();
        seed_demo_tree(&store).unwrap();
        Arc::new(store)
    }

    fn ticket(seq: u64) -> NavTicket {
        NavTicket {
            tab_id: 1,
            seq,
            kind: NavKind::Root,
        }
    }

    /// Store that never answers in time
    struct SlowRepo;

    impl Repository for SlowRepo {
        fn get_children(&self, _folder_id: Option<&str>) -> Result<Vec<Item>> {
            std::thread::sleep(std::time::Duration::from_millis(300));
            Ok(vec![])
        }
        fn list_all(&self) -> Result<Vec<Item>> {
            Ok(vec![])
        }
        fn create_note(&self, _title: &str, _parent_id: Option<&str>) -> Result<Item> {
            anyhow::bail!("read-only")
        }
        fn create_folder(&self, _title: &str, _parent_id: Option<&str>) -> Result<Item> {
            anyhow::bail!("read-only")
        }
        fn rename_note(&self, _id: &str, _new_title: &str) -> Result<()> {
            Ok(())
        }
        fn rename_folder(&self, _id: &str, _new_title: &str) -> Result<()> {
            Ok(())
        }
        fn delete_note(&self, _id: &str) -> Result<()> {
            Ok(())
        }
        fn delete_folder(&self, _id: &str) -> Result<()> {
            Ok(())
        }
        fn move_item(&self, _id: &str, _kind: ItemKind, _new_parent_id: Option<&str>) -> Result<bool> {
            Ok(false)
        }
        fn move_items(&self, _items: &[(String, ItemKind)], _new_parent_id: Option<&str>) -> Result<MoveOutcome> {
            Ok(MoveOutcome::default())
        }
    }

    #[test]
    fn test_priority_ordering() {
        let (response_tx, _response_rx) = mpsc::unbounded_channel();
        let (completion_tx, _completion_rx) = mpsc::unbounded_channel();
        let mut service = RepoService::new(seeded(), Duration::from_secs(1), response_tx, completion_tx);

        service.enqueue(RepoRequest::LoadIndex);
        service.enqueue(RepoRequest::ReloadFolder {
            folder_id: None,
            scope: ReloadScope::AllTabs,
            focus_id: None,
        });
        service.enqueue(RepoRequest::LoadChildren {
            ticket: ticket(1),
            folder_id: None,
        });
        service.enqueue(RepoRequest::LoadChildren {
            ticket: ticket(2),
            folder_id: None,
        });

        let order: Vec<_> = service.request_queue.iter().map(|(r, _)| r.name()).collect();
        assert_eq!(order, vec!["get_children", "get_children", "reload", "list_all"]);
        assert!(matches!(
            &service.request_queue[0].0,
            RepoRequest::LoadChildren { ticket, .. } if ticket.seq == 1
        ));
    }

    #[tokio::test]
    async fn test_load_children_round_trip() {
        let (tx, mut rx) = spawn_repo_service(seeded(), Duration::from_secs(5));
        tx.send(RepoRequest::LoadChildren {
            ticket: ticket(7),
            folder_id: Some("1".to_string()),
        })
        .unwrap();

        match rx.recv().await.unwrap() {
            RepoResponse::ChildrenLoaded { ticket, items, .. } => {
                assert_eq!(ticket.seq, 7);
                let titles: Vec<_> = items.unwrap().into_iter().map(|i| i.title).collect();
                assert_eq!(titles, vec!["Personal", "Work"]);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_move_into_same_folder_is_no_call() {
        let (tx, mut rx) = spawn_repo_service(seeded(), Duration::from_secs(5));
        let plan = PastePlan {
            target: Some("2".to_string()),
            call: MoveCall::None,
            affected: Default::default(),
        };
        tx.send(RepoRequest::Move { plan }).unwrap();

        match rx.recv().await.unwrap() {
            RepoResponse::Moved { result, .. } => assert!(!result.unwrap()),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_batch_move_reports_refused() {
        // SlowRepo moves nothing, so `moved` comes back empty
        let (tx, mut rx) = spawn_repo_service(Arc::new(SlowRepo), Duration::from_secs(5));
        let plan = PastePlan {
            target: Some("dst".to_string()),
            call: MoveCall::Batch(vec![("a".to_string(), ItemKind::Note), ("b".to_string(), ItemKind::Note)]),
            affected: Default::default(),
        };
        tx.send(RepoRequest::Move { plan }).unwrap();

        match rx.recv().await.unwrap() {
            RepoResponse::Moved { result, .. } => assert!(!result.unwrap()),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_hung_call_times_out() {
        let (tx, mut rx) = spawn_repo_service(Arc::new(SlowRepo), Duration::from_millis(20));
        tx.send(RepoRequest::LoadChildren {
            ticket: ticket(1),
            folder_id: None,
        })
        .unwrap();

        match rx.recv().await.unwrap() {
            RepoResponse::ChildrenLoaded { items, .. } => {
                let err = items.unwrap_err();
                assert_eq!(classify_error(&err, ErrorKind::Fetch), ErrorKind::Timeout);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
