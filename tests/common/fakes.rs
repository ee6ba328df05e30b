use async_trait::async_trait;
use kanri_lib::application::error::RemoteError;
use kanri_lib::application::ports::{MutationNotifier, RemoteResourceClient};
use kanri_lib::domain::entities::{Notification, Resource};
use kanri_lib::domain::value_objects::{DurableId, QueryKey};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

/// 応答を返すタイミングをテスト側で制御するためのゲート
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn open(self) {
        let _ = self.0.send(());
    }
}

struct Reply<T> {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<T, RemoteError>,
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, RemoteError> {
        if let Some(gate) = self.gate {
            let _ = gate.await;
        }
        self.result
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(String),
    Create(String),
    Update(String),
    Delete(String),
    Reorder(Vec<String>),
}

type Queue<T> = Mutex<VecDeque<Reply<T>>>;

/// 事前に積んだ応答を順に返す [`RemoteResourceClient`]
pub struct ScriptedClient<R: Resource> {
    lists: Queue<Vec<R>>,
    creates: Queue<R>,
    updates: Queue<R>,
    deletes: Queue<()>,
    reorders: Queue<()>,
    calls: Mutex<Vec<Call>>,
}

fn push<T>(queue: &Queue<T>, result: Result<T, RemoteError>, gated: bool) -> Option<Gate> {
    let (gate, receiver) = if gated {
        let (tx, rx) = oneshot::channel();
        (Some(Gate(tx)), Some(rx))
    } else {
        (None, None)
    };
    queue.lock().unwrap().push_back(Reply {
        gate: receiver,
        result,
    });
    gate
}

fn pop<T>(queue: &Queue<T>, method: &str) -> Reply<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| panic!("unexpected {method} call"))
}

impl<R: Resource> ScriptedClient<R> {
    pub fn new() -> Self {
        Self {
            lists: Mutex::new(VecDeque::new()),
            creates: Mutex::new(VecDeque::new()),
            updates: Mutex::new(VecDeque::new()),
            deletes: Mutex::new(VecDeque::new()),
            reorders: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_list(&self, result: Result<Vec<R>, RemoteError>) {
        push(&self.lists, result, false);
    }

    pub fn on_create(&self, result: Result<R, RemoteError>) {
        push(&self.creates, result, false);
    }

    pub fn on_create_gated(&self, result: Result<R, RemoteError>) -> Gate {
        push(&self.creates, result, true).unwrap()
    }

    pub fn on_update(&self, result: Result<R, RemoteError>) {
        push(&self.updates, result, false);
    }

    pub fn on_update_gated(&self, result: Result<R, RemoteError>) -> Gate {
        push(&self.updates, result, true).unwrap()
    }

    pub fn on_delete(&self, result: Result<(), RemoteError>) {
        push(&self.deletes, result, false);
    }

    pub fn on_delete_gated(&self, result: Result<(), RemoteError>) -> Gate {
        push(&self.deletes, result, true).unwrap()
    }

    pub fn on_reorder(&self, result: Result<(), RemoteError>) {
        push(&self.reorders, result, false);
    }

    pub fn on_reorder_gated(&self, result: Result<(), RemoteError>) -> Gate {
        push(&self.reorders, result, true).unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl<R: Resource> RemoteResourceClient<R> for ScriptedClient<R> {
    async fn list(&self, key: &QueryKey) -> Result<Vec<R>, RemoteError> {
        self.record(Call::List(key.to_string()));
        pop(&self.lists, "list").resolve().await
    }

    async fn create(&self, key: &QueryKey, _draft: &R::Draft) -> Result<R, RemoteError> {
        self.record(Call::Create(key.to_string()));
        pop(&self.creates, "create").resolve().await
    }

    async fn update(&self, id: &DurableId, _patch: &R::Patch) -> Result<R, RemoteError> {
        self.record(Call::Update(id.as_str().to_string()));
        pop(&self.updates, "update").resolve().await
    }

    async fn delete(&self, id: &DurableId) -> Result<(), RemoteError> {
        self.record(Call::Delete(id.as_str().to_string()));
        pop(&self.deletes, "delete").resolve().await
    }

    async fn reorder(&self, _key: &QueryKey, ordered_ids: &[DurableId]) -> Result<(), RemoteError> {
        self.record(Call::Reorder(
            ordered_ids.iter().map(|id| id.as_str().to_string()).collect(),
        ));
        pop(&self.reorders, "reorder").resolve().await
    }
}

/// 受け取った通知を記録する
#[derive(Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.received.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.all().into_iter().filter(|n| n.is_error()).collect()
    }

    pub fn successes(&self) -> Vec<Notification> {
        self.all().into_iter().filter(|n| !n.is_error()).collect()
    }

    pub fn count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

impl MutationNotifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.received.lock().unwrap().push(notification.clone());
    }
}
