use crate::errors::AppError;
use crate::models::OpenEvent;
use std::{
    env,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs, sync::Mutex};
use tracing::{error, info};

pub fn resolve_data_path() -> PathBuf {
    env::var("TRACK_DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/email-opens.json"))
}

/// Flat-file store for the full open-event sequence. Every write rewrites
/// the whole file; the mutex serializes writers so concurrent requests
/// cannot drop each other's appends.
#[derive(Clone)]
pub struct EventStore {
    path: PathBuf,
    events: Arc<Mutex<Vec<OpenEvent>>>,
}

impl EventStore {
    pub async fn open(path: PathBuf) -> Self {
        if !fs::try_exists(&path).await.unwrap_or(false) {
            info!("creating tracking file at {}", path.display());
            if let Err(err) = persist_events(&path, &[]).await {
                error!("failed to create tracking file: {}", err.message);
            }
        }
        let events = load_events(&path).await;
        Self {
            path,
            events: Arc::new(Mutex::new(events)),
        }
    }

    pub async fn snapshot(&self) -> Vec<OpenEvent> {
        self.events.lock().await.clone()
    }

    pub async fn append(&self, event: OpenEvent) -> Result<(), AppError> {
        let mut events = self.events.lock().await;
        events.push(event);
        persist_events(&self.path, &events).await
    }

    pub async fn replace_all(&self, new_events: Vec<OpenEvent>) -> Result<(), AppError> {
        let mut events = self.events.lock().await;
        *events = new_events;
        persist_events(&self.path, &events).await
    }

    pub async fn reset(&self) -> Result<(), AppError> {
        self.replace_all(Vec::new()).await
    }
}

async fn load_events(path: &Path) -> Vec<OpenEvent> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(events) => events,
            Err(err) => {
                error!("failed to parse tracking file: {err}");
                Vec::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(err) => {
            error!("failed to read tracking file: {err}");
            Vec::new()
        }
    }
}

async fn persist_events(path: &Path, events: &[OpenEvent]) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(events).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn temp_path() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "email_tracker_store_{}_{}.json",
            std::process::id(),
            nanos
        ));
        path
    }

    fn sample_event(email: &str) -> OpenEvent {
        OpenEvent {
            email: email.to_string(),
            user: "Test User".to_string(),
            newsletter: "weekly-digest".to_string(),
            timestamp: Utc::now(),
            ip: "10.0.0.1".to_string(),
            user_agent: "test-agent".to_string(),
        }
    }

    #[tokio::test]
    async fn replace_all_round_trips_through_the_file() {
        let path = temp_path();
        let events = vec![sample_event("a@co.com"), sample_event("b@co.com")];

        let store = EventStore::open(path.clone()).await;
        store.replace_all(events.clone()).await.unwrap();

        let reopened = EventStore::open(path.clone()).await;
        assert_eq!(reopened.snapshot().await, events);

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn append_extends_the_sequence_in_order() {
        let path = temp_path();
        let store = EventStore::open(path.clone()).await;

        store.append(sample_event("a@co.com")).await.unwrap();
        store.append(sample_event("b@co.com")).await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].email, "a@co.com");
        assert_eq!(snapshot[1].email, "b@co.com");

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let path = temp_path();
        let store = EventStore::open(path.clone()).await;
        store.append(sample_event("a@co.com")).await.unwrap();

        store.reset().await.unwrap();
        assert!(store.snapshot().await.is_empty());
        store.reset().await.unwrap();
        assert!(store.snapshot().await.is_empty());

        let reopened = EventStore::open(path.clone()).await;
        assert!(reopened.snapshot().await.is_empty());

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn unreadable_file_loads_as_empty_store() {
        let path = temp_path();
        fs::write(&path, b"not json").await.unwrap();

        let store = EventStore::open(path.clone()).await;
        assert!(store.snapshot().await.is_empty());

        let _ = fs::remove_file(&path).await;
    }
}
