//! File-backed document store implementing the project and user ports.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

use crate::identity::{
    domain::{NewUser, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use crate::project::{
    domain::{NewProject, Project, ProjectDetails, ProjectId, Task},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Default document file name.
pub const DEFAULT_FILE_NAME: &str = "db.json";

/// Failures reading or writing the document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Filesystem access failed.
    #[error("document i/o failed: {0}")]
    Io(#[from] io::Error),
    /// The document or one of its records is not valid JSON of the expected
    /// shape.
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The blocking worker did not complete.
    #[error("document worker failed: {0}")]
    Worker(String),
}

impl From<DocumentError> for ProjectRepositoryError {
    fn from(err: DocumentError) -> Self {
        Self::persistence(err)
    }
}

impl From<DocumentError> for UserRepositoryError {
    fn from(err: DocumentError) -> Self {
        Self::persistence(err)
    }
}

/// Top-level document; unknown collections are preserved.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    projects: Vec<Value>,
    #[serde(default)]
    users: Vec<Value>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

/// JSON document store rooted in a capability directory.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    dir: Arc<Dir>,
    file_name: Utf8PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonDocumentStore {
    /// Opens the document at `path`; its parent directory must exist.
    ///
    /// The file itself is created on first write.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the parent directory cannot be opened or
    /// the path has no file name.
    pub fn open(path: &Utf8Path) -> io::Result<Self> {
        let file_name = path
            .file_name()
            .ok_or_else(|| io::Error::other("document path must include a file name"))?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        Ok(Self::in_dir(dir, file_name))
    }

    /// Uses `file_name` inside an already opened directory.
    #[must_use]
    pub fn in_dir(dir: Dir, file_name: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir),
            file_name: file_name.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    async fn run<F, T, E>(&self, write_back: bool, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut Document) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<DocumentError> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let lock = Arc::clone(&self.lock);
        tokio::task::spawn_blocking(move || {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            let mut document = load(&dir, &file_name)?;
            let result = operation(&mut document)?;
            if write_back {
                save(&dir, &file_name, &document)?;
            }
            Ok(result)
        })
        .await
        .map_err(|err| E::from(DocumentError::Worker(err.to_string())))?
    }
}

fn load(dir: &Dir, file_name: &Utf8Path) -> Result<Document, DocumentError> {
    match dir.read_to_string(file_name) {
        Ok(contents) if contents.trim().is_empty() => Ok(Document::default()),
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Document::default()),
        Err(err) => Err(err.into()),
    }
}

fn save(dir: &Dir, file_name: &Utf8Path, document: &Document) -> Result<(), DocumentError> {
    let contents = serde_json::to_string_pretty(document)?;
    let staging = Utf8PathBuf::from(format!("{file_name}.tmp"));
    dir.write(&staging, contents)?;
    dir.rename(&staging, dir, file_name)?;
    Ok(())
}

/// Reads a record's `id` field as a typed identifier.
fn record_id<I: DeserializeOwned>(record: &Value) -> Option<I> {
    record
        .get("id")
        .and_then(|id| I::deserialize(id).ok())
}

fn username_of(record: &Value) -> Option<&str> {
    record.get("username").and_then(Value::as_str)
}

fn decode<T: DeserializeOwned>(record: &Value) -> Result<T, DocumentError> {
    Ok(T::deserialize(record)?)
}

fn encode<T: Serialize>(value: &T) -> Result<Value, DocumentError> {
    Ok(serde_json::to_value(value)?)
}

fn next_id<I: DeserializeOwned + Into<u64>>(records: &[Value]) -> u64 {
    records
        .iter()
        .filter_map(record_id::<I>)
        .map(Into::into)
        .max()
        .map_or(1, |last| last.saturating_add(1))
}

fn project_record(document: &mut Document, id: ProjectId) -> Option<&mut Map<String, Value>> {
    document
        .projects
        .iter_mut()
        .find(|record| record_id::<ProjectId>(record) == Some(id))
        .and_then(Value::as_object_mut)
}

#[async_trait]
impl ProjectRepository for JsonDocumentStore {
    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run(false, |document| {
            document
                .projects
                .iter()
                .map(|record| decode(record).map_err(ProjectRepositoryError::from))
                .collect()
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run(false, move |document| {
            document
                .projects
                .iter()
                .find(|record| record_id::<ProjectId>(record) == Some(id))
                .map(|record| decode(record).map_err(ProjectRepositoryError::from))
                .transpose()
        })
        .await
    }

    async fn store(&self, project: NewProject) -> ProjectRepositoryResult<Project> {
        self.run(true, move |document| {
            let id = ProjectId::new(next_id::<ProjectId>(&document.projects));
            let stored = project.into_project(id);
            document.projects.push(encode(&stored)?);
            Ok(stored)
        })
        .await
    }

    async fn update_details(
        &self,
        id: ProjectId,
        details: ProjectDetails,
    ) -> ProjectRepositoryResult<Project> {
        self.run(true, move |document| {
            let patch = encode(&details)?;
            let record =
                project_record(document, id).ok_or(ProjectRepositoryError::NotFound(id))?;
            if let Value::Object(fields) = patch {
                record.extend(fields);
            }
            Ok(decode(&Value::Object(record.clone()))?)
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.run(true, move |document| {
            let before = document.projects.len();
            document
                .projects
                .retain(|record| record_id::<ProjectId>(record) != Some(id));
            if document.projects.len() == before {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn update_tasks(&self, id: ProjectId, tasks: Vec<Task>) -> ProjectRepositoryResult<()> {
        self.run(true, move |document| {
            let encoded = encode(&tasks)?;
            let record =
                project_record(document, id).ok_or(ProjectRepositoryError::NotFound(id))?;
            record.insert("tasks".to_owned(), encoded);
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl UserRepository for JsonDocumentStore {
    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        self.run(false, |document| {
            document
                .users
                .iter()
                .map(|record| decode(record).map_err(UserRepositoryError::from))
                .collect()
        })
        .await
    }

    async fn find_by_username(&self, username: &str) -> UserRepositoryResult<Option<User>> {
        let wanted = username.to_owned();
        self.run(false, move |document| {
            document
                .users
                .iter()
                .find(|record| username_of(record) == Some(wanted.as_str()))
                .map(|record| decode(record).map_err(UserRepositoryError::from))
                .transpose()
        })
        .await
    }

    async fn store(&self, user: NewUser) -> UserRepositoryResult<User> {
        self.run(true, move |document| {
            let taken = document
                .users
                .iter()
                .any(|record| username_of(record) == Some(user.username.as_str()));
            if taken {
                return Err(UserRepositoryError::DuplicateUsername(user.username));
            }
            let id = UserId::new(next_id::<UserId>(&document.users));
            let stored = user.into_user(id);
            document.users.push(encode(&stored)?);
            Ok(stored)
        })
        .await
    }
}
