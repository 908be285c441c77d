use std::{
    cmp::Ordering,
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde_valid::Validate;
use tracing::{debug, error, info, warn};

use super::{Lesson, LessonError, LessonResult};

/// Lessons loaded once at startup, keyed by id
#[derive(Debug, Clone, Default)]
pub struct LessonStore {
    lessons: HashMap<String, Lesson>,
}

impl LessonStore {
    /// Load every `*.json` file in `dir`.
    ///
    /// Files that fail to parse or validate are logged and skipped, as are
    /// files repeating an id that was already loaded. A missing directory is
    /// an error.
    pub fn load(dir: impl AsRef<Path>) -> LessonResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(LessonError::DirectoryNotFound(dir.to_path_buf()));
        }

        let pattern = dir.join("*.json");
        let mut store = Self::default();
        for entry in glob::glob(&pattern.to_string_lossy())? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable lesson entry: {}", e);
                    continue;
                }
            };

            match Self::load_file(&path).and_then(|lesson| store.insert(lesson, &path)) {
                Ok(()) => {}
                Err(e) => error!("Failed to load lesson: {}", e),
            }
        }

        info!("Loaded {} lessons from {}", store.len(), dir.display());
        Ok(store)
    }

    /// Build a store from lessons already in memory. Later duplicates are dropped.
    pub fn from_lessons(lessons: impl IntoIterator<Item = Lesson>) -> Self {
        let mut store = Self::default();
        for lesson in lessons {
            if let Err(e) = store.insert(lesson, Path::new("<memory>")) {
                warn!("{}", e);
            }
        }
        store
    }

    /// Parse and validate a single lesson file
    pub fn load_file(path: impl AsRef<Path>) -> LessonResult<Lesson> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LessonError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lesson: Lesson =
            serde_json::from_str(&content).map_err(|source| LessonError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        lesson.validate().map_err(|e| LessonError::Invalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!(
            "Parsed lesson {} ({} tests) from {}",
            lesson.id,
            lesson.tests.len(),
            path.display()
        );
        Ok(lesson)
    }

    fn insert(&mut self, lesson: Lesson, path: &Path) -> LessonResult<()> {
        if self.lessons.contains_key(&lesson.id) {
            return Err(LessonError::Duplicate {
                id: lesson.id,
                path: PathBuf::from(path),
            });
        }
        self.lessons.insert(lesson.id.clone(), lesson);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Lesson> {
        self.lessons.get(id)
    }

    /// Like [`get`](Self::get), but with a not-found error
    pub fn require(&self, id: &str) -> LessonResult<&Lesson> {
        self.get(id)
            .ok_or_else(|| LessonError::NotFound(id.to_string()))
    }

    /// All lessons, numeric ids first in numeric order, then the rest by string
    pub fn list(&self) -> Vec<&Lesson> {
        let mut lessons: Vec<&Lesson> = self.lessons.values().collect();
        lessons.sort_by(|a, b| natural_cmp(&a.id, &b.id));
        lessons
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

fn natural_cmp(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
