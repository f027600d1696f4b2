//! Test utilities for the evaluations crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The crate avoids direct `std::fs` calls. These helpers build on
    //! `cap_std::fs::Dir` so test suites share consistent file access.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Write bytes to a file through `cap_std`, creating missing parent
    /// directories.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use evaluations::test_support::cap_fs::{path_exists, write_file};
    ///
    /// let path = std::env::temp_dir().join("cap-fs-write-example.txt");
    /// write_file(&path, b"hello\n")?;
    /// assert!(path_exists(&path));
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        Dir::create_ambient_dir_all(parent, ambient_authority())?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    /// Return true when `path` exists, false when it does not.
    pub fn path_exists(path: &Path) -> bool {
        let Ok((parent, file_name)) = parent_and_file_name(path) else {
            return false;
        };
        let Ok(directory) = Dir::open_ambient_dir(parent, ambient_authority()) else {
            return false;
        };
        directory.exists(Path::new(&file_name))
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file or directory name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

pub mod evaluation_store {
    //! Throwaway SQLite stores for repository and end-to-end tests.

    use tempfile::TempDir;

    use crate::domain::ports::EvaluationRepository;
    use crate::domain::{EvaluationDraft, EvaluationFields, EvaluationKey};
    use crate::outbound::persistence::{DbPool, DieselEvaluationRepository, PoolConfig};

    /// An initialised evaluation store inside a temporary directory.
    ///
    /// The directory, and the SQLite file in it, is removed on drop.
    pub struct TemporaryEvaluationStore {
        pub pool: DbPool,
        pub repository: DieselEvaluationRepository,
        dir: TempDir,
    }

    impl TemporaryEvaluationStore {
        /// Create the file, open a pool on it and create the schema.
        ///
        /// # Panics
        ///
        /// Panics when the directory, pool or schema cannot be created.
        pub async fn new() -> Self {
            let dir = tempfile::tempdir().expect("create temp dir");
            let path = dir.path().join("evaluations.db");
            let pool = DbPool::new(PoolConfig::new(path.to_string_lossy()))
                .await
                .expect("build pool");
            let repository = DieselEvaluationRepository::new(pool.clone());
            repository.initialize().await.expect("initialise schema");
            Self {
                pool,
                repository,
                dir,
            }
        }

        /// Directory holding the SQLite file.
        pub fn dir(&self) -> &std::path::Path {
            self.dir.path()
        }
    }

    /// Build a draft with the given key and mutable fields.
    pub fn draft(
        week: &str,
        student_id: i64,
        evaluation_type: &str,
        behavior: Option<i64>,
    ) -> EvaluationDraft {
        EvaluationDraft {
            key: EvaluationKey::new(week, student_id, evaluation_type),
            student_name: format!("student {student_id}"),
            fields: EvaluationFields {
                engagement: Some("good".to_owned()),
                behavior,
                absent: false,
                date: "2024-03-04".to_owned(),
            },
        }
    }
}
