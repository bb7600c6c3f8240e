// filesystem.rs — FileSystem: write request payloads to local files.
//
// Each invocation resolves a folder and file name, makes sure the folder
// exists, decodes the quoted payload and writes it to `<folder>/<file>`.
//
// Resolution order for both names:
//   1. the component metadata value, if non-empty
//   2. otherwise the request metadata value, if non-empty
//   3. otherwise fail before touching the filesystem
//
// Only validation and file-creation failures are reported by default.
// Directory-creation, decode and write failures are logged and skipped
// unless the component sets `strict = "true"`.

use std::fs;
use std::io::Write;
use std::path::Path;

use fsbind_binding::{
    BindingError, BindingRegistry, InvokeRequest, InvokeResponse, Metadata, OperationKind,
    OutputBinding, Result,
};

use crate::metadata::{FileSystemMetadata, FILE_NAME_KEY, FOLDER_NAME_KEY};
use crate::path::join_path;
use crate::unquote::unquote;

/// Component type the binding is registered under.
pub const COMPONENT_TYPE: &str = "bindings.filesystem";

const BINDING_NAME: &str = "filesystem";

/// Output binding that writes to the local file system.
///
/// The metadata is fixed at construction; `invoke` only reads it, so one
/// instance can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct FileSystem {
    metadata: FileSystemMetadata,
}

impl FileSystem {
    pub fn new(metadata: FileSystemMetadata) -> Self {
        Self { metadata }
    }

    /// Build the binding from component metadata. Always succeeds.
    pub fn from_metadata(meta: &Metadata) -> Self {
        Self::new(FileSystemMetadata::parse(meta))
    }

    pub fn metadata(&self) -> &FileSystemMetadata {
        &self.metadata
    }

    /// Pick the configured value, falling back to the request.
    fn resolve<'a>(
        configured: &'a str,
        request: &'a InvokeRequest,
        field: &'static str,
    ) -> Result<&'a str> {
        if !configured.is_empty() {
            return Ok(configured);
        }
        match request.metadata.get(field) {
            Some(value) if !value.is_empty() => Ok(value.as_str()),
            _ => Err(BindingError::MissingField {
                binding: BINDING_NAME,
                field,
            }),
        }
    }

    fn ensure_folder(&self, folder: &str) -> Result<()> {
        if let Err(source) = create_private_dir_all(Path::new(folder)) {
            if self.metadata.strict {
                return Err(BindingError::Io {
                    path: folder.into(),
                    source,
                });
            }
            tracing::warn!("could not create folder {}: {}", folder, source);
        }
        Ok(())
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        match unquote(data) {
            Ok(content) => Ok(content),
            Err(e) if self.metadata.strict => Err(BindingError::Decode(Box::new(e))),
            Err(e) => {
                tracing::warn!("could not decode request data, writing empty file: {}", e);
                Ok(Vec::new())
            }
        }
    }
}

impl OutputBinding for FileSystem {
    fn name(&self) -> &str {
        BINDING_NAME
    }

    fn operations(&self) -> Vec<OperationKind> {
        vec![OperationKind::Create]
    }

    fn invoke(&self, request: &InvokeRequest) -> Result<Option<InvokeResponse>> {
        let folder = Self::resolve(&self.metadata.folder_name, request, FOLDER_NAME_KEY)?;
        let file_name = Self::resolve(&self.metadata.file_name, request, FILE_NAME_KEY)?;

        self.ensure_folder(folder)?;
        let content = self.decode(&request.data)?;

        let full_path = join_path(folder, file_name);
        let write_result = {
            let mut file = fs::File::create(&full_path).map_err(|source| BindingError::Io {
                path: full_path.clone(),
                source,
            })?;
            file.write_all(&content)
            // `file` is closed here, whether or not the write succeeded.
        };

        if let Err(source) = write_result {
            if self.metadata.strict {
                return Err(BindingError::Io {
                    path: full_path,
                    source,
                });
            }
            tracing::warn!("could not write {}: {}", full_path.display(), source);
        }

        tracing::info!("written file with FileSystem: {}", full_path.display());
        tracing::info!("{}", String::from_utf8_lossy(&content));

        Ok(None)
    }
}

/// Create `path` and any missing ancestors, owner-only on Unix.
fn create_private_dir_all(path: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(path)
}

fn create(meta: &Metadata) -> Result<Box<dyn OutputBinding>> {
    Ok(Box::new(FileSystem::from_metadata(meta)))
}

/// Register the filesystem binding under [`COMPONENT_TYPE`].
pub fn register(registry: &mut BindingRegistry) {
    registry.register(COMPONENT_TYPE, create);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;
    use tracing_subscriber::fmt::MakeWriter;

    fn request(data: &str) -> InvokeRequest {
        InvokeRequest::new(OperationKind::Create, data)
    }

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, captured.contents())
    }

    #[test]
    fn operations_is_create_only() {
        let binding = FileSystem::default();
        assert_eq!(binding.operations(), vec![OperationKind::Create]);
        assert!(binding.supports(OperationKind::Create));
        assert!(!binding.supports(OperationKind::Delete));
    }

    #[test]
    fn from_metadata_stores_values_verbatim() {
        let meta = Metadata::default()
            .with_property("folderName", "out")
            .with_property("fileName", "a.txt");
        let binding = FileSystem::from_metadata(&meta);
        assert_eq!(binding.metadata().folder_name, "out");
        assert_eq!(binding.metadata().file_name, "a.txt");
    }

    #[test]
    fn configured_names_are_used_without_request_metadata() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("out");
        let binding = FileSystem::new(
            FileSystemMetadata::default()
                .with_folder_name(folder.to_str().unwrap())
                .with_file_name("a.txt"),
        );

        let response = binding.invoke(&request("\"hello world\"")).unwrap();

        assert!(response.is_none());
        assert_eq!(
            fs::read_to_string(folder.join("a.txt")).unwrap(),
            "hello world"
        );
    }

    #[test]
    fn request_names_are_used_when_unconfigured() {
        let dir = tempdir().unwrap();
        let binding = FileSystem::default();

        binding
            .invoke(
                &request("\"from request\"")
                    .with_metadata("folderName", dir.path().to_str().unwrap())
                    .with_metadata("fileName", "req.txt"),
            )
            .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("req.txt")).unwrap(),
            "from request"
        );
    }

    #[test]
    fn configured_folder_wins_over_request_folder() {
        let configured = tempdir().unwrap();
        let requested = tempdir().unwrap();
        let binding = FileSystem::new(
            FileSystemMetadata::default().with_folder_name(configured.path().to_str().unwrap()),
        );

        binding
            .invoke(
                &request("\"x\"")
                    .with_metadata("folderName", requested.path().to_str().unwrap())
                    .with_metadata("fileName", "x.txt"),
            )
            .unwrap();

        assert!(configured.path().join("x.txt").exists());
        assert!(!requested.path().join("x.txt").exists());
    }

    #[test]
    fn empty_request_value_counts_as_missing() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("never");
        let binding = FileSystem::default();

        let result = binding.invoke(
            &request("\"x\"")
                .with_metadata("folderName", folder.to_str().unwrap())
                .with_metadata("fileName", ""),
        );

        match result {
            Err(e @ BindingError::MissingField { field: "fileName", .. }) => {
                assert_eq!(e.to_string(), "filesystem missing \"fileName\" field");
            }
            other => panic!("expected missing fileName, got {:?}", other),
        }
        // Validation happens before the folder is created.
        assert!(!folder.exists());
    }

    #[test]
    fn missing_folder_name_fails_first() {
        let binding = FileSystem::default();
        let result = binding.invoke(&request("\"x\""));
        assert!(matches!(
            result,
            Err(BindingError::MissingField {
                field: "folderName",
                ..
            })
        ));
    }

    #[test]
    fn missing_ancestors_are_created() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("a/b/c");
        let binding = FileSystem::new(
            FileSystemMetadata::default()
                .with_folder_name(folder.to_str().unwrap())
                .with_file_name("deep.txt"),
        );

        binding.invoke(&request("\"deep\"")).unwrap();

        assert_eq!(fs::read_to_string(folder.join("deep.txt")).unwrap(), "deep");
    }

    #[cfg(unix)]
    #[test]
    fn created_folders_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let folder = dir.path().join("private/inner");
        let binding = FileSystem::new(
            FileSystemMetadata::default()
                .with_folder_name(folder.to_str().unwrap())
                .with_file_name("p.txt"),
        );

        binding.invoke(&request("\"p\"")).unwrap();

        for path in [dir.path().join("private"), folder] {
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700, "{}", path.display());
        }
    }

    #[test]
    fn second_write_truncates_first() {
        let dir = tempdir().unwrap();
        let binding = FileSystem::new(
            FileSystemMetadata::default()
                .with_folder_name(dir.path().to_str().unwrap())
                .with_file_name("t.txt"),
        );

        binding
            .invoke(&request("\"a much longer first payload\""))
            .unwrap();
        binding.invoke(&request("\"short\"")).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("t.txt")).unwrap(),
            "short"
        );
    }

    #[test]
    fn undecodable_data_writes_empty_file_by_default() {
        let dir = tempdir().unwrap();
        let binding = FileSystem::new(
            FileSystemMetadata::default()
                .with_folder_name(dir.path().to_str().unwrap())
                .with_file_name("empty.txt"),
        );

        binding.invoke(&request("not quoted")).unwrap();

        assert_eq!(fs::read(dir.path().join("empty.txt")).unwrap(), b"");
    }

    #[test]
    fn invalid_utf8_in_payload_is_written_as_replacement_character() {
        let dir = tempdir().unwrap();
        let binding = FileSystem::new(
            FileSystemMetadata::default()
                .with_folder_name(dir.path().to_str().unwrap())
                .with_file_name("lossy.txt")
                .with_strict(true),
        );

        binding
            .invoke(&InvokeRequest::new(
                OperationKind::Create,
                b"\"a\xffb\"".to_vec(),
            ))
            .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("lossy.txt")).unwrap(),
            "a\u{FFFD}b"
        );
    }

    #[test]
    fn undecodable_data_fails_in_strict_mode_before_create() {
        let dir = tempdir().unwrap();
        let binding = FileSystem::new(
            FileSystemMetadata::default()
                .with_folder_name(dir.path().to_str().unwrap())
                .with_file_name("strict.txt")
                .with_strict(true),
        );

        let result = binding.invoke(&request("not quoted"));

        assert!(matches!(result, Err(BindingError::Decode(_))));
        assert!(!dir.path().join("strict.txt").exists());
    }

    #[test]
    fn folder_creation_failure_is_reported_at_create_by_default() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let binding = FileSystem::new(
            FileSystemMetadata::default()
                .with_folder_name(blocker.to_str().unwrap())
                .with_file_name("f.txt"),
        );

        match binding.invoke(&request("\"x\"")) {
            Err(BindingError::Io { path, .. }) => assert_eq!(path, blocker.join("f.txt")),
            other => panic!("expected create error, got {:?}", other),
        }
    }

    #[test]
    fn folder_creation_failure_is_reported_directly_in_strict_mode() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let binding = FileSystem::new(
            FileSystemMetadata::default()
                .with_folder_name(blocker.to_str().unwrap())
                .with_file_name("f.txt")
                .with_strict(true),
        );

        match binding.invoke(&request("\"x\"")) {
            Err(BindingError::Io { path, .. }) => assert_eq!(path, blocker),
            other => panic!("expected mkdir error, got {:?}", other),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn write_failure_is_swallowed_unless_strict() {
        // Writes to /dev/full always fail with ENOSPC.
        if fs::OpenOptions::new().write(true).open("/dev/full").is_err() {
            return;
        }
        let lenient = FileSystem::new(
            FileSystemMetadata::default()
                .with_folder_name("/dev")
                .with_file_name("full"),
        );
        assert!(lenient.invoke(&request("\"x\"")).unwrap().is_none());

        let strict = FileSystem::new(lenient.metadata().clone().with_strict(true));
        assert!(matches!(
            strict.invoke(&request("\"x\"")),
            Err(BindingError::Io { .. })
        ));
    }

    #[test]
    fn success_logs_path_and_content() {
        let dir = tempdir().unwrap();
        let binding = FileSystem::new(
            FileSystemMetadata::default()
                .with_folder_name(dir.path().to_str().unwrap())
                .with_file_name("logged.txt"),
        );

        let (result, logs) = with_captured_logs(|| binding.invoke(&request("\"logged body\"")));
        result.unwrap();

        let expected_path = dir.path().join("logged.txt");
        let lines: Vec<&str> = logs.lines().collect();
        assert_eq!(lines.len(), 2, "{}", logs);
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains(&format!(
            "written file with FileSystem: {}",
            expected_path.display()
        )));
        assert!(lines[1].ends_with("logged body"));
    }

    #[test]
    fn validation_failure_logs_nothing() {
        let binding = FileSystem::default();
        let (result, logs) = with_captured_logs(|| binding.invoke(&request("\"x\"")));
        assert!(result.is_err());
        assert!(logs.is_empty(), "{}", logs);
    }

    #[test]
    fn registered_factory_builds_filesystem_binding() {
        let mut registry = BindingRegistry::new();
        register(&mut registry);

        let binding = registry
            .create(COMPONENT_TYPE, &Metadata::default())
            .unwrap();
        assert_eq!(binding.name(), "filesystem");
        assert_eq!(binding.operations(), vec![OperationKind::Create]);
    }
}
